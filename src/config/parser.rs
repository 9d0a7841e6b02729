//! TOML parsing with file context.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::NormalizeError;

/// Read and deserialize a TOML file.
///
/// Errors carry the path: "Failed to read config file: ..." for I/O
/// problems and "Failed to parse config file: ..." for syntax or shape
/// problems, with the underlying error preserved as the cause.
///
/// ```rust,no_run
/// use normalize_pkg::config::{NormalizeConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: NormalizeConfig = parse_config(Path::new(".normalize-pkg.toml"))?;
/// println!("sort arrays: {}", config.schema.sort_arrays);
/// # Ok(())
/// # }
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .map_err(NormalizeError::from)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .map_err(NormalizeError::from)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
