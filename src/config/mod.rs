//! Configuration for the `normalize-pkg` binary.
//!
//! Normalization options can be stored next to the manifest in
//! `.normalize-pkg.toml`, or anywhere else when `NORMALIZE_PKG_CONFIG` names
//! the file:
//!
//! ```toml
//! # Destination used when --dest is not given
//! dest = "package.json"
//!
//! sort-arrays = true
//! omit-empty = true
//! required = ["name", "version"]
//! omit = ["scripts"]
//! key-order = ["name", "version", "description"]
//! ```
//!
//! Every key is optional. A project without a config file normalizes with
//! [`SchemaOptions::default`].
//!
//! # Lookup
//!
//! 1. `$NORMALIZE_PKG_CONFIG`, when set and non-empty; `~` is expanded and a
//!    relative path is taken from the working directory. The file must exist.
//! 2. `.normalize-pkg.toml` in the working directory, when present.
//! 3. Defaults.

mod parser;

pub use parser::parse_config;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::NormalizeError;
use crate::schema::SchemaOptions;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".normalize-pkg.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "NORMALIZE_PKG_CONFIG";

/// Contents of a `.normalize-pkg.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NormalizeConfig {
    /// Output path used when the command line does not give one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<PathBuf>,

    /// Options passed to the manifest schema.
    #[serde(flatten)]
    pub schema: SchemaOptions,
}

impl NormalizeConfig {
    /// Load the config for a project in `cwd`, honoring `NORMALIZE_PKG_CONFIG`.
    pub fn load(cwd: &Path) -> Result<Self> {
        let explicit = std::env::var(CONFIG_ENV).ok();
        Self::load_from(cwd, explicit.as_deref())
    }

    /// Load the config for a project in `cwd` with an explicit override
    /// path in place of the environment lookup.
    pub fn load_from(cwd: &Path, explicit: Option<&str>) -> Result<Self> {
        let Some(path) = config_path(cwd, explicit) else {
            debug!("No {} in {}, using defaults", CONFIG_FILE, cwd.display());
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Err(NormalizeError::ConfigError {
                message: format!("{CONFIG_ENV} points to a missing file: {}", path.display()),
            }
            .into());
        }

        debug!("Loading config from {}", path.display());
        parse_config(&path)
    }

    /// Schema options for a project in `cwd`.
    #[must_use]
    pub fn schema_options(&self, cwd: &Path) -> SchemaOptions {
        self.schema.clone().with_cwd(cwd)
    }
}

/// The config file that applies to `cwd`, if any.
///
/// An explicit path is returned whether or not it exists; the default file
/// only when it does.
#[must_use]
pub fn config_path(cwd: &Path, explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(explicit) = explicit.map(str::trim).filter(|p| !p.is_empty()) {
        let expanded = PathBuf::from(shellexpand::tilde(explicit).into_owned());
        return Some(if expanded.is_absolute() {
            expanded
        } else {
            cwd.join(expanded)
        });
    }

    let local = cwd.join(CONFIG_FILE);
    local.is_file().then_some(local)
}
