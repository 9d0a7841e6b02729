//! `package.json` normalization.
//!
//! [`package_schema`] registers every manifest field the crate understands,
//! in the conventional npm key order, with the dependencies between them
//! declared explicitly:
//!
//! ```text
//! name ──► keywords, bin
//! files ─► main, bin
//! repository ─► homepage, bugs
//! license ─► licenses
//! bin ─► preferGlobal
//! ```
//!
//! Reading and writing go through [`read_package`] and [`write_package`];
//! output is two-space indented JSON with a trailing newline, written
//! atomically.

#[cfg(test)]
mod pkg_tests;

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::core::NormalizeError;
use crate::fields::{bin, package, people, repository};
use crate::schema::{Normalized, Schema, SchemaOptions};

/// Default manifest file name.
pub const PACKAGE_FILE: &str = "package.json";

/// Conventional key order of a manifest; unknown keys follow.
pub const KEY_ORDER: &[&str] = &[
    "name",
    "description",
    "version",
    "homepage",
    "author",
    "authors",
    "contributors",
    "maintainers",
    "repository",
    "bugs",
    "license",
    "licenses",
    "files",
    "main",
    "bin",
    "preferGlobal",
    "engines",
    "scripts",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "keywords",
    "private",
    "verb",
];

/// Build the manifest schema for a project in `cwd`.
///
/// `options.cwd` is overridden by `cwd`; an empty `options.key_order` is
/// replaced by [`KEY_ORDER`].
pub fn package_schema(cwd: &Path, options: SchemaOptions) -> Result<Schema, NormalizeError> {
    let mut builder = Schema::builder();
    for field in [
        package::name()?,
        package::description()?,
        package::version()?,
        repository::homepage()?.depends_on(["repository"]),
        people::author()?,
        people::authors()?,
        people::contributors()?,
        people::maintainers()?,
        repository::repository()?,
        repository::bugs()?.depends_on(["repository"]),
        package::license()?,
        package::licenses()?.depends_on(["license"]),
        package::files()?,
        package::main()?.depends_on(["files"]),
        bin::bin()?.depends_on(["name", "files"]),
        bin::prefer_global()?.depends_on(["bin"]),
        package::engines()?,
        package::scripts()?,
        package::dependencies()?,
        package::dev_dependencies()?,
        package::peer_dependencies()?,
        package::keywords()?.depends_on(["name"]),
        package::private()?,
        package::verb()?,
    ] {
        builder.register(field);
    }

    let mut options = options.with_cwd(cwd);
    if options.key_order.is_empty() {
        options.key_order = KEY_ORDER.iter().map(|k| (*k).to_string()).collect();
    }
    builder.options(options);
    builder.build()
}

/// Normalize a manifest value for a project in `cwd`.
pub fn normalize_package(
    value: Value,
    cwd: &Path,
    options: SchemaOptions,
) -> Result<Normalized, NormalizeError> {
    package_schema(cwd, options)?.normalize_value(value)
}

/// Read a manifest. A missing file reads as an empty object.
pub fn read_package(path: &Path) -> Result<Value> {
    if !path.exists() {
        debug!("{} not found, starting from an empty manifest", path.display());
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let content = fs::read_to_string(path)
        .map_err(NormalizeError::from)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let value = serde_json::from_str(&content).map_err(|e| NormalizeError::ManifestParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(value)
}

/// Manifest text: two-space indentation and a trailing newline.
pub fn to_package_string(value: &Value) -> Result<String, NormalizeError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    Ok(content)
}

/// Write a manifest atomically, creating parent directories as needed.
pub fn write_package(path: &Path, value: &Value) -> Result<()> {
    let content = to_package_string(value)?;
    let write_failed = |e: std::io::Error| NormalizeError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let temp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&temp_path).map_err(write_failed)?;
        file.write_all(content.as_bytes()).map_err(write_failed)?;
        file.sync_all().map_err(write_failed)?;
    }
    fs::rename(&temp_path, path).map_err(write_failed)?;

    debug!("Wrote {}", path.display());
    Ok(())
}
