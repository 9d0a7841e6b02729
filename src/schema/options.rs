//! Options controlling a normalization pass.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Toggles recognized by [`Schema::normalize`](crate::schema::Schema::normalize).
///
/// Deserializable so the options can come from `.normalize-pkg.toml`:
///
/// ```toml
/// sort-arrays = true
/// omit-empty = true
/// required = ["name", "version"]
/// omit = ["scripts"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SchemaOptions {
    /// Sort every array of strings lexically after normalization.
    pub sort_arrays: bool,
    /// Drop keys whose final value is `null`, `""`, `[]` or `{}`.
    pub omit_empty: bool,
    /// Apply field defaults when a value is absent.
    pub defaults: bool,
    /// Keys that must be present; adds to each field's own `required` flag.
    pub required: Vec<String>,
    /// Drop keys that have no registered field.
    pub known_only: bool,
    /// When non-empty, only these keys are processed and kept.
    pub pick: Vec<String>,
    /// Keys removed from the output.
    pub omit: Vec<String>,
    /// Keys listed here come first in the output, in this order.
    pub key_order: Vec<String>,
    /// Log warnings at `warn` level as they are recorded.
    pub verbose: bool,
    /// Directory relative paths are resolved against. Defaults to the
    /// process working directory.
    pub cwd: Option<PathBuf>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            sort_arrays: false,
            omit_empty: false,
            defaults: true,
            required: Vec::new(),
            known_only: false,
            pick: Vec::new(),
            omit: Vec::new(),
            key_order: Vec::new(),
            verbose: false,
            cwd: None,
        }
    }
}

impl SchemaOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory used for path resolution.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Mark keys as required.
    #[must_use]
    pub fn with_required<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(keys.into_iter().map(Into::into));
        self
    }

    /// The working directory for path resolution.
    ///
    /// Falls back to the process working directory, then to `.`.
    #[must_use]
    pub fn cwd(&self) -> PathBuf {
        self.cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| Path::new(".").to_path_buf())
    }

    /// Whether `key` is listed in [`required`](Self::required).
    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }

    /// Whether `key` survives [`pick`](Self::pick).
    #[must_use]
    pub fn is_picked(&self, key: &str) -> bool {
        self.pick.is_empty() || self.pick.iter().any(|k| k == key)
    }
}
