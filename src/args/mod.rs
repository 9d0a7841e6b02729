//! Command-line argument adapter.
//!
//! Turns raw argv tokens into a normalized configuration object:
//!
//! 1. [`rewrite_aliases`]: `-V` → `--version`, first matching alias wins
//! 2. [`parse`]: tokens → object, with `k:v` expansion and key ordering
//! 3. [`pluralize`]: `helper` → `helpers`, also inside `config`
//! 4. the command-line [`Schema`](crate::schema::Schema) from [`cli_schema`]
//! 5. [`mirror_aliases`]: long keys copied onto their short aliases
//!
//! # Examples
//!
//! ```rust
//! use normalize_pkg::args::normalize_argv;
//! use normalize_pkg::schema::SchemaOptions;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), normalize_pkg::core::NormalizeError> {
//! let result = normalize_argv(&["-V", "--related", "b,a"], SchemaOptions::default())?;
//! assert_eq!(result.config["version"], json!(true));
//! assert_eq!(result.config["V"], json!(true));
//! assert_eq!(result.config["related"], json!({"list": ["a", "b"]}));
//! # Ok(())
//! # }
//! ```

mod aliases;
mod parser;
mod schema;

pub use aliases::{ALIASES, alias_for, long_for, mirror_aliases, rewrite_aliases, rewrite_token};
pub use parser::{ESCAPE_EXEMPT, FIRST, LAST, ParseOptions, coerce, parse};
pub use schema::{cli_schema, cli_schema_builder, pluralize};

use tracing::debug;

use crate::core::NormalizeError;
use crate::schema::{Config, Normalized, SchemaOptions};

/// Run argv through the full adapter pipeline.
pub fn normalize_argv<S: AsRef<str>>(
    argv: &[S],
    options: SchemaOptions,
) -> Result<Normalized, NormalizeError> {
    let tokens = rewrite_aliases(argv);
    let mut parsed = parse(&tokens, &ParseOptions::default());
    pluralize(&mut parsed);
    debug!(keys = parsed.len(), "parsed command-line arguments");

    let mut result = cli_schema()?.with_options(options).normalize(Config::from(parsed))?;
    mirror_aliases(&mut result.config);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> SchemaOptions {
        SchemaOptions::new().with_cwd(dir.path())
    }

    #[test]
    fn test_version_flag() {
        let temp = TempDir::new().unwrap();
        let result = normalize_argv(&["-V"], options(&temp)).unwrap();
        assert_eq!(result.config["version"], json!(true));
        assert_eq!(result.config["V"], json!(true));
    }

    #[test]
    fn test_tasks_true_sets_run() {
        let temp = TempDir::new().unwrap();
        let result = normalize_argv(&["--tasks"], options(&temp)).unwrap();
        assert_eq!(result.config["run"], json!(true));
        assert!(!result.config.contains_key("tasks"));
        assert!(!result.config.contains_key("t"));
    }

    #[test]
    fn test_singular_flags_are_pluralized_and_resolved() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("helpers.js"), "").unwrap();
        let result = normalize_argv(&["--helper", "helpers.js", "--plugin", "a,b"], options(&temp)).unwrap();

        let helper = temp.path().join("helpers.js").to_string_lossy().into_owned();
        assert_eq!(result.config["helpers"], json!([helper]));
        assert_eq!(result.config["plugins"], json!(["a", "b"]));
        assert!(!result.config.contains_key("helper"));
    }

    #[test]
    fn test_data_expansion_and_alias() {
        let temp = TempDir::new().unwrap();
        let result = normalize_argv(&["-d", "name:foo,private"], options(&temp)).unwrap();
        assert_eq!(result.config["data"], json!({"name": "foo", "private": true}));
        assert_eq!(result.config["d"], result.config["data"]);
    }

    #[test]
    fn test_config_option_toggle() {
        let temp = TempDir::new().unwrap();
        let result = normalize_argv(&["--config.toc", "--config.related=b,a"], options(&temp)).unwrap();
        assert_eq!(result.config["config"]["toc"], json!({"show": true}));
        assert_eq!(result.config["config"]["related"], json!({"list": ["a", "b"]}));
    }

    #[test]
    fn test_config_paths_resolve_against_cwd_flag() {
        let project = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        std::fs::write(project.path().join("h.js"), "").unwrap();
        let dir = project.path().to_string_lossy().into_owned();

        let result = normalize_argv(
            &["--cwd", &dir, "--helper", "h.js", "--config.helper", "h.js"],
            options(&elsewhere),
        )
        .unwrap();

        let helper = project.path().join("h.js").to_string_lossy().into_owned();
        assert_eq!(result.config["helpers"], json!([helper.clone()]));
        assert_eq!(result.config["config"]["helpers"], json!([helper]));
    }

    #[test]
    fn test_bad_option_type_is_hard_error() {
        let temp = TempDir::new().unwrap();
        assert!(normalize_argv(&["--option", "5"], options(&temp)).is_err());
    }
}
