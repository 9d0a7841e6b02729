//! normalize-pkg - schema-driven config normalization
//!
//! Loosely typed key/value objects (a `package.json`, a parsed command line,
//! a nested tool config) are run through a schema of named fields. Each field
//! declares the JSON types it accepts, an optional default and a normalizer
//! that returns a patch; the engine applies fields in dependency order and
//! collects soft problems as warnings instead of failing.
//!
//! # Modules
//!
//! ## Engine
//! - [`schema`] - Fields, the dependency graph, patches, warnings and options
//! - [`core`] - Error type and user-facing error rendering
//!
//! ## Fields and adapters
//! - [`fields`] - Reusable field definitions (toggles, paths, people, bin, ...)
//! - [`args`] - Command-line argv adapter with alias rewriting
//! - [`pkg`] - The `package.json` schema, reading and writing
//! - [`repo`] - Repository URL parsing, people and `.git/config` lookups
//!
//! ## Binary
//! - [`cli`] - The `normalize-pkg` command
//! - [`config`] - `.normalize-pkg.toml` loading
//!
//! # Example
//!
//! ```rust
//! use normalize_pkg::pkg::normalize_package;
//! use normalize_pkg::schema::SchemaOptions;
//! use serde_json::json;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), normalize_pkg::core::NormalizeError> {
//! let manifest = json!({
//!     "name": "my-lib",
//!     "repository": "https://github.com/jon/my-lib.git",
//!     "keywords": "parser, config",
//! });
//! let result = normalize_package(manifest, Path::new("/tmp/my-lib"), SchemaOptions::default())?;
//!
//! assert_eq!(result.config["repository"], json!("jon/my-lib"));
//! assert_eq!(result.config["homepage"], json!("https://github.com/jon/my-lib"));
//! assert_eq!(result.config["keywords"], json!(["config", "parser"]));
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Normalize ./package.json in place
//! normalize-pkg
//!
//! # Write elsewhere
//! normalize-pkg --dest dist/package.json
//! ```

// Engine
pub mod core;
pub mod schema;

// Fields and adapters
pub mod args;
pub mod fields;
pub mod pkg;
pub mod repo;

// Binary support
pub mod cli;
pub mod config;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
