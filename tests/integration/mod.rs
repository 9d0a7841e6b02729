//! Integration test suite for normalize-pkg
//!
//! End-to-end tests for the `normalize-pkg` binary and the public library
//! entry points.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **argv**: Command-line adapter (`normalize_argv`) from the outside
//! - **cli**: The binary: exit codes, output, destination handling
//! - **config**: `.normalize-pkg.toml` and `NORMALIZE_PKG_CONFIG`
//! - **git**: `.git/config` lookups and the process-wide cache
//! - **package**: `package.json` normalization through the library

mod argv;
mod cli;
mod config;
mod git;
mod package;
