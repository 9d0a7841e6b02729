//! Test utilities for normalize-pkg
//!
//! Helpers shared by unit tests and the integration test target (through the
//! `test-utils` feature):
//! - [`init_test_logging`] for tracing output inside tests
//! - [`TestProject`], a temporary project directory with manifest, config
//!   and `.git/config` helpers
//! - [`PackageFixture`], sample `package.json` documents
//!
//! # Example
//!
//! ```rust,ignore
//! use normalize_pkg::test_utils::{PackageFixture, TestProject};
//!
//! let project = TestProject::new("my-lib").unwrap();
//! PackageFixture::minimal().write_to(project.path()).unwrap();
//! assert!(project.file_exists("package.json"));
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestProject;
pub use fixtures::PackageFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `level` unset, logging is enabled
/// only when `RUST_LOG` is set:
///
/// ```bash
/// RUST_LOG=normalize_pkg=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
