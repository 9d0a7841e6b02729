//! Core types for normalize-pkg
//!
//! This module holds the error type shared by every other module and the
//! helpers that turn errors into user-facing messages.
//!
//! ## `error` - Error Handling
//!
//! - [`NormalizeError`] - Enumerated hard failures
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! # Example
//!
//! ```rust
//! use normalize_pkg::core::{NormalizeError, user_friendly_error};
//!
//! fn example_operation() -> anyhow::Result<()> {
//!     Err(NormalizeError::NotAnObject { found: "string".to_string() }.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, NormalizeError, create_error_context, user_friendly_error};
