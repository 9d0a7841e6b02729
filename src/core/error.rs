//! Error handling for normalize-pkg
//!
//! This module provides the error type shared by the schema engine, the field
//! normalizers, the argv adapter and the `normalize-pkg` binary, together with
//! user-friendly error reporting for the CLI.
//!
//! # Failure Tiers
//!
//! Normalization distinguishes two kinds of problems:
//! - **Soft failures** (a missing required field, a value of the wrong type, a
//!   value rejected by a validator) never surface here. They are collected as
//!   [`Warning`](crate::schema::Warning) records and the pass completes.
//! - **Hard failures** (a malformed field registration, a dependency cycle
//!   between fields, non-object input, a normalizer receiving a value it
//!   cannot interpret) are reported as [`NormalizeError`] and propagate to the
//!   immediate caller.
//!
//! # Architecture
//!
//! - [`NormalizeError`] - Enumerated error types for every hard failure
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use normalize_pkg::core::{NormalizeError, user_friendly_error};
//!
//! let error = NormalizeError::NotAnObject {
//!     found: "array".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for normalize-pkg operations.
///
/// Each variant names one hard failure mode. Soft, per-field problems are
/// reported through the warnings list of a normalization pass instead.
///
/// # Error Categories
///
/// ## Schema construction
/// - [`InvalidFieldTypes`] - A field declared an empty or unrecognized type set
/// - [`UnknownDependency`] - A field depends on a field that was never registered
/// - [`CircularDependency`] - Field dependencies form a cycle
///
/// ## Normalization
/// - [`NotAnObject`] - The value handed to the engine is not a key/value object
/// - [`FieldType`] - A field normalizer received a value it cannot coerce
/// - [`InvalidRepository`] - A repository string could not be parsed
///
/// ## Files and configuration
/// - [`ManifestParse`] - `package.json` is not valid JSON
/// - [`WriteFailed`] - The normalized output could not be written
/// - [`ConfigError`] - The options file is invalid
/// - [`Io`], [`Json`], [`Toml`] - Wrapped library errors
///
/// [`InvalidFieldTypes`]: NormalizeError::InvalidFieldTypes
/// [`UnknownDependency`]: NormalizeError::UnknownDependency
/// [`CircularDependency`]: NormalizeError::CircularDependency
/// [`NotAnObject`]: NormalizeError::NotAnObject
/// [`FieldType`]: NormalizeError::FieldType
/// [`InvalidRepository`]: NormalizeError::InvalidRepository
/// [`ManifestParse`]: NormalizeError::ManifestParse
/// [`WriteFailed`]: NormalizeError::WriteFailed
/// [`ConfigError`]: NormalizeError::ConfigError
/// [`Io`]: NormalizeError::Io
/// [`Json`]: NormalizeError::Json
/// [`Toml`]: NormalizeError::Toml
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// A field was registered with a type declaration that does not resolve
    /// to a non-empty set of recognized type tags.
    #[error("Invalid types for field '{field}': {reason}")]
    InvalidFieldTypes {
        /// Name of the field being registered
        field: String,
        /// Why the declaration was rejected
        reason: String,
    },

    /// A field declared a dependency on a field that is not registered.
    #[error("Field '{field}' depends on unknown field '{dependency}'")]
    UnknownDependency {
        /// The dependent field
        field: String,
        /// The missing dependency
        dependency: String,
    },

    /// Field dependencies contain a cycle.
    ///
    /// Detected once when the schema is built, never at normalize time.
    #[error("Circular field dependency detected: {cycle}")]
    CircularDependency {
        /// The cycle rendered as `a → b → a`
        cycle: String,
    },

    /// The engine was handed something other than a key/value object.
    #[error("Expected a config object, found {found}")]
    NotAnObject {
        /// Type tag of the value that was received
        found: String,
    },

    /// A field normalizer received a value of a fundamentally wrong type.
    #[error("Field '{field}' expected {expected}, found {found}")]
    FieldType {
        /// Field whose normalizer raised
        field: String,
        /// Human-readable list of accepted shapes
        expected: String,
        /// Type tag of the offending value
        found: String,
    },

    /// A repository string or object could not be turned into `owner/name`.
    #[error("Invalid repository: {input}")]
    InvalidRepository {
        /// The value that failed to parse
        input: String,
    },

    /// `package.json` could not be parsed.
    #[error("Invalid JSON in {file}")]
    ManifestParse {
        /// Path of the file that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// The normalized output could not be written.
    #[error("Failed to write {path}")]
    WriteFailed {
        /// Destination path
        path: String,
        /// Underlying reason
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl NormalizeError {
    /// Build a [`NormalizeError::FieldType`] for `field` from the offending value.
    pub fn field_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: &serde_json::Value,
    ) -> Self {
        Self::FieldType {
            field: field.into(),
            expected: expected.into(),
            found: crate::schema::TypeTag::of(found).to_string(),
        }
    }
}

impl Clone for NormalizeError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidFieldTypes {
                field,
                reason,
            } => Self::InvalidFieldTypes {
                field: field.clone(),
                reason: reason.clone(),
            },
            Self::UnknownDependency {
                field,
                dependency,
            } => Self::UnknownDependency {
                field: field.clone(),
                dependency: dependency.clone(),
            },
            Self::CircularDependency {
                cycle,
            } => Self::CircularDependency {
                cycle: cycle.clone(),
            },
            Self::NotAnObject {
                found,
            } => Self::NotAnObject {
                found: found.clone(),
            },
            Self::FieldType {
                field,
                expected,
                found,
            } => Self::FieldType {
                field: field.clone(),
                expected: expected.clone(),
                found: found.clone(),
            },
            Self::InvalidRepository {
                input,
            } => Self::InvalidRepository {
                input: input.clone(),
            },
            Self::ManifestParse {
                file,
                reason,
            } => Self::ManifestParse {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::WriteFailed {
                path,
                reason,
            } => Self::WriteFailed {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // Wrapped library errors don't implement Clone, convert to Other
            Self::Io(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Json(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::Toml(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`NormalizeError`] and adds optional suggestions for
/// resolution and additional details.
///
/// # Display Format
///
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: NormalizeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: NormalizeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly format with contextual suggestions.
///
/// Walks the error chain looking for a [`NormalizeError`] (errors wrapped by
/// `anyhow` context keep theirs further down the chain), then falls back to
/// I/O and JSON errors, and finally to the plain message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(normalize_error) = current.downcast_ref::<NormalizeError>() {
            let ctx = create_error_context(normalize_error);
            let outer = error.to_string();
            // keep the outermost context (usually the file path) when it adds something
            return if ctx.details.is_none() && outer != normalize_error.to_string() {
                ctx.with_details(outer)
            } else {
                ctx
            };
        }

        if let Some(io_error) = current.downcast_ref::<std::io::Error>() {
            let base = ErrorContext::new(NormalizeError::Other {
                message: error.to_string(),
            })
            .with_details(io_error.to_string());
            return match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    base.with_suggestion("Check the permissions of the file and its directory")
                }
                std::io::ErrorKind::NotFound => {
                    base.with_suggestion("Check that the file or directory exists")
                }
                _ => base,
            };
        }

        if let Some(json_error) = current.downcast_ref::<serde_json::Error>() {
            return ErrorContext::new(NormalizeError::Other {
                message: error.to_string(),
            })
            .with_details(json_error.to_string())
            .with_suggestion("Check the JSON syntax of the input file");
        }

        match current.source() {
            Some(source) => current = source,
            None => break,
        }
    }

    ErrorContext::new(NormalizeError::Other {
        message: format!("{error:#}"),
    })
}

/// Attach a suggestion and details to a known [`NormalizeError`].
#[must_use]
pub fn create_error_context(error: &NormalizeError) -> ErrorContext {
    match error {
        NormalizeError::NotAnObject {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Pass a JSON object such as the contents of package.json")
            .with_details("Only key/value objects can be normalized"),
        NormalizeError::CircularDependency {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Remove one of the `depends_on` edges listed above"),
        NormalizeError::UnknownDependency {
            dependency,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Register field '{dependency}' before building the schema")),
        NormalizeError::InvalidFieldTypes {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Use one or more of: null, boolean, number, string, array, object",
        ),
        NormalizeError::FieldType {
            field,
            expected,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Set '{field}' to {expected}")),
        NormalizeError::InvalidRepository {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Use the form 'owner/name' or a full repository URL"),
        NormalizeError::ManifestParse {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_details(reason.clone())
            .with_suggestion("Fix the JSON syntax and run normalize-pkg again"),
        NormalizeError::WriteFailed {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_details(reason.clone())
            .with_suggestion("Check that the destination directory exists and is writable"),
        NormalizeError::ConfigError {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Check .normalize-pkg.toml or the file named by NORMALIZE_PKG_CONFIG",
        ),
        NormalizeError::Io(io_error) => {
            let ctx = ErrorContext::new(error.clone());
            match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    ctx.with_suggestion("Check the permissions of the file and its directory")
                }
                std::io::ErrorKind::NotFound => {
                    ctx.with_suggestion("Check that the file or directory exists")
                }
                _ => ctx,
            }
        }
        NormalizeError::Toml(_) => ErrorContext::new(error.clone())
            .with_suggestion("Check the TOML syntax of .normalize-pkg.toml"),
        _ => ErrorContext::new(error.clone()),
    }
}
