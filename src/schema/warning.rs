//! Non-fatal diagnostics collected during a normalization pass.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// A required field had no value and no default.
    Missing,
    /// The normalized value does not match the field's accepted types.
    InvalidType,
    /// The field's validator rejected the normalized value.
    InvalidValue,
    /// A key with no registered field was dropped (`known_only`).
    Unknown,
}

impl WarningKind {
    /// Short name used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::InvalidType => "invalidType",
            Self::InvalidValue => "invalidValue",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One warning record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    /// Warning category
    #[serde(rename = "method")]
    pub kind: WarningKind,
    /// Key the warning is about
    pub prop: String,
    /// Optional human-readable explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Offending value, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Warning {
    /// Create a warning with no message or value.
    pub fn new(kind: WarningKind, prop: impl Into<String>) -> Self {
        Self {
            kind,
            prop: prop.into(),
            message: None,
            value: None,
        }
    }

    /// Attach a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the offending value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.prop)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Receives warnings from a finished pass.
///
/// The engine never escalates warnings; callers that want strict behavior
/// implement a reporter that fails on the first one.
pub trait Reporter {
    /// Called once per warning, in the order they were recorded.
    fn report(&mut self, warning: &Warning);
}

impl<F: FnMut(&Warning)> Reporter for F {
    fn report(&mut self, warning: &Warning) {
        self(warning);
    }
}
