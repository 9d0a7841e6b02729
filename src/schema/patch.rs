//! Structured results of a field normalizer.
//!
//! A normalizer never mutates the config it is given. It returns a [`Patch`]
//! describing what to change, and the engine applies it centrally. A patch may
//! touch keys other than the field's own: `bin` uses this to add entries to
//! `files`, `tasks` to set `run`.

use serde_json::Value;

use crate::schema::Warning;

/// One change to apply to the config.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Set `key` to `value`.
    Set {
        /// Target key
        key: String,
        /// New value
        value: Value,
    },
    /// Delete `key` immediately.
    Remove {
        /// Target key
        key: String,
    },
    /// Delete `key` after every field has run.
    ///
    /// Later fields still see the value while the pass is in progress.
    Omit {
        /// Target key
        key: String,
    },
}

/// An ordered list of [`PatchOp`]s with the field's own key as default target.
///
/// # Examples
///
/// ```rust
/// use normalize_pkg::schema::{Patch, PatchOp};
/// use serde_json::json;
///
/// let patch = Patch::remove().and_set("run", json!(true));
/// let ops = patch.into_ops("tasks");
/// assert_eq!(ops[0], PatchOp::Remove { key: "tasks".into() });
/// assert_eq!(ops[1], PatchOp::Set { key: "run".into(), value: json!(true) });
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    own: Option<OwnOp>,
    others: Vec<PatchOp>,
    warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq)]
enum OwnOp {
    Set(Value),
    Remove,
    Omit,
}

impl Patch {
    /// Leave the field's value as it is.
    #[must_use]
    pub fn keep() -> Self {
        Self::default()
    }

    /// Replace the field's value.
    #[must_use]
    pub fn set(value: Value) -> Self {
        Self {
            own: Some(OwnOp::Set(value)),
            ..Self::default()
        }
    }

    /// Delete the field's key now.
    #[must_use]
    pub fn remove() -> Self {
        Self {
            own: Some(OwnOp::Remove),
            ..Self::default()
        }
    }

    /// Delete the field's key once the pass is over.
    #[must_use]
    pub fn omit() -> Self {
        Self {
            own: Some(OwnOp::Omit),
            ..Self::default()
        }
    }

    /// Additionally set another key.
    #[must_use]
    pub fn and_set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.others.push(PatchOp::Set {
            key: key.into(),
            value,
        });
        self
    }

    /// Additionally delete another key now.
    #[must_use]
    pub fn and_remove(mut self, key: impl Into<String>) -> Self {
        self.others.push(PatchOp::Remove {
            key: key.into(),
        });
        self
    }

    /// Additionally delete another key once the pass is over.
    #[must_use]
    pub fn and_omit(mut self, key: impl Into<String>) -> Self {
        self.others.push(PatchOp::Omit {
            key: key.into(),
        });
        self
    }

    /// Carry warnings produced while normalizing, e.g. by a nested schema.
    #[must_use]
    pub fn and_warnings(mut self, warnings: impl IntoIterator<Item = Warning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_keep(&self) -> bool {
        self.own.is_none() && self.others.is_empty()
    }

    /// Split into concrete operations for field `key` and carried warnings.
    #[must_use]
    pub fn into_parts(mut self, key: &str) -> (Vec<PatchOp>, Vec<Warning>) {
        let warnings = std::mem::take(&mut self.warnings);
        (self.into_ops(key), warnings)
    }

    /// Resolve into concrete operations for field `key`, own op first.
    #[must_use]
    pub fn into_ops(self, key: &str) -> Vec<PatchOp> {
        let mut ops = Vec::with_capacity(self.others.len() + 1);
        if let Some(own) = self.own {
            let key = key.to_string();
            ops.push(match own {
                OwnOp::Set(value) => PatchOp::Set {
                    key,
                    value,
                },
                OwnOp::Remove => PatchOp::Remove {
                    key,
                },
                OwnOp::Omit => PatchOp::Omit {
                    key,
                },
            });
        }
        ops.extend(self.others);
        ops
    }
}

impl From<Value> for Patch {
    fn from(value: Value) -> Self {
        Self::set(value)
    }
}

impl From<Option<Value>> for Patch {
    /// `None` keeps the current value, matching a normalizer that had nothing to set.
    fn from(value: Option<Value>) -> Self {
        value.map_or_else(Self::keep, Self::set)
    }
}
