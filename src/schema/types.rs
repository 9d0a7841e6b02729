//! Type tags for field declarations.
//!
//! Fields declare the shapes they accept as a [`TypeSet`], a non-empty set of
//! [`TypeTag`]s. The mapping from a concrete [`Value`] to its tag is
//! exhaustive: every JSON value has exactly one tag.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::core::NormalizeError;

/// The shape category of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number
    Number,
    /// A string
    String,
    /// An array
    Array,
    /// An object
    Object,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 6] = [
        TypeTag::Null,
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
        TypeTag::Array,
        TypeTag::Object,
    ];

    /// Classify a value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name used in declarations and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Self::Null),
            "boolean" | "bool" => Ok(Self::Boolean),
            "number" | "int" | "integer" | "float" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" | "list" => Ok(Self::Array),
            "object" | "map" => Ok(Self::Object),
            other => Err(format!("unrecognized type '{other}'")),
        }
    }
}

/// A non-empty set of accepted [`TypeTag`]s.
///
/// # Examples
///
/// ```rust
/// use normalize_pkg::schema::{TypeSet, TypeTag};
///
/// let types = TypeSet::parse("related", "object|string|boolean").unwrap();
/// assert!(types.contains(TypeTag::String));
/// assert!(!types.contains(TypeTag::Array));
/// assert!(TypeSet::parse("related", "").is_err());
/// assert!(TypeSet::parse("related", "function").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSet(u8);

impl TypeSet {
    /// Parse a declaration such as `"string|object"` for field `field`.
    ///
    /// Tags may be separated by `|`, `,` or whitespace. An empty declaration
    /// or an unrecognized tag is a registration error.
    pub fn parse(field: &str, declaration: &str) -> Result<Self, NormalizeError> {
        let mut bits = 0u8;
        for part in declaration.split(['|', ',', ' ']).filter(|p| !p.trim().is_empty()) {
            let tag = part.parse::<TypeTag>().map_err(|reason| {
                NormalizeError::InvalidFieldTypes {
                    field: field.to_string(),
                    reason,
                }
            })?;
            bits |= tag.bit();
        }
        if bits == 0 {
            return Err(NormalizeError::InvalidFieldTypes {
                field: field.to_string(),
                reason: "at least one type is required".to_string(),
            });
        }
        Ok(Self(bits))
    }

    /// Build a set from explicit tags. Returns `None` for an empty slice.
    #[must_use]
    pub fn from_tags(tags: &[TypeTag]) -> Option<Self> {
        let bits = tags.iter().fold(0u8, |acc, tag| acc | tag.bit());
        (bits != 0).then_some(Self(bits))
    }

    /// Whether `tag` is accepted.
    #[must_use]
    pub const fn contains(self, tag: TypeTag) -> bool {
        self.0 & tag.bit() != 0
    }

    /// Whether the value's tag is accepted.
    #[must_use]
    pub const fn accepts(self, value: &Value) -> bool {
        self.contains(TypeTag::of(value))
    }

    /// Accepted tags in canonical order.
    pub fn tags(self) -> impl Iterator<Item = TypeTag> {
        TypeTag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.tags().map(TypeTag::as_str).collect();
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_tag_of_is_exhaustive() {
        assert_eq!(TypeTag::of(&json!(null)), TypeTag::Null);
        assert_eq!(TypeTag::of(&json!(false)), TypeTag::Boolean);
        assert_eq!(TypeTag::of(&json!(1.5)), TypeTag::Number);
        assert_eq!(TypeTag::of(&json!("x")), TypeTag::String);
        assert_eq!(TypeTag::of(&json!([])), TypeTag::Array);
        assert_eq!(TypeTag::of(&json!({})), TypeTag::Object);
    }

    #[test]
    fn test_parse_separators_and_aliases() {
        let types = TypeSet::parse("f", "bool, list | map").unwrap();
        assert!(types.contains(TypeTag::Boolean));
        assert!(types.contains(TypeTag::Array));
        assert!(types.contains(TypeTag::Object));
        assert!(!types.contains(TypeTag::String));
        assert_eq!(types.to_string(), "boolean|array|object");
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = TypeSet::parse("bin", "string|function").unwrap_err();
        assert!(err.to_string().contains("bin"));
        assert!(err.to_string().contains("function"));
    }

    #[test]
    fn test_from_tags() {
        assert!(TypeSet::from_tags(&[]).is_none());
        let set = TypeSet::from_tags(&[TypeTag::String]).unwrap();
        assert!(set.accepts(&json!("a")));
        assert!(!set.accepts(&json!(1)));
    }
}
