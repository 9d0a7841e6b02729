//! Field registrations.
//!
//! A [`Field`] names a config key, the shapes it accepts, and optionally a
//! default, a required flag, the fields it depends on, a normalizer and a
//! validator. Fields are immutable once registered on a
//! [`SchemaBuilder`](crate::schema::SchemaBuilder).

use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::NormalizeError;
use crate::schema::{Patch, Schema, SchemaOptions, TypeSet};

/// Normalizer signature: current value and context in, patch out.
pub type NormalizeFn =
    Arc<dyn Fn(&Value, &FieldContext<'_>) -> Result<Patch, NormalizeError> + Send + Sync>;

/// Validator signature: runs on the normalized value.
pub type ValidateFn = Arc<dyn Fn(&Value, &FieldContext<'_>) -> bool + Send + Sync>;

/// Computed default: consulted when the key is absent and no static default is set.
pub type DefaultFn = Arc<dyn Fn(&FieldContext<'_>) -> Option<Value> + Send + Sync>;

/// What a normalizer or validator can see while it runs.
///
/// `config` is a read-only view of the object as it stands, including every
/// change made by fields processed earlier. Dependencies declared with
/// [`Field::depends_on`] are guaranteed to have run already.
pub struct FieldContext<'a> {
    /// Key of the field being processed
    pub key: &'a str,
    /// The config as processed so far
    pub config: &'a Map<String, Value>,
    /// Options of the current pass
    pub options: &'a SchemaOptions,
    /// The schema running the pass
    pub schema: &'a Schema,
}

impl FieldContext<'_> {
    /// Read another key of the config.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key).filter(|v| !v.is_null())
    }

    /// Read another key as a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The working directory for path resolution.
    #[must_use]
    pub fn cwd(&self) -> PathBuf {
        self.options.cwd()
    }

    /// Hard error for a value this field cannot interpret.
    #[must_use]
    pub fn type_error(&self, expected: &str, found: &Value) -> NormalizeError {
        NormalizeError::field_type(self.key, expected, found)
    }
}

/// Registration options for [`SchemaBuilder::field`](crate::schema::SchemaBuilder::field).
#[derive(Clone, Default)]
pub struct FieldOptions {
    /// Value used when the key is absent
    pub default: Option<Value>,
    /// Default computed from the rest of the config or the filesystem
    pub default_fn: Option<DefaultFn>,
    /// Record a `missing` warning when absent with no default
    pub required: bool,
    /// Fields that must be processed before this one
    pub depends_on: Vec<String>,
    /// Coercion function
    pub normalize: Option<NormalizeFn>,
    /// Validation function
    pub validate: Option<ValidateFn>,
}

/// A named, typed slot in a schema.
#[derive(Clone)]
pub struct Field {
    name: String,
    types: TypeSet,
    default: Option<Value>,
    default_fn: Option<DefaultFn>,
    required: bool,
    depends_on: Vec<String>,
    normalize: Option<NormalizeFn>,
    validate: Option<ValidateFn>,
}

impl Field {
    /// Create a field from a type declaration such as `"string|object"`.
    pub fn new(name: impl Into<String>, types: &str) -> Result<Self, NormalizeError> {
        let name = name.into();
        let types = TypeSet::parse(&name, types)?;
        Ok(Self::with_types(name, types))
    }

    /// Create a field from an already-parsed type set.
    pub fn with_types(name: impl Into<String>, types: TypeSet) -> Self {
        Self {
            name: name.into(),
            types,
            default: None,
            default_fn: None,
            required: false,
            depends_on: Vec::new(),
            normalize: None,
            validate: None,
        }
    }

    /// Create a field and apply registration options.
    pub fn with_options(
        name: impl Into<String>,
        types: &str,
        options: FieldOptions,
    ) -> Result<Self, NormalizeError> {
        let mut field = Self::new(name, types)?;
        field.default = options.default;
        field.default_fn = options.default_fn;
        field.required = options.required;
        field.depends_on = options.depends_on;
        field.normalize = options.normalize;
        field.validate = options.validate;
        Ok(field)
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Compute the default from the context when the key is absent.
    ///
    /// Returning `None` means there is no default and the field is skipped.
    #[must_use]
    pub fn with_default_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> Option<Value> + Send + Sync + 'static,
    {
        self.default_fn = Some(Arc::new(f));
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare fields that must be processed first.
    #[must_use]
    pub fn depends_on<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Set the normalizer.
    #[must_use]
    pub fn normalize<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &FieldContext<'_>) -> Result<Patch, NormalizeError> + Send + Sync + 'static,
    {
        self.normalize = Some(Arc::new(f));
        self
    }

    /// Set the validator.
    #[must_use]
    pub fn validate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &FieldContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(f));
        self
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted types.
    #[must_use]
    pub const fn types(&self) -> TypeSet {
        self.types
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the field itself is marked required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Declared dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    pub(crate) fn default_fn(&self) -> Option<&DefaultFn> {
        self.default_fn.as_ref()
    }

    pub(crate) fn normalizer(&self) -> Option<&NormalizeFn> {
        self.normalize.as_ref()
    }

    pub(crate) fn validator(&self) -> Option<&ValidateFn> {
        self.validate.as_ref()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("types", &self.types.to_string())
            .field("default", &self.default)
            .field("default_fn", &self.default_fn.is_some())
            .field("required", &self.required)
            .field("depends_on", &self.depends_on)
            .field("normalize", &self.normalize.is_some())
            .field("validate", &self.validate.is_some())
            .finish()
    }
}
