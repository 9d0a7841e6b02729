//! Schema engine: field registry and normalization passes.
//!
//! A [`Schema`] owns an ordered set of [`Field`] registrations. Running an
//! object through it applies defaults, calls each field's normalizer, checks
//! the result against the field's accepted types and validator, and finally
//! prunes and orders the object.
//!
//! # Processing Order
//!
//! Fields run in registration order, except that a field declared with
//! [`Field::depends_on`] always runs after its dependencies. The order is
//! computed once by [`SchemaBuilder::build`], which also rejects unknown
//! dependencies and cycles.
//!
//! # Failure Semantics
//!
//! The engine is best effort. A missing required value, a type mismatch or a
//! rejected value becomes a [`Warning`] and the pass continues. Only structural
//! problems are returned as errors: non-object input, and normalizers that
//! raise [`NormalizeError::FieldType`] for values they cannot interpret.
//!
//! # Examples
//!
//! ```rust
//! use normalize_pkg::schema::{Field, Patch, Schema, SchemaOptions};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), normalize_pkg::core::NormalizeError> {
//! let mut builder = Schema::builder();
//! builder.register(Field::new("name", "string")?.required());
//! builder.register(Field::new("keywords", "array|string")?.normalize(|value, _ctx| {
//!     Ok(Patch::set(normalize_pkg::fields::list_value(value)))
//! }));
//! let schema = builder.build()?;
//!
//! let result = schema.normalize_value(json!({"keywords": "b,a,a"}))?;
//! assert_eq!(result.config["keywords"], json!(["a", "b"]));
//! assert_eq!(result.warnings.len(), 1); // name is missing
//! # Ok(())
//! # }
//! ```

mod config;
mod field;
mod graph;
mod options;
mod patch;
mod types;
mod warning;


pub use config::Config;
pub use field::{DefaultFn, Field, FieldContext, FieldOptions, NormalizeFn, ValidateFn};
pub use options::SchemaOptions;
pub use patch::{Patch, PatchOp};
pub use types::{TypeSet, TypeTag};
pub use warning::{Reporter, Warning, WarningKind};

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use strsim::levenshtein;
use tracing::{debug, trace, warn};

use crate::core::NormalizeError;
use graph::FieldGraph;

/// Maximum edit distance, as a percentage of the key length, for "did you mean" hints.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Collects field registrations and builds a [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
    options: SchemaOptions,
}

impl SchemaBuilder {
    /// An empty builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options every pass of the built schema uses unless overridden.
    pub fn options(&mut self, options: SchemaOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Register a field from a name, a type declaration and options.
    ///
    /// Fails when `types` does not resolve to a non-empty set of recognized tags.
    pub fn field(
        &mut self,
        name: &str,
        types: &str,
        options: FieldOptions,
    ) -> Result<&mut Self, NormalizeError> {
        let field = Field::with_options(name, types, options)?;
        Ok(self.register(field))
    }

    /// Add a field, or replace an existing field of the same name in place.
    pub fn register(&mut self, field: Field) -> &mut Self {
        match self.fields.iter_mut().find(|f| f.name() == field.name()) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Whether a field named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name() == name)
    }

    /// Validate dependencies and fix the processing order.
    pub fn build(&self) -> Result<Schema, NormalizeError> {
        let order = FieldGraph::build(&self.fields)?.order()?;
        let index = self.fields.iter().enumerate().map(|(i, f)| (f.name().to_string(), i)).collect();
        debug!(fields = self.fields.len(), "built schema");
        Ok(Schema {
            fields: self.fields.clone(),
            order,
            index,
            options: self.options.clone(),
        })
    }
}

/// The result of a normalization pass: the object plus its warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The normalized object, carrying the normalized marker
    pub config: Config,
    /// Warnings in the order they were recorded
    pub warnings: Vec<Warning>,
}

impl Normalized {
    /// Whether the pass recorded any warning.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Hand every warning to `reporter`, in order.
    pub fn report(&self, reporter: &mut impl Reporter) {
        for warning in &self.warnings {
            reporter.report(warning);
        }
    }

    /// Split into the object and its warnings.
    #[must_use]
    pub fn into_parts(self) -> (Config, Vec<Warning>) {
        (self.config, self.warnings)
    }

    /// The object as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.config.into_value()
    }
}

/// A built, immutable set of fields with a fixed processing order.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    order: Vec<usize>,
    index: HashMap<String, usize>,
    options: SchemaOptions,
}

impl Schema {
    /// Start registering fields.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Options used by [`normalize`](Self::normalize).
    #[must_use]
    pub const fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// The same fields with different options.
    #[must_use]
    pub fn with_options(&self, options: SchemaOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    /// Registered keys in processing order.
    pub fn processing_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&i| self.fields[i].name())
    }

    /// Normalize a JSON value. Non-object input is a hard error.
    pub fn normalize_value(&self, value: Value) -> Result<Normalized, NormalizeError> {
        self.normalize(Config::from_value(value)?)
    }

    /// Run a full normalization pass.
    ///
    /// A config that already carries the normalized marker is returned as is,
    /// with no warnings.
    pub fn normalize(&self, config: Config) -> Result<Normalized, NormalizeError> {
        if config.is_normalized() {
            trace!("config already normalized, skipping");
            return Ok(Normalized {
                config,
                warnings: Vec::new(),
            });
        }

        let mut pass = Pass::new(self, config.into_map());
        for &i in &self.order {
            pass.run_field(&self.fields[i])?;
        }
        pass.finish();

        let mut config = Config::from(pass.config);
        config.mark_normalized();
        debug!(warnings = pass.warnings.len(), "normalization pass complete");
        Ok(Normalized {
            config,
            warnings: pass.warnings,
        })
    }

    /// Normalize a single key of `config`, running its dependencies first.
    ///
    /// No pruning or ordering is applied. Returns the warnings recorded.
    pub fn update(&self, key: &str, config: &mut Config) -> Result<Vec<Warning>, NormalizeError> {
        let Some(&target) = self.index.get(key) else {
            return Ok(Vec::new());
        };

        let mut needed = BTreeSet::new();
        let mut stack = vec![target];
        while let Some(i) = stack.pop() {
            if needed.insert(i) {
                stack.extend(
                    self.fields[i].dependencies().iter().filter_map(|d| self.index.get(d).copied()),
                );
            }
        }

        let mut pass = Pass::new(self, std::mem::take(&mut **config));
        for &i in self.order.iter().filter(|i| needed.contains(i)) {
            pass.run_field(&self.fields[i])?;
        }
        **config = pass.config;
        Ok(pass.warnings)
    }

    fn suggest(&self, key: &str) -> Option<&str> {
        self.keys()
            .map(|name| (name, levenshtein(key, name)))
            .filter(|(_, dist)| *dist <= key.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .min_by_key(|(_, dist)| *dist)
            .map(|(name, _)| name)
    }
}

/// State of one pass over one object.
struct Pass<'a> {
    schema: &'a Schema,
    options: &'a SchemaOptions,
    config: Map<String, Value>,
    warnings: Vec<Warning>,
    omitted: Vec<String>,
}

impl<'a> Pass<'a> {
    fn new(schema: &'a Schema, config: Map<String, Value>) -> Self {
        Self {
            schema,
            options: &schema.options,
            config,
            warnings: Vec::new(),
            omitted: Vec::new(),
        }
    }

    fn warn(&mut self, warning: Warning) {
        if self.options.verbose {
            warn!("{warning}");
        } else {
            debug!("{warning}");
        }
        self.warnings.push(warning);
    }

    fn context<'b>(&'b self, key: &'b str) -> FieldContext<'b> {
        FieldContext {
            key,
            config: &self.config,
            options: self.options,
            schema: self.schema,
        }
    }

    fn run_field(&mut self, field: &Field) -> Result<(), NormalizeError> {
        let key = field.name();
        if !self.options.is_picked(key) {
            return Ok(());
        }

        let present = self.config.get(key).filter(|v| !v.is_null()).cloned();
        let value = match present {
            Some(value) => value,
            None => match self.default_for(field) {
                Some(default) => {
                    trace!(field = key, "applying default");
                    self.config.insert(key.to_string(), default.clone());
                    default
                }
                None => {
                    if self.config.get(key).is_some_and(Value::is_null)
                        && !field.types().contains(TypeTag::Null)
                    {
                        self.config.remove(key);
                    }
                    if field.is_required() || self.options.is_required(key) {
                        self.warn(Warning::new(WarningKind::Missing, key));
                    }
                    return Ok(());
                }
            },
        };

        if let Some(normalize) = field.normalizer() {
            trace!(field = key, "normalizing");
            let patch = normalize(&value, &self.context(key))?;
            let (ops, nested) = patch.into_parts(key);
            for warning in nested {
                self.warn(warning);
            }
            self.apply(ops);
        }

        self.revalidate(field);
        Ok(())
    }

    fn default_for(&self, field: &Field) -> Option<Value> {
        if !self.options.defaults {
            return None;
        }
        if let Some(default) = field.default_value() {
            return Some(default.clone());
        }
        let default_fn = field.default_fn()?;
        default_fn(&self.context(field.name())).filter(|v| !v.is_null())
    }

    fn apply(&mut self, ops: Vec<PatchOp>) {
        for op in ops {
            match op {
                PatchOp::Set {
                    key,
                    value,
                } => {
                    self.config.insert(key, value);
                }
                PatchOp::Remove {
                    key,
                } => {
                    self.config.shift_remove(&key);
                }
                PatchOp::Omit {
                    key,
                } => self.omitted.push(key),
            }
        }
    }

    fn revalidate(&mut self, field: &Field) {
        let key = field.name();
        let Some(value) = self.config.get(key) else {
            return;
        };

        if !field.types().accepts(value) {
            let message = format!("expected {}, found {}", field.types(), TypeTag::of(value));
            let value = self.config.shift_remove(key).unwrap_or(Value::Null);
            self.warn(Warning::new(WarningKind::InvalidType, key).with_message(message).with_value(value));
            return;
        }

        if let Some(validate) = field.validator() {
            let valid = validate(value, &self.context(key));
            if !valid {
                let value = self.config.shift_remove(key).unwrap_or(Value::Null);
                self.warn(
                    Warning::new(WarningKind::InvalidValue, key)
                        .with_message("rejected by validator")
                        .with_value(value),
                );
            }
        }
    }

    fn finish(&mut self) {
        if !self.options.pick.is_empty() {
            let options = self.options;
            self.config.retain(|k, _| options.is_picked(k));
        }

        if self.options.known_only {
            let unknown: Vec<String> = self
                .config
                .keys()
                .filter(|k| self.schema.field(k).is_none())
                .cloned()
                .collect();
            for key in unknown {
                let value = self.config.shift_remove(&key).unwrap_or(Value::Null);
                let mut warning = Warning::new(WarningKind::Unknown, key.as_str()).with_value(value);
                if let Some(similar) = self.schema.suggest(&key) {
                    warning = warning.with_message(format!("did you mean '{similar}'?"));
                }
                self.warn(warning);
            }
        }

        let omit: Vec<String> =
            self.omitted.drain(..).chain(self.options.omit.iter().cloned()).collect();
        for key in omit {
            self.config.shift_remove(&key);
        }

        if self.options.omit_empty {
            self.config.retain(|_, v| !is_empty(v));
        }

        self.config = self.sorted_keys();

        if self.options.sort_arrays {
            for value in self.config.values_mut() {
                sort_string_array(value);
            }
        }
    }

    fn sorted_keys(&mut self) -> Map<String, Value> {
        let mut source = std::mem::take(&mut self.config);
        let mut sorted = Map::with_capacity(source.len());
        let preferred = self.options.key_order.iter().map(String::as_str).chain(self.schema.keys());
        for key in preferred {
            if let Some(value) = source.shift_remove(key) {
                sorted.insert(key.to_string(), value);
            }
        }
        sorted.extend(source);
        sorted
    }
}

/// `null`, `""`, `[]` and `{}` count as empty.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Sort an array in place when every item is a string.
fn sort_string_array(value: &mut Value) {
    if let Value::Array(items) = value
        && items.iter().all(Value::is_string)
    {
        items.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    }
}
