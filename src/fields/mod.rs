//! Domain field normalizers.
//!
//! Each submodule builds [`Field`](crate::schema::Field) registrations for a
//! group of related keys. The helpers in this module are the coercion
//! policies shared across those fields:
//!
//! - [`toggle()`]: `true` → `{show: true}`, `"x"` → `{x: true}`
//! - [`to_list`]: comma-split, flatten, dedupe, sort
//! - [`resolve_path`]: `~` expansion and resolution against a working directory
//!
//! Field constructors return `Result` because type declarations are parsed;
//! the declarations here are all valid, so in practice they never fail.

pub mod bin;
pub mod config;
pub mod package;
pub mod paths;
pub mod people;
pub mod related;
pub mod repository;
pub mod tasks;
pub mod toggle;

use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{MAIN_SEPARATOR, Path};

use crate::core::NormalizeError;

/// Singular keys renamed to their plural forms.
pub const PLURALS: &[(&str, &str)] = &[
    ("helper", "helpers"),
    ("asyncHelper", "asyncHelpers"),
    ("plugin", "plugins"),
    ("engine", "engines"),
    ("task", "tasks"),
];

/// Expand a toggle shorthand into an object of flags.
///
/// # Errors
///
/// [`NormalizeError::FieldType`] for numbers, `null`, or arrays holding
/// anything other than strings.
pub fn toggle(key: &str, value: &Value) -> Result<Value, NormalizeError> {
    const EXPECTED: &str = "boolean, string, array of strings or object";
    let mut flags = Map::new();
    match value {
        Value::Bool(show) => {
            flags.insert("show".to_string(), Value::Bool(*show));
        }
        Value::String(name) => {
            flags.insert(name.clone(), Value::Bool(true));
        }
        Value::Object(_) => return Ok(value.clone()),
        Value::Array(items) => {
            for item in items {
                let Some(name) = item.as_str() else {
                    return Err(NormalizeError::field_type(key, EXPECTED, item));
                };
                flags.insert(name.to_string(), Value::Bool(true));
            }
        }
        Value::Null | Value::Number(_) => {
            return Err(NormalizeError::field_type(key, EXPECTED, value));
        }
    }
    Ok(Value::Object(flags))
}

/// Flatten a list-like value into unique, sorted strings.
///
/// Strings are split on commas and trimmed; nested arrays are flattened;
/// numbers and booleans are stringified; objects and empty items are dropped.
#[must_use]
pub fn to_list(value: &Value) -> Vec<String> {
    let mut items = BTreeSet::new();
    collect_items(value, &mut |item| {
        items.insert(item);
    });
    items.into_iter().collect()
}

/// Like [`to_list`] but keeps first-seen order.
#[must_use]
pub fn to_ordered_list(value: &Value) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    collect_items(value, &mut |item| {
        if !items.contains(&item) {
            items.push(item);
        }
    });
    items
}

fn collect_items(value: &Value, push: &mut impl FnMut(String)) {
    match value {
        Value::String(s) => {
            s.split(',').map(str::trim).filter(|s| !s.is_empty()).for_each(|s| push(s.to_string()));
        }
        Value::Array(items) => items.iter().for_each(|item| collect_items(item, push)),
        Value::Number(n) => push(n.to_string()),
        Value::Bool(b) => push(b.to_string()),
        Value::Null | Value::Object(_) => {}
    }
}

/// [`to_list`] as a JSON array; values that are not list-like are returned as is.
#[must_use]
pub fn list_value(value: &Value) -> Value {
    match value {
        Value::String(_) | Value::Array(_) => strings(to_list(value)),
        _ => value.clone(),
    }
}

/// A JSON array of strings.
#[must_use]
pub fn strings<I, S>(items: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(items.into_iter().map(|s| Value::String(s.into())).collect())
}

/// Resolve a path-like value against `cwd`.
///
/// `~` is expanded first. The joined path is used when it exists or when the
/// value contains a path separator; a bare name that does not exist under
/// `cwd` (a module name, say) is returned unchanged.
#[must_use]
pub fn resolve_path(cwd: &Path, value: &str) -> String {
    let expanded = shellexpand::tilde(value);
    let path = Path::new(expanded.as_ref());
    if path.is_absolute() {
        return expanded.into_owned();
    }
    let joined = cwd.join(path);
    if joined.exists() || value.contains('/') || value.contains(MAIN_SEPARATOR) {
        return joined.to_string_lossy().into_owned();
    }
    value.to_string()
}

/// Rename singular keys to plural in place, merging into existing plural values.
///
/// `{helper: "a", helpers: ["b"]}` becomes `{helpers: ["b", "a"]}`.
pub fn pluralize_keys(map: &mut Map<String, Value>) {
    for (singular, plural) in PLURALS {
        let Some(value) = map.shift_remove(*singular) else {
            continue;
        };
        let merged = match map.shift_remove(*plural) {
            None => value,
            Some(Value::Array(mut existing)) => {
                match value {
                    Value::Array(items) => existing.extend(items),
                    other => existing.push(other),
                }
                Value::Array(existing)
            }
            Some(Value::Object(mut existing)) if value.is_object() => {
                if let Value::Object(items) = value {
                    existing.extend(items);
                }
                Value::Object(existing)
            }
            Some(existing) => Value::Array(vec![existing, value]),
        };
        map.insert((*plural).to_string(), merged);
    }
}
