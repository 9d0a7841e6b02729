//! `tasks`: tasks to run, in order.

use serde_json::Value;

use super::{strings, to_ordered_list};
use crate::core::NormalizeError;
use crate::schema::{Field, Patch};

/// `tasks`.
///
/// - `true` sets `run: true` and removes `tasks`
/// - `false` removes `tasks`
/// - a string or array becomes a de-duplicated list in run order
pub fn tasks() -> Result<Field, NormalizeError> {
    Ok(Field::new("tasks", "boolean|string|array")?.normalize(|value, ctx| match value {
        Value::Bool(true) => Ok(Patch::remove().and_set("run", Value::Bool(true))),
        Value::Bool(false) => Ok(Patch::remove()),
        Value::String(_) | Value::Array(_) => Ok(Patch::set(strings(to_ordered_list(value)))),
        _ => Err(ctx.type_error("boolean, string or array", value)),
    }))
}
