//! `related` and `reflinks`: lists of project names.
//!
//! `true` shows the section with whatever list a template picks, a name or
//! list of names becomes `{list: [...]}`.

use serde_json::{Map, Value};

use super::{list_value, to_list};
use crate::core::NormalizeError;
use crate::schema::{Field, FieldContext, Patch};

/// `related`: related projects.
pub fn related() -> Result<Field, NormalizeError> {
    list_toggle("related")
}

/// `reflinks`: reference links.
pub fn reflinks() -> Result<Field, NormalizeError> {
    list_toggle("reflinks")
}

fn list_toggle(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, "boolean|string|array|object")?.normalize(normalize_list_toggle))
}

fn normalize_list_toggle(value: &Value, ctx: &FieldContext<'_>) -> Result<Patch, NormalizeError> {
    let mut out = Map::new();
    match value {
        Value::Bool(show) => {
            out.insert("show".to_string(), Value::Bool(*show));
        }
        Value::String(_) | Value::Array(_) => {
            out.insert("list".to_string(), super::strings(to_list(value)));
        }
        Value::Object(obj) => {
            out = obj.clone();
            if let Some(list) = obj.get("list") {
                out.insert("list".to_string(), list_value(list));
            }
        }
        Value::Null | Value::Number(_) => {
            return Err(ctx.type_error("boolean, string, array or object", value));
        }
    }
    Ok(Patch::set(Value::Object(out)))
}
