//! Flag-object fields: `data`, `option`, `options`, `toc`, `enable`, `disable`.

use serde_json::{Map, Value};

use super::{to_list, toggle};
use crate::core::NormalizeError;
use crate::schema::{Field, FieldContext, Patch};

const TOGGLE_TYPES: &str = "boolean|string|array|object";

fn toggle_field(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, TOGGLE_TYPES)?.normalize(|value, ctx| toggle(ctx.key, value).map(Patch::set)))
}

/// `data`: data passed to templates.
pub fn data() -> Result<Field, NormalizeError> {
    toggle_field("data")
}

/// `option`: option flags.
pub fn option() -> Result<Field, NormalizeError> {
    toggle_field("option")
}

/// `options`: alias of `option` kept under its own key.
pub fn options() -> Result<Field, NormalizeError> {
    toggle_field("options")
}

/// `toc`: table of contents settings.
pub fn toc() -> Result<Field, NormalizeError> {
    toggle_field("toc")
}

/// `enable`: names to switch on in `option`. The key itself is removed.
pub fn enable() -> Result<Field, NormalizeError> {
    Ok(Field::new("enable", "string|array")?
        .depends_on(["option"])
        .normalize(|value, ctx| switch(value, ctx, true)))
}

/// `disable`: names to switch off in `option`. The key itself is removed.
///
/// Runs after `enable`, so a name in both ends up off.
pub fn disable() -> Result<Field, NormalizeError> {
    Ok(Field::new("disable", "string|array")?
        .depends_on(["option", "enable"])
        .normalize(|value, ctx| switch(value, ctx, false)))
}

fn switch(value: &Value, ctx: &FieldContext<'_>, on: bool) -> Result<Patch, NormalizeError> {
    let mut option = match ctx.get("option") {
        Some(Value::Object(option)) => option.clone(),
        Some(other) => match toggle("option", other)? {
            Value::Object(option) => option,
            _ => Map::new(),
        },
        None => Map::new(),
    };
    for name in to_list(value) {
        option.insert(name, Value::Bool(on));
    }
    Ok(Patch::remove().and_set("option", Value::Object(option)))
}
