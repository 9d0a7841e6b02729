//! Schema for command-line configuration.

use serde_json::{Map, Value};

use crate::core::NormalizeError;
use crate::fields::{config, list_value, paths, pluralize_keys, related, tasks, toggle};
use crate::schema::{Field, Patch, Schema, SchemaBuilder};

/// Rename singular keys to plural, at the top level and one level into `config`.
pub fn pluralize(map: &mut Map<String, Value>) {
    pluralize_keys(map);
    if let Some(Value::Object(nested)) = map.get_mut("config") {
        pluralize_keys(nested);
    }
}

fn flag(name: &str) -> Result<Field, NormalizeError> {
    Field::new(name, "boolean")
}

fn command(name: &str) -> Result<Field, NormalizeError> {
    Field::new(name, "boolean|string")
}

/// Builder with every command-line field registered, in output order.
pub fn cli_schema_builder() -> Result<SchemaBuilder, NormalizeError> {
    let mut builder = Schema::builder();
    for field in [
        command("init")?,
        command("new")?,
        Field::new("ask", "boolean|string|array|object")?,
        Field::new("emit", "boolean|string|array")?.normalize(|value, _ctx| {
            Ok(match value {
                Value::Bool(_) => Patch::keep(),
                _ => Patch::set(list_value(value)),
            })
        }),
        paths::cwd()?,
        config::config()?.depends_on(["cwd"]),
        paths::file()?.depends_on(["cwd"]),
        paths::layout()?.depends_on(["cwd"]),
        toggle::data()?,
        toggle::option()?,
        toggle::options()?,
        toggle::toc()?,
        toggle::enable()?,
        toggle::disable()?,
        related::related()?,
        related::reflinks()?,
        paths::helpers()?.depends_on(["cwd"]),
        paths::async_helpers()?.depends_on(["cwd"]),
        paths::plugins()?.depends_on(["cwd"]),
        paths::engines()?.depends_on(["cwd"]),
        command("help")?,
        flag("version")?,
        flag("verbose")?,
        flag("run")?,
        tasks::tasks()?.depends_on(["cwd"]).with_default_fn(|ctx| {
            ctx.get("_").filter(|positional| positional.as_array().is_some_and(|a| !a.is_empty())).cloned()
        }),
    ] {
        builder.register(field);
    }
    Ok(builder)
}

/// The command-line schema.
pub fn cli_schema() -> Result<Schema, NormalizeError> {
    cli_schema_builder()?.build()
}
