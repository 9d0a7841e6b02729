//! Nested configuration objects: `config` on the command line, `verb` in a
//! package manifest.
//!
//! A nested object gets the same treatment as the top level for the keys a
//! nested config usually holds: flag objects, related lists and module lists.
//! Singular keys are renamed to plural first. Paths inside resolve against
//! the `cwd` key when it is set, like the top-level path fields.

use serde_json::Value;

use super::{paths, pluralize_keys, related, toggle};
use crate::core::NormalizeError;
use crate::schema::{Config, Field, FieldContext, Patch, Schema, SchemaOptions};

/// The schema applied inside a nested config object.
pub fn nested_schema() -> Result<Schema, NormalizeError> {
    let mut builder = Schema::builder();
    for field in [
        toggle::data()?,
        toggle::option()?,
        toggle::options()?,
        toggle::toc()?,
        related::related()?,
        related::reflinks()?,
        paths::helpers()?,
        paths::async_helpers()?,
        paths::plugins()?,
        paths::engines()?,
        paths::layout()?,
    ] {
        builder.register(field);
    }
    builder.build()
}

/// A nested config field named `name`.
pub fn nested(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, "boolean|string|object")?.normalize(normalize_nested))
}

/// `config`.
pub fn config() -> Result<Field, NormalizeError> {
    nested("config")
}

fn normalize_nested(value: &Value, ctx: &FieldContext<'_>) -> Result<Patch, NormalizeError> {
    let obj = match value {
        Value::Bool(_) | Value::String(_) => return toggle(ctx.key, value).map(Patch::set),
        Value::Object(obj) => obj,
        _ => return Err(ctx.type_error("boolean, string or object", value)),
    };

    let mut map = obj.clone();
    pluralize_keys(&mut map);

    let options = SchemaOptions {
        cwd: Some(paths::base_dir(ctx)),
        verbose: ctx.options.verbose,
        ..SchemaOptions::default()
    };
    let result = nested_schema()?.with_options(options).normalize(Config::from(map))?;
    let warnings = result.warnings.into_iter().map(|mut warning| {
        warning.prop = format!("{}.{}", ctx.key, warning.prop);
        warning
    });
    Ok(Patch::set(result.config.into_value()).and_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::WarningKind;
    use serde_json::json;

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        builder.register(config().unwrap());
        builder.build().unwrap()
    }

    #[test]
    fn test_shorthands() {
        let result = schema().normalize_value(json!({"config": true})).unwrap();
        assert_eq!(result.config["config"], json!({"show": true}));

        let result = schema().normalize_value(json!({"config": "x"})).unwrap();
        assert_eq!(result.config["config"], json!({"x": true}));
    }

    #[test]
    fn test_nested_object_is_normalized() {
        let result = schema()
            .normalize_value(json!({"config": {
                "plugin": "gulp-format-md",
                "related": "b,a",
                "toc": true,
                "layout": "default",
            }}))
            .unwrap();
        let nested = &result.config["config"];
        assert_eq!(nested["plugins"], json!(["gulp-format-md"]));
        assert_eq!(nested["related"], json!({"list": ["a", "b"]}));
        assert_eq!(nested["toc"], json!({"show": true}));
        assert_eq!(nested["layout"], json!("default"));
        assert!(nested.get("plugin").is_none());
    }

    #[test]
    fn test_nested_warnings_are_prefixed() {
        let result = schema().normalize_value(json!({"config": {"layout": 3}})).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::InvalidType);
        assert_eq!(result.warnings[0].prop, "config.layout");
    }

    #[test]
    fn test_nested_paths_follow_cwd_key() {
        let project = tempfile::TempDir::new().unwrap();
        let elsewhere = tempfile::TempDir::new().unwrap();
        std::fs::write(project.path().join("h.js"), "").unwrap();
        let dir = project.path().to_string_lossy().into_owned();

        let mut builder = Schema::builder();
        builder.register(paths::cwd().unwrap()).register(config().unwrap().depends_on(["cwd"]));
        let result = builder
            .build()
            .unwrap()
            .with_options(SchemaOptions::new().with_cwd(elsewhere.path()))
            .normalize_value(json!({"cwd": dir, "config": {"helper": "h.js"}}))
            .unwrap();

        let expected = project.path().join("h.js").to_string_lossy().into_owned();
        assert_eq!(result.config["config"]["helpers"], json!([expected]));
    }
}
