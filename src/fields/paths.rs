//! Path-like fields: `cwd`, `file`, `layout`, and the module lists `helpers`,
//! `asyncHelpers`, `plugins`, `engines`.
//!
//! Paths resolve against the `cwd` key when it has been set, otherwise
//! against the working directory of the pass.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::{resolve_path, strings, to_list};
use crate::core::NormalizeError;
use crate::schema::{Field, FieldContext, Patch};

pub(crate) fn base_dir(ctx: &FieldContext<'_>) -> PathBuf {
    ctx.get_str("cwd").map_or_else(|| ctx.cwd(), PathBuf::from)
}

/// `cwd`: absolute working directory; defaults to the pass's working directory.
pub fn cwd() -> Result<Field, NormalizeError> {
    Ok(Field::new("cwd", "string")?
        .with_default_fn(|ctx| Some(Value::String(ctx.cwd().to_string_lossy().into_owned())))
        .normalize(|value, ctx| {
            let Some(dir) = value.as_str() else {
                return Ok(Patch::keep());
            };
            let expanded = shellexpand::tilde(dir);
            let path = Path::new(expanded.as_ref());
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else {
                ctx.cwd().join(path)
            };
            Ok(Patch::set(Value::String(absolute.to_string_lossy().into_owned())))
        }))
}

fn path_field(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, "string")?.normalize(|value, ctx| {
        Ok(value
            .as_str()
            .map(|s| Value::String(resolve_path(&base_dir(ctx), s)))
            .into())
    }))
}

/// `file`: a single input file.
pub fn file() -> Result<Field, NormalizeError> {
    path_field("file")
}

/// `layout`: a layout name or path.
pub fn layout() -> Result<Field, NormalizeError> {
    path_field("layout")
}

/// A list of modules given by name or path.
///
/// A string or array becomes a sorted list of resolved entries. An object maps
/// names to module paths and only its values are resolved.
fn module_list(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, "string|array|object")?.normalize(|value, ctx| {
        let base = base_dir(ctx);
        match value {
            Value::Object(obj) => {
                let resolved: Map<String, Value> = obj
                    .iter()
                    .map(|(k, v)| {
                        let v = v.as_str().map_or_else(|| v.clone(), |s| Value::String(resolve_path(&base, s)));
                        (k.clone(), v)
                    })
                    .collect();
                Ok(Patch::set(Value::Object(resolved)))
            }
            Value::String(_) | Value::Array(_) => {
                let mut items: Vec<String> =
                    to_list(value).iter().map(|item| resolve_path(&base, item)).collect();
                items.sort();
                items.dedup();
                Ok(Patch::set(strings(items)))
            }
            _ => Err(ctx.type_error("string, array or object", value)),
        }
    }))
}

/// `helpers`: template helper modules.
pub fn helpers() -> Result<Field, NormalizeError> {
    module_list("helpers")
}

/// `asyncHelpers`: async template helper modules.
pub fn async_helpers() -> Result<Field, NormalizeError> {
    module_list("asyncHelpers")
}

/// `plugins`: plugin modules.
pub fn plugins() -> Result<Field, NormalizeError> {
    module_list("plugins")
}

/// `engines`: template engine modules.
pub fn engines() -> Result<Field, NormalizeError> {
    module_list("engines")
}
