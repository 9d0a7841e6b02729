//! Core package manifest fields.

use serde_json::{Map, Value};

use super::{config, list_value, strings, to_list};
use crate::core::NormalizeError;
use crate::schema::{Field, FieldContext, Patch};

/// Version used when a manifest has none.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// `name`: defaults to the working directory's name.
pub fn name() -> Result<Field, NormalizeError> {
    Ok(Field::new("name", "string")?.with_default_fn(|ctx| {
        ctx.cwd().file_name().map(|n| Value::String(n.to_string_lossy().into_owned()))
    }))
}

/// `version`: must be a valid semantic version.
pub fn version() -> Result<Field, NormalizeError> {
    Ok(Field::new("version", "string")?
        .with_default(Value::String(DEFAULT_VERSION.to_string()))
        .normalize(|value, _ctx| {
            Ok(value
                .as_str()
                .map(|v| {
                    let v = v.trim();
                    Value::String(v.strip_prefix('v').unwrap_or(v).to_string())
                })
                .into())
        })
        .validate(|value, _ctx| value.as_str().is_some_and(|v| semver::Version::parse(v).is_ok())))
}

/// `description`.
pub fn description() -> Result<Field, NormalizeError> {
    Ok(Field::new("description", "string")?
        .normalize(|value, _ctx| Ok(value.as_str().map(|d| Value::String(d.trim().to_string())).into())))
}

/// `license`: an SPDX expression; `{type}` objects are reduced to the type.
pub fn license() -> Result<Field, NormalizeError> {
    Ok(Field::new("license", "string|object")?.normalize(|value, _ctx| {
        Ok(match value.get("type") {
            Some(Value::String(kind)) => Patch::set(Value::String(kind.clone())),
            _ => Patch::keep(),
        })
    }))
}

/// `licenses`: the deprecated array form. Collapsed into `license` when that
/// is absent, then removed.
pub fn licenses() -> Result<Field, NormalizeError> {
    Ok(Field::new("licenses", "array|object|string")?.normalize(|value, ctx| {
        let mut patch = Patch::remove();
        if ctx.get("license").is_none() {
            let first = match value {
                Value::Array(items) => items.first(),
                other => Some(other),
            };
            let kind = first.and_then(|l| l.get("type").unwrap_or(l).as_str());
            if let Some(kind) = kind {
                patch = patch.and_set("license", Value::String(kind.to_string()));
            }
        }
        Ok(patch)
    }))
}

fn add_to_files(ctx: &FieldContext<'_>, patch: Patch, paths: &[&str]) -> Patch {
    let Some(files) = ctx.get("files") else {
        return patch;
    };
    let mut list = to_list(files);
    list.extend(paths.iter().map(|p| (*p).to_string()));
    list.sort();
    list.dedup();
    patch.and_set("files", strings(list))
}

/// `main`: entry point; a leading `./` is dropped and the path is added to `files`.
pub fn main() -> Result<Field, NormalizeError> {
    Ok(Field::new("main", "string")?.normalize(|value, ctx| {
        let Some(main) = value.as_str() else {
            return Ok(Patch::keep());
        };
        let main = main.trim_start_matches("./");
        Ok(add_to_files(ctx, Patch::set(Value::String(main.to_string())), &[main]))
    }))
}

/// `files`: sorted, de-duplicated list.
pub fn files() -> Result<Field, NormalizeError> {
    Ok(Field::new("files", "array|string")?.normalize(|value, _ctx| Ok(Patch::set(list_value(value)))))
}

/// `keywords`: sorted, de-duplicated list. Defaults to the words of `name`.
pub fn keywords() -> Result<Field, NormalizeError> {
    Ok(Field::new("keywords", "array|string")?
        .with_default_fn(|ctx| {
            let words: Vec<&str> =
                ctx.get_str("name")?.split(['-', '_', '.', '/', '@']).filter(|w| !w.is_empty()).collect();
            (!words.is_empty()).then(|| strings(words))
        })
        .normalize(|value, _ctx| Ok(Patch::set(list_value(value)))))
}

/// `engines`: a bare string is taken as the `node` range.
pub fn engines() -> Result<Field, NormalizeError> {
    Ok(Field::new("engines", "object|string")?.normalize(|value, _ctx| {
        Ok(match value {
            Value::String(range) => {
                let mut engines = Map::new();
                engines.insert("node".to_string(), Value::String(range.clone()));
                Patch::set(Value::Object(engines))
            }
            _ => Patch::keep(),
        })
    }))
}

/// `scripts`.
pub fn scripts() -> Result<Field, NormalizeError> {
    Field::new("scripts", "object")
}

fn dependency_map(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, "object")?.normalize(|value, _ctx| {
        let Some(deps) = value.as_object() else {
            return Ok(Patch::keep());
        };
        let mut sorted: Vec<(&String, &Value)> = deps.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        Ok(Patch::set(Value::Object(
            sorted.into_iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        )))
    }))
}

/// `dependencies`: sorted by name.
pub fn dependencies() -> Result<Field, NormalizeError> {
    dependency_map("dependencies")
}

/// `devDependencies`: sorted by name.
pub fn dev_dependencies() -> Result<Field, NormalizeError> {
    dependency_map("devDependencies")
}

/// `peerDependencies`: sorted by name.
pub fn peer_dependencies() -> Result<Field, NormalizeError> {
    dependency_map("peerDependencies")
}

/// `private`: `"true"`/`"false"` strings become booleans.
pub fn private() -> Result<Field, NormalizeError> {
    Ok(Field::new("private", "boolean")?.normalize(|value, _ctx| {
        Ok(match value.as_str() {
            Some("true") => Patch::set(Value::Bool(true)),
            Some("false") => Patch::set(Value::Bool(false)),
            _ => Patch::keep(),
        })
    }))
}

/// `verb`: nested configuration for documentation tooling.
pub fn verb() -> Result<Field, NormalizeError> {
    config::nested("verb")
}
