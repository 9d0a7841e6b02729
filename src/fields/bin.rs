//! `bin` and `preferGlobal`.
//!
//! When `bin` is absent it is filled from the project layout: every file in
//! `bin/`, keyed by file stem, or `cli.js` keyed by the package name. With
//! neither present the key stays absent and `preferGlobal` is dropped.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::trace;
use walkdir::WalkDir;

use super::{strings, to_list};
use crate::core::NormalizeError;
use crate::schema::{Field, FieldContext, Patch};

/// `bin`: command name → script path.
///
/// Every script path is added to `files` when the manifest has a `files` list.
pub fn bin() -> Result<Field, NormalizeError> {
    Ok(Field::new("bin", "string|object")?.with_default_fn(detect_bin).normalize(normalize_bin))
}

/// `preferGlobal`: removed when there is no `bin`.
pub fn prefer_global() -> Result<Field, NormalizeError> {
    Ok(Field::new("preferGlobal", "boolean")?.normalize(|_, ctx| {
        Ok(if ctx.get("bin").is_some() {
            Patch::keep()
        } else {
            Patch::remove()
        })
    }))
}

fn command_name(ctx: &FieldContext<'_>) -> String {
    ctx.get_str("name")
        .map(str::to_string)
        .or_else(|| ctx.cwd().file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "cli".to_string())
}

fn detect_bin(ctx: &FieldContext<'_>) -> Option<Value> {
    let cwd = ctx.cwd();
    let scripts = bin_dir_entries(&cwd.join("bin"));
    if !scripts.is_empty() {
        trace!("bin/ has {} entries", scripts.len());
        return Some(Value::Object(scripts));
    }
    if cwd.join("cli.js").is_file() {
        let mut bin = Map::new();
        bin.insert(command_name(ctx), Value::String("cli.js".to_string()));
        return Some(Value::Object(bin));
    }
    None
}

fn bin_dir_entries(dir: &Path) -> Map<String, Value> {
    let mut scripts = Map::new();
    if !dir.is_dir() {
        return scripts;
    }
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let file = entry.file_name().to_string_lossy();
        scripts.insert(stem, Value::String(format!("bin/{file}")));
    }
    scripts
}

fn normalize_bin(value: &Value, ctx: &FieldContext<'_>) -> Result<Patch, NormalizeError> {
    let bin = match value {
        Value::String(path) => {
            let mut bin = Map::new();
            bin.insert(command_name(ctx), Value::String(path.clone()));
            bin
        }
        Value::Object(obj) => obj.clone(),
        _ => return Ok(Patch::keep()),
    };

    let mut patch = Patch::set(Value::Object(bin.clone()));
    if let Some(files) = ctx.get("files") {
        let mut list = to_list(files);
        list.extend(bin.values().filter_map(Value::as_str).map(str::to_string));
        list.sort();
        list.dedup();
        patch = patch.and_set("files", strings(list));
    }
    Ok(patch)
}
