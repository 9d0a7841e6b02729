//! `repository`, `homepage` and `bugs`.
//!
//! `repository` is reduced to `owner/name`. When absent it is read from the
//! `origin` remote of the git repository in the working directory.
//! `homepage` and `bugs` default to URLs derived from it.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::core::NormalizeError;
use crate::repo;
use crate::schema::{Field, FieldContext, Patch, Warning, WarningKind};

/// `repository`.
pub fn repository() -> Result<Field, NormalizeError> {
    Ok(Field::new("repository", "string|object")?
        .with_default_fn(|ctx| {
            let url = repo::remote_origin_url(&ctx.cwd())?;
            debug!("repository from git remote: {url}");
            repo::parse_url(&url).ok().map(|parsed| Value::String(parsed.repository()))
        })
        .normalize(normalize_repository))
}

fn normalize_repository(value: &Value, ctx: &FieldContext<'_>) -> Result<Patch, NormalizeError> {
    let Some(url) = repo::repository_string(value) else {
        return Ok(Patch::keep());
    };
    match repo::parse_url(url) {
        Ok(parsed) => Ok(Patch::set(Value::String(parsed.repository()))),
        Err(e) => Ok(Patch::keep().and_warnings([Warning::new(WarningKind::InvalidValue, ctx.key)
            .with_message(e.to_string())
            .with_value(value.clone())])),
    }
}

fn derived(ctx: &FieldContext<'_>, build: fn(&str) -> Result<String, NormalizeError>) -> Option<String> {
    let repository = ctx.get("repository").and_then(repo::repository_string)?;
    build(repository).ok()
}

/// `homepage`: defaults to the repository's web URL.
pub fn homepage() -> Result<Field, NormalizeError> {
    Ok(Field::new("homepage", "string")?
        .with_default_fn(|ctx| derived(ctx, repo::homepage).map(Value::String)))
}

/// `bugs`: `{url}`; a bare string is taken as the URL. Defaults to the
/// repository's issue tracker.
pub fn bugs() -> Result<Field, NormalizeError> {
    Ok(Field::new("bugs", "string|object")?
        .with_default_fn(|ctx| derived(ctx, repo::bugs).map(|url| json!({ "url": url })))
        .normalize(|value, _ctx| {
            Ok(match value {
                Value::String(url) => {
                    let mut bugs = Map::new();
                    bugs.insert("url".to_string(), Value::String(url.clone()));
                    Patch::set(Value::Object(bugs))
                }
                _ => Patch::keep(),
            })
        }))
}
