//! Short flag aliases.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::trace;

/// Long key → short alias.
pub const ALIASES: &[(&str, &str)] = &[
    ("version", "V"),
    ("verbose", "v"),
    ("help", "h"),
    ("config", "c"),
    ("cwd", "C"),
    ("data", "d"),
    ("emit", "e"),
    ("file", "f"),
    ("init", "i"),
    ("option", "o"),
    ("related", "r"),
    ("tasks", "t"),
    ("layout", "l"),
    ("toc", "T"),
];

/// One compiled pattern per alias: `-<alias>` followed by the end of the
/// token or a non-word character.
static PATTERNS: LazyLock<Vec<(Regex, &'static str, &'static str)>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .filter_map(|&(long, short)| {
            let pattern = format!(r"^-{}(?:$|\W)", regex::escape(short));
            Regex::new(&pattern).ok().map(|re| (re, long, short))
        })
        .collect()
});

/// Short alias of a long key.
#[must_use]
pub fn alias_for(long: &str) -> Option<&'static str> {
    ALIASES.iter().find(|(l, _)| *l == long).map(|(_, s)| *s)
}

/// Long key of a short alias.
#[must_use]
pub fn long_for(short: &str) -> Option<&'static str> {
    ALIASES.iter().find(|(_, s)| *s == short).map(|(l, _)| *l)
}

/// Rewrite one token; the first matching alias wins.
#[must_use]
pub fn rewrite_token(token: &str) -> String {
    for (re, long, short) in PATTERNS.iter() {
        if re.is_match(token) {
            let rest = &token[1 + short.len()..];
            trace!("rewriting -{short} to --{long}");
            return format!("--{long}{rest}");
        }
    }
    token.to_string()
}

/// Rewrite every short alias flag in `argv` to its long form.
///
/// `-V` becomes `--version` and `-d=x` becomes `--data=x`, but `-verbose` is
/// left alone because `v` is followed by a word character.
#[must_use]
pub fn rewrite_aliases<S: AsRef<str>>(argv: &[S]) -> Vec<String> {
    argv.iter().map(|token| rewrite_token(token.as_ref())).collect()
}

/// Copy every long key that has an alias onto the alias as well.
pub fn mirror_aliases(map: &mut Map<String, Value>) {
    for (long, short) in ALIASES {
        if let Some(value) = map.get(*long).cloned() {
            map.insert((*short).to_string(), value);
        }
    }
}
