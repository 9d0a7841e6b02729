//! Command-line token parser.
//!
//! Produces a JSON object the way `minimist`-style parsers do:
//!
//! | Input | Result |
//! |-------|--------|
//! | `--key=value`, `--key value` | `key: value` |
//! | `--key` (next token is a flag or absent) | `key: true` |
//! | `--no-key` | `key: false` |
//! | `-abc` | `a: true, b: true, c: true` |
//! | `-abc value` | `a: true, b: true, c: value` |
//! | `--a.b=1` | `a: {b: 1}` |
//! | anything else, and everything after `--` | pushed to `_` |
//!
//! Values that look like booleans or numbers are coerced. A string value of
//! the form `k:v,k2:v2` is expanded into an object unless its key is in the
//! escape-exempt list or the value contains `://`.

use serde_json::{Map, Number, Value};

/// Keys whose values are never expanded from `k:v` form.
pub const ESCAPE_EXEMPT: &[&str] = &["cwd", "file", "dest", "layout", "config-path", "templates"];

/// Keys placed first in the output, in this order.
pub const FIRST: &[&str] = &["init", "new", "ask", "emit", "cwd", "config", "file"];

/// Keys placed last in the output.
pub const LAST: &[&str] = &["tasks"];

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keys whose values are kept as plain strings
    pub escape_exempt: Vec<String>,
    /// Keys moved to the front of the output
    pub first: Vec<String>,
    /// Keys moved to the back of the output
    pub last: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        let owned = |keys: &[&str]| keys.iter().map(|k| (*k).to_string()).collect();
        Self {
            escape_exempt: owned(ESCAPE_EXEMPT),
            first: owned(FIRST),
            last: owned(LAST),
        }
    }
}

/// Parse already alias-rewritten tokens into an object.
#[must_use]
pub fn parse<S: AsRef<str>>(argv: &[S], options: &ParseOptions) -> Map<String, Value> {
    let mut parsed = Map::new();
    let mut positional = Vec::new();
    let tokens: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let next = tokens.get(i + 1).copied().filter(|n| !is_flag(n));

        if token == "--" {
            positional.extend(tokens[i + 1..].iter().map(|t| coerce(t)));
            break;
        }

        if let Some(body) = token.strip_prefix("--") {
            if let Some((key, value)) = body.split_once('=') {
                set(&mut parsed, key, value_for(key, value, options));
            } else if let Some(key) = body.strip_prefix("no-") {
                set(&mut parsed, key, Value::Bool(false));
            } else if let Some(value) = next {
                set(&mut parsed, body, value_for(body, value, options));
                i += 1;
            } else {
                set(&mut parsed, body, Value::Bool(true));
            }
        } else if is_flag(token) {
            let letters: Vec<char> = token[1..].chars().collect();
            let mut consumed_next = false;
            for (j, letter) in letters.iter().enumerate() {
                let key = letter.to_string();
                let rest: String = letters[j + 1..].iter().collect();
                if let Some(value) = rest.strip_prefix('=') {
                    set(&mut parsed, &key, value_for(&key, value, options));
                    break;
                }
                if !rest.is_empty() && !rest.starts_with(|c: char| c.is_alphabetic()) {
                    set(&mut parsed, &key, value_for(&key, &rest, options));
                    break;
                }
                if j + 1 < letters.len() {
                    set(&mut parsed, &key, Value::Bool(true));
                } else if let Some(value) = next {
                    set(&mut parsed, &key, value_for(&key, value, options));
                    consumed_next = true;
                } else {
                    set(&mut parsed, &key, Value::Bool(true));
                }
            }
            if consumed_next {
                i += 1;
            }
        } else {
            positional.push(coerce(token));
        }
        i += 1;
    }

    let mut out = Map::with_capacity(parsed.len() + 1);
    out.insert("_".to_string(), Value::Array(positional));
    order_keys(parsed, &mut out, options);
    out
}

/// Whether a token is a flag rather than a value. Negative numbers are values.
fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && parse_number(token).is_none()
}

fn order_keys(mut parsed: Map<String, Value>, out: &mut Map<String, Value>, options: &ParseOptions) {
    for key in &options.first {
        if let Some(value) = parsed.shift_remove(key) {
            out.insert(key.clone(), value);
        }
    }
    let last: Vec<(String, Value)> =
        options.last.iter().filter_map(|k| parsed.shift_remove(k).map(|v| (k.clone(), v))).collect();
    out.extend(parsed);
    out.extend(last);
}

fn value_for(key: &str, raw: &str, options: &ParseOptions) -> Value {
    let root = key.split('.').next().unwrap_or(key);
    if options.escape_exempt.iter().any(|k| k == root) || raw.contains("://") || !raw.contains(':') {
        return coerce(raw);
    }
    expand(raw)
}

/// `a:b,c:d,e` → `{a: "b", c: "d", e: true}`.
fn expand(raw: &str) -> Value {
    let mut obj = Map::new();
    for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match segment.split_once(':') {
            Some((k, v)) => insert_path(&mut obj, k, coerce(v)),
            None => insert_path(&mut obj, segment, Value::Bool(true)),
        }
    }
    Value::Object(obj)
}

/// Booleans and numbers become typed values, everything else stays a string.
#[must_use]
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => parse_number(raw).map_or_else(|| Value::String(raw.to_string()), Value::Number),
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let valid = !trimmed.is_empty()
        && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
        && trimmed.chars().filter(|c| *c == '.').count() <= 1
        && trimmed != ".";
    if !valid {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

fn set(map: &mut Map<String, Value>, key: &str, value: Value) {
    if key.contains('.') {
        insert_path(map, key, value);
        return;
    }
    match map.get_mut(key) {
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
        None => {
            map.insert(key.to_string(), value);
        }
    }
}

/// Insert along a dotted path, creating objects as needed and merging into
/// existing ones.
fn insert_path(map: &mut Map<String, Value>, path: &str, value: Value) {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) if !head.is_empty() && !rest.is_empty() => (head, rest),
        _ => {
            if let Value::Object(incoming) = &value
                && let Some(Value::Object(existing)) = map.get_mut(path)
            {
                existing.extend(incoming.clone());
            } else {
                map.insert(path.to_string(), value);
            }
            return;
        }
    };
    let entry = map.entry(head.to_string()).or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_path(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(argv: &[&str]) -> Value {
        Value::Object(parse(argv, &ParseOptions::default()))
    }

    #[test]
    fn test_long_forms() {
        assert_eq!(
            run(&["--name=foo", "--verbose", "--no-color", "--count", "3"]),
            json!({"_": [], "name": "foo", "verbose": true, "color": false, "count": 3})
        );
    }

    #[test]
    fn test_short_groups() {
        assert_eq!(run(&["-abc", "val"]), json!({"_": [], "a": true, "b": true, "c": "val"}));
        assert_eq!(run(&["-n5"]), json!({"_": [], "n": 5}));
        assert_eq!(run(&["-x", "-y"]), json!({"_": [], "x": true, "y": true}));
    }

    #[test]
    fn test_positional_and_terminator() {
        assert_eq!(
            run(&["build", "--flag", "--", "--not-a-flag", "2"]),
            json!({"_": ["build", "--not-a-flag", 2], "flag": true})
        );
        assert_eq!(run(&["--offset", "-1"]), json!({"_": [], "offset": -1}));
    }

    #[test]
    fn test_key_value_expansion() {
        assert_eq!(run(&["--data=a:b,c:1,d"])["data"], json!({"a": "b", "c": 1, "d": true}));
        assert_eq!(run(&["--cwd=C:/work"])["cwd"], json!("C:/work"));
        assert_eq!(run(&["--homepage", "https://x.io"])["homepage"], json!("https://x.io"));
    }

    #[test]
    fn test_dotted_keys_merge() {
        assert_eq!(run(&["--option.a=1", "--option.b", "x"])["option"], json!({"a": 1, "b": "x"}));
    }

    #[test]
    fn test_repeated_flags_collect() {
        assert_eq!(run(&["--plugin", "a", "--plugin", "b"])["plugin"], json!(["a", "b"]));
    }

    #[test]
    fn test_key_order() {
        let parsed = parse(&["--tasks", "x", "--zeta", "--file", "f", "--init"], &ParseOptions::default());
        let keys: Vec<_> = parsed.keys().cloned().collect();
        assert_eq!(keys, vec!["_", "init", "file", "zeta", "tasks"]);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("1.5"), json!(1.5));
        assert_eq!(coerce("1.2.3"), json!("1.2.3"));
        assert_eq!(coerce("-"), json!("-"));
    }
}
