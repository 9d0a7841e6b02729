//! People fields: `author`, `contributors`, `maintainers`.
//!
//! npm accepts both `"Name <email> (url)"` strings and `{name, email, url}`
//! objects. [`Person`] reads either and writes the string form back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A person as written in a package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Homepage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Person {
    /// Parse `"Name <email> (url)"`. Every part is optional.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut person = Self::default();
        let mut rest = input.trim().to_string();

        if let Some((start, end)) = delimited(&rest, '<', '>') {
            person.email = non_empty(&rest[start + 1..end]);
            rest.replace_range(start..=end, "");
        }
        if let Some((start, end)) = delimited(&rest, '(', ')') {
            person.url = non_empty(&rest[start + 1..end]);
            rest.replace_range(start..=end, "");
        }
        person.name = non_empty(&rest);
        person
    }

    /// Read a person from a string or an object. Empty parts are dropped.
    ///
    /// Objects may spell `url` as `web` and `email` as `mail`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let person = match value {
            Value::String(s) => Self::parse(s),
            Value::Object(obj) => Self {
                name: string_field(obj, &["name"]),
                email: string_field(obj, &["email", "mail"]),
                url: string_field(obj, &["url", "web"]),
            },
            _ => return None,
        };
        (!person.is_empty()).then_some(person)
    }

    /// Whether no part is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.url.is_none()
    }

    /// GitHub username taken from a GitHub `url`.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        if !super::is_github_url(url) {
            return None;
        }
        let (_, after) = url.split_once("://")?;
        after.split('/').nth(1).filter(|s| !s.is_empty()).map(str::to_string)
    }

    /// The string form as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        if let Some(email) = &self.email {
            parts.push(format!("<{email}>"));
        }
        if let Some(url) = &self.url {
            parts.push(format!("({url})"));
        }
        write!(f, "{}", parts.join(" "))
    }
}

fn delimited(s: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = s.find(open)?;
    let end = start + s[start..].find(close)?;
    Some((start, end))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_str)).and_then(non_empty)
}
