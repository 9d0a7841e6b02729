//! `author`, `authors`, `contributors`, `maintainers`.

use serde_json::Value;

use crate::core::NormalizeError;
use crate::repo::Person;
use crate::schema::{Field, Patch};

/// `author`: a person, written back as `Name <email> (url)`.
///
/// A value that holds no name, email or URL is removed.
pub fn author() -> Result<Field, NormalizeError> {
    Ok(Field::new("author", "string|object")?.normalize(|value, _ctx| {
        Ok(Person::from_value(value).map_or_else(Patch::remove, |person| Patch::set(person.to_value())))
    }))
}

fn people(name: &str) -> Result<Field, NormalizeError> {
    Ok(Field::new(name, "array|string|object")?.normalize(|value, _ctx| {
        let items: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        let mut list: Vec<Value> = Vec::with_capacity(items.len());
        for person in items.into_iter().filter_map(Person::from_value) {
            let value = person.to_value();
            if !list.contains(&value) {
                list.push(value);
            }
        }
        Ok(Patch::set(Value::Array(list)))
    }))
}

/// `authors`.
pub fn authors() -> Result<Field, NormalizeError> {
    people("authors")
}

/// `contributors`.
pub fn contributors() -> Result<Field, NormalizeError> {
    people("contributors")
}

/// `maintainers`.
pub fn maintainers() -> Result<Field, NormalizeError> {
    people("maintainers")
}
