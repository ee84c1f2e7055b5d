//! Shape checks for raw YAML attribute values.

use pgen_core::{Error, Result};
use serde_yaml::Value;

pub fn key_str<'a>(key: &'a Value, entity: &str) -> Result<&'a str> {
    key.as_str().ok_or_else(|| Error::Structural {
        entry: entity.to_string(),
        reason: format!("attribute keys must be strings, found '{}'", describe(key)),
    })
}

pub fn optional_string(value: &Value, entity: &str, attribute: &str) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        _ => Err(invalid(entity, format!("'{attribute}' must be a string"))),
    }
}

pub fn expect_bool(value: &Value, entity: &str, attribute: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| invalid(entity, format!("'{attribute}' must be a boolean")))
}

/// Decode a sequence of strings; null decodes to an empty list.
pub fn string_list(value: &Value, entity: &str, attribute: &str) -> Result<Vec<String>> {
    let message = || invalid(entity, format!("'{attribute}' must be a sequence of strings"));
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(message))
            .collect(),
        _ => Err(message()),
    }
}

/// Short rendering of a value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Sequence(_) => "<sequence>".to_string(),
        Value::Mapping(_) => "<mapping>".to_string(),
        Value::Tagged(_) => "<tagged>".to_string(),
    }
}

pub fn invalid(entity: &str, reason: String) -> Error {
    Error::InvalidValue {
        entity: entity.to_string(),
        reason,
    }
}
