use pgen_core::{DataType, DefaultRule, DefaultValue, Error, Field, Result, TypeRegistry};
use serde_yaml::Value;

use crate::attrs::{describe, expect_bool, invalid, key_str, optional_string};

/// Build one column from its spec.
///
/// The spec is a mapping whose first entry is `<name>: <type token>`; the
/// remaining entries are attributes checked against the resolved type.
pub fn build_field(spec: &Value, table: &str, registry: &TypeRegistry) -> Result<Field> {
    let mapping = spec.as_mapping().ok_or_else(|| Error::Structural {
        entry: table.to_string(),
        reason: format!("field spec must be a mapping, found '{}'", describe(spec)),
    })?;

    let mut entries = mapping.iter();
    let Some((name, token)) = entries.next() else {
        return Err(Error::Structural {
            entry: table.to_string(),
            reason: "field spec must start with '<name>: <type>'".to_string(),
        });
    };

    let name = key_str(name, table)?;
    if name.is_empty() {
        return Err(Error::Structural {
            entry: table.to_string(),
            reason: "field name must not be empty".to_string(),
        });
    }

    let data_type = token
        .as_str()
        .and_then(|token| registry.resolve(token))
        .ok_or_else(|| Error::UnresolvedType {
            field: name.to_string(),
            token: describe(token),
        })?;
    let capabilities = data_type.capabilities();

    let mut field = Field {
        name: name.to_string(),
        data_type,
        comment: None,
        nullable: false,
        default: None,
        size: None,
        primary_key: false,
    };

    for (key, value) in entries {
        match key_str(key, name)? {
            "default" => {
                let default =
                    default_value(name, &field.data_type, capabilities.default, value, registry)?;
                field.default = Some(default);
            }
            "size" => {
                if !capabilities.size {
                    return Err(incompatible(name, &field.data_type, "size"));
                }
                field.size = Some(parse_size(name, value)?);
            }
            "comment" => field.comment = optional_string(value, name, "comment")?,
            "nullable" => field.nullable = expect_bool(value, name, "nullable")?,
            "pk" => {
                if !capabilities.primary_key {
                    return Err(Error::IncompatibleAttribute {
                        field: name.to_string(),
                        reason: "primary key must be integer, bigint, serial".to_string(),
                    });
                }
                field.primary_key = expect_bool(value, name, "pk")?;
            }
            other => {
                return Err(Error::UnknownAttribute {
                    entity: name.to_string(),
                    attribute: other.to_string(),
                });
            }
        }
    }

    if capabilities.size && field.size.is_none() {
        return Err(Error::missing_size(&field.name));
    }

    if field.primary_key && field.nullable {
        return Err(Error::Conflict {
            field: field.name,
            reason: "primary key can not be nullable".to_string(),
        });
    }

    Ok(field)
}

fn default_value(
    field: &str,
    data_type: &DataType,
    rule: DefaultRule,
    value: &Value,
    registry: &TypeRegistry,
) -> Result<DefaultValue> {
    let rejected = || invalid(field, format!("invalid default value '{}'", describe(value)));

    match rule {
        DefaultRule::Forbidden => Err(incompatible(field, data_type, "default")),
        DefaultRule::Integer { min, max } => value
            .as_i64()
            .filter(|number| (min..=max).contains(number))
            .map(DefaultValue::Integer)
            .ok_or_else(rejected),
        DefaultRule::Float => value
            .as_f64()
            .filter(|number| number.is_finite())
            .map(DefaultValue::Float)
            .ok_or_else(rejected),
        DefaultRule::Bool => value.as_bool().map(DefaultValue::Bool).ok_or_else(rejected),
        DefaultRule::Text => value
            .as_str()
            .map(|text| DefaultValue::Text(text.to_string()))
            .ok_or_else(rejected),
        DefaultRule::Now => match value.as_str() {
            Some("now") => Ok(DefaultValue::CurrentTimestamp),
            _ => Err(rejected()),
        },
        DefaultRule::EnumLabel => match value.as_str() {
            Some(label) if registry.has_label(data_type.sql_name(), label) => {
                Ok(DefaultValue::EnumLabel(label.to_string()))
            }
            _ => Err(rejected()),
        },
    }
}

fn parse_size(field: &str, value: &Value) -> Result<u32> {
    value
        .as_u64()
        .filter(|size| *size > 0)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(|| invalid(field, "'size' must be a positive integer".to_string()))
}

fn incompatible(field: &str, data_type: &DataType, attribute: &str) -> Error {
    Error::IncompatibleAttribute {
        field: field.to_string(),
        reason: format!("data type '{data_type}' can not have '{attribute}' attribute"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_overflow_is_rejected() {
        let value: Value = serde_yaml::from_str("4294967296").expect("yaml");
        assert!(parse_size("name", &value).is_err());
        let value: Value = serde_yaml::from_str("255").expect("yaml");
        assert_eq!(parse_size("name", &value).unwrap(), 255);
    }

    #[test]
    fn non_finite_float_defaults_are_rejected() {
        let registry = TypeRegistry::new();
        let value: Value = serde_yaml::from_str(".nan").expect("yaml");
        let err = default_value(
            "ratio",
            &DataType::Double,
            DefaultRule::Float,
            &value,
            &registry,
        )
        .unwrap_err();
        assert_eq!(err.code(), "invalid_value");
    }
}
