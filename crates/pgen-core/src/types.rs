use std::fmt;

use serde::{Deserialize, Serialize};

/// Column kinds understood by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum DataType {
    Integer,
    Bigint,
    Varchar,
    Bool,
    Time,
    Timestamptz,
    Serial,
    Jsonb,
    Text,
    Double,
    /// Reference to a declared enumeration, by name.
    Enum(String),
}

/// How a `default` attribute is accepted for a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// `default` may not be supplied at all.
    Forbidden,
    /// Integer literal within the given inclusive range.
    Integer { min: i64, max: i64 },
    /// Any numeric literal.
    Float,
    Bool,
    /// Any string literal, rendered quoted.
    Text,
    /// Only the literal `now`, stored as [`DefaultValue::CurrentTimestamp`].
    Now,
    /// One of the labels of the referenced enumeration.
    EnumLabel,
}

/// Per-type attribute legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub default: DefaultRule,
    pub size: bool,
    pub primary_key: bool,
}

impl DataType {
    /// Map a built-in schema token (e.g. `i32`) to its data type.
    ///
    /// Enumeration references are not resolved here; see
    /// [`TypeRegistry`](crate::TypeRegistry).
    pub fn from_token(token: &str) -> Option<Self> {
        let data_type = match token {
            "i32" => DataType::Integer,
            "i64" => DataType::Bigint,
            "str" => DataType::Varchar,
            "bool" => DataType::Bool,
            "t" => DataType::Time,
            "tsz" => DataType::Timestamptz,
            "double" => DataType::Double,
            "text" => DataType::Text,
            "serial" => DataType::Serial,
            "jsonb" => DataType::Jsonb,
            _ => return None,
        };
        Some(data_type)
    }

    /// Name of the type in emitted DDL.
    pub fn sql_name(&self) -> &str {
        match self {
            DataType::Integer => "integer",
            DataType::Bigint => "bigint",
            DataType::Varchar => "varchar",
            DataType::Bool => "bool",
            DataType::Time => "time",
            DataType::Timestamptz => "timestamptz",
            DataType::Serial => "serial",
            DataType::Jsonb => "jsonb",
            DataType::Text => "text",
            DataType::Double => "float8",
            DataType::Enum(name) => name,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        let default = match self {
            DataType::Integer => DefaultRule::Integer {
                min: i64::from(i32::MIN),
                max: i64::from(i32::MAX),
            },
            DataType::Bigint => DefaultRule::Integer {
                min: i64::MIN,
                max: i64::MAX,
            },
            DataType::Double => DefaultRule::Float,
            DataType::Bool => DefaultRule::Bool,
            DataType::Varchar | DataType::Text => DefaultRule::Text,
            DataType::Timestamptz => DefaultRule::Now,
            DataType::Enum(_) => DefaultRule::EnumLabel,
            DataType::Time | DataType::Serial | DataType::Jsonb => DefaultRule::Forbidden,
        };

        Capabilities {
            default,
            size: matches!(self, DataType::Varchar),
            primary_key: matches!(
                self,
                DataType::Integer | DataType::Bigint | DataType::Serial
            ),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

/// A validated column default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    EnumLabel(String),
    /// The database's current timestamp at insert time.
    CurrentTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_map_to_sql_names() {
        let cases = [
            ("i32", "integer"),
            ("i64", "bigint"),
            ("str", "varchar"),
            ("bool", "bool"),
            ("t", "time"),
            ("tsz", "timestamptz"),
            ("double", "float8"),
            ("text", "text"),
            ("serial", "serial"),
            ("jsonb", "jsonb"),
        ];
        for (token, sql) in cases {
            let data_type = DataType::from_token(token).expect("built-in token");
            assert_eq!(data_type.sql_name(), sql, "token {token}");
        }
        assert!(DataType::from_token("uuid").is_none());
    }

    #[test]
    fn only_integer_family_can_be_primary_key() {
        let pk: Vec<_> = ["i32", "i64", "str", "bool", "t", "tsz", "double", "text", "serial", "jsonb"]
            .into_iter()
            .filter_map(DataType::from_token)
            .filter(|data_type| data_type.capabilities().primary_key)
            .collect();
        assert_eq!(pk, vec![DataType::Integer, DataType::Bigint, DataType::Serial]);
        assert!(!DataType::Enum("status".to_string()).capabilities().primary_key);
    }

    #[test]
    fn size_is_varchar_only() {
        assert!(DataType::Varchar.capabilities().size);
        assert!(!DataType::Text.capabilities().size);
        assert!(!DataType::Enum("status".to_string()).capabilities().size);
    }

    #[test]
    fn integer_default_range_follows_column_width() {
        match DataType::Integer.capabilities().default {
            DefaultRule::Integer { min, max } => {
                assert_eq!(min, i64::from(i32::MIN));
                assert_eq!(max, i64::from(i32::MAX));
            }
            other => panic!("unexpected rule {other:?}"),
        }
        assert_eq!(DataType::Jsonb.capabilities().default, DefaultRule::Forbidden);
        assert_eq!(DataType::Timestamptz.capabilities().default, DefaultRule::Now);
    }
}
