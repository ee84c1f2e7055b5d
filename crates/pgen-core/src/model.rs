use serde::{Deserialize, Serialize};

use crate::types::{DataType, DefaultValue};

/// Everything declared in one schema document.
///
/// Enumerations and tables keep their declaration order, which is also the
/// order they are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub enums: Vec<Enumeration>,
    pub tables: Vec<Table>,
}

impl Metadata {
    pub fn enumeration(&self, name: &str) -> Option<&Enumeration> {
        self.enums.iter().find(|item| item.name == name)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|item| item.name == name)
    }
}

/// A named, ordered set of string labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    pub name: String,
    pub comment: Option<String>,
    pub values: Vec<String>,
}

/// A relation owned by a database (`db`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub db: String,
    pub comment: Option<String>,
    pub fields: Vec<Field>,
    pub uniques: Vec<Index>,
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Column metadata for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub comment: Option<String>,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    /// Length of a `varchar` column; always set and positive for that type.
    pub size: Option<u32>,
    pub primary_key: bool,
}

/// Ordered list of column names backing a unique or secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    pub columns: Vec<String>,
}

impl Index {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}
