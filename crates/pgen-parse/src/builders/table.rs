use pgen_core::{Error, Field, Index, Result, Table, TypeRegistry, validate_table};
use serde_yaml::{Mapping, Value};

use super::field::build_field;
use crate::attrs::{invalid, key_str, optional_string, string_list};
use crate::options::DecodeOptions;

/// Build a table from a declaration whose first attribute is `type: table`.
///
/// Fields are built in declaration order. The `db` check runs after every
/// attribute has been consumed, so field errors are reported first.
pub fn build_table(
    name: &str,
    attributes: &Mapping,
    registry: &TypeRegistry,
    opts: &DecodeOptions,
) -> Result<Table> {
    let mut table = Table {
        name: name.to_string(),
        db: String::new(),
        comment: None,
        fields: Vec::new(),
        uniques: Vec::new(),
        indexes: Vec::new(),
    };

    for (key, value) in attributes.iter().skip(1) {
        match key_str(key, name)? {
            "db" => table.db = optional_string(value, name, "db")?.unwrap_or_default(),
            "comment" => table.comment = optional_string(value, name, "comment")?,
            "fields" => table.fields = build_fields(name, value, registry)?,
            "uniques" => table.uniques = build_indexes(name, "uniques", value)?,
            "indexes" => table.indexes = build_indexes(name, "indexes", value)?,
            other if opts.strict => {
                return Err(Error::UnknownAttribute {
                    entity: name.to_string(),
                    attribute: other.to_string(),
                });
            }
            other => {
                tracing::debug!(event = "attribute_ignored", entity = %name, attribute = %other);
            }
        }
    }

    validate_table(&table, opts.strict)?;

    Ok(table)
}

fn build_fields(table: &str, value: &Value, registry: &TypeRegistry) -> Result<Vec<Field>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(specs) => specs
            .iter()
            .map(|spec| build_field(spec, table, registry))
            .collect(),
        _ => Err(invalid(table, "'fields' must be a sequence".to_string())),
    }
}

fn build_indexes(table: &str, attribute: &str, value: &Value) -> Result<Vec<Index>> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        _ => {
            return Err(invalid(
                table,
                format!("'{attribute}' must be a sequence of column lists"),
            ));
        }
    };

    let mut indexes = Vec::with_capacity(items.len());
    for item in items {
        let columns = string_list(item, table, attribute)?;
        if columns.is_empty() {
            return Err(invalid(
                table,
                format!("'{attribute}' entries must list at least one column"),
            ));
        }
        indexes.push(Index::new(columns));
    }

    Ok(indexes)
}
