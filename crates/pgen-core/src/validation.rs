use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::model::{Metadata, Table};
use crate::types::DataType;

/// Validate internal consistency of a compiled schema.
///
/// This checks:
/// - duplicate enumeration/table/field names
/// - enumerations have at least one value
/// - enum-typed fields reference a declared enumeration
/// - primary keys are not nullable and `varchar` fields carry a positive size
pub fn validate_metadata(metadata: &Metadata) -> Result<()> {
    let mut enums = BTreeSet::new();
    for enumeration in &metadata.enums {
        if !enums.insert(enumeration.name.as_str()) {
            return Err(Error::Structural {
                entry: enumeration.name.clone(),
                reason: "duplicate enumeration name".to_string(),
            });
        }
        if enumeration.values.is_empty() {
            return Err(Error::MissingAttribute {
                entity: enumeration.name.clone(),
                reason: "enum must have at least one value".to_string(),
            });
        }
    }

    let mut tables = BTreeSet::new();
    for table in &metadata.tables {
        if !tables.insert(table.name.as_str()) {
            return Err(Error::Structural {
                entry: table.name.clone(),
                reason: "duplicate table name".to_string(),
            });
        }

        validate_table(table, false)?;

        for field in &table.fields {
            if let DataType::Enum(name) = &field.data_type {
                if !enums.contains(name.as_str()) {
                    return Err(Error::UnresolvedType {
                        field: field.name.clone(),
                        token: name.clone(),
                    });
                }
            }
            if field.primary_key && field.nullable {
                return Err(Error::Conflict {
                    field: field.name.clone(),
                    reason: "primary key can not be nullable".to_string(),
                });
            }
            if field.data_type == DataType::Varchar && !field.size.is_some_and(|size| size > 0) {
                return Err(Error::missing_size(&field.name));
            }
        }
    }

    Ok(())
}

/// Validate table-local invariants.
///
/// Field names must be unique. When `check_index_columns` is set, every unique
/// and secondary index column must name a field of the table.
pub fn validate_table(table: &Table, check_index_columns: bool) -> Result<()> {
    if table.db.is_empty() {
        return Err(Error::MissingAttribute {
            entity: table.name.clone(),
            reason: "db should be provided".to_string(),
        });
    }

    let mut columns = BTreeSet::new();
    for field in &table.fields {
        if !columns.insert(field.name.as_str()) {
            return Err(Error::DuplicateField {
                table: table.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    if check_index_columns {
        for index in table.uniques.iter().chain(&table.indexes) {
            for column in &index.columns {
                if !columns.contains(column.as_str()) {
                    return Err(Error::UnknownIndexColumn {
                        table: table.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Enumeration, Field, Index};

    fn field(name: &str, data_type: DataType) -> Field {
        Field {
            name: name.to_string(),
            data_type,
            comment: None,
            nullable: false,
            default: None,
            size: None,
            primary_key: false,
        }
    }

    fn table(fields: Vec<Field>) -> Table {
        Table {
            name: "users".to_string(),
            db: "main".to_string(),
            comment: None,
            fields,
            uniques: Vec::new(),
            indexes: Vec::new(),
        }
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let users = table(vec![
            field("id", DataType::Integer),
            field("id", DataType::Bigint),
        ]);
        let err = validate_table(&users, false).expect_err("duplicate field");
        assert_eq!(err.to_string(), "users: duplicate field name: id");
    }

    #[test]
    fn index_columns_are_checked_on_request() {
        let mut users = table(vec![field("id", DataType::Integer)]);
        users.uniques.push(Index::new(vec!["email".to_string()]));

        assert!(validate_table(&users, false).is_ok());
        let err = validate_table(&users, true).expect_err("unknown column");
        assert!(matches!(err, Error::UnknownIndexColumn { ref column, .. } if column == "email"));
    }

    #[test]
    fn metadata_rejects_dangling_enum_reference() {
        let metadata = Metadata {
            enums: Vec::new(),
            tables: vec![table(vec![field("state", DataType::Enum("status".to_string()))])],
        };
        let err = validate_metadata(&metadata).expect_err("dangling enum");
        assert_eq!(err.code(), "unresolved_type");
    }

    #[test]
    fn metadata_rejects_nullable_primary_key_and_unsized_varchar() {
        let mut id = field("id", DataType::Serial);
        id.primary_key = true;
        id.nullable = true;
        let metadata = Metadata {
            enums: Vec::new(),
            tables: vec![table(vec![id])],
        };
        assert_eq!(validate_metadata(&metadata).unwrap_err().code(), "conflict");

        let metadata = Metadata {
            enums: Vec::new(),
            tables: vec![table(vec![field("name", DataType::Varchar)])],
        };
        assert_eq!(validate_metadata(&metadata).unwrap_err().code(), "conflict");
    }

    #[test]
    fn accepts_consistent_metadata() {
        let mut name = field("name", DataType::Varchar);
        name.size = Some(64);
        let metadata = Metadata {
            enums: vec![Enumeration {
                name: "status".to_string(),
                comment: None,
                values: vec!["active".to_string()],
            }],
            tables: vec![table(vec![
                name,
                field("state", DataType::Enum("status".to_string())),
            ])],
        };
        assert!(validate_metadata(&metadata).is_ok());
    }
}
