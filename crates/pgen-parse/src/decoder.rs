use pgen_core::{Error, Metadata, Result, TypeRegistry};
use serde_yaml::{Mapping, Value};

use crate::attrs::{describe, key_str};
use crate::builders::{build_enumeration, build_table};
use crate::options::DecodeOptions;

/// What a top-level document entry declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Enum,
    Table,
}

/// A classified top-level entry, not yet built.
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub kind: DeclarationKind,
    /// All attributes of the entry, starting with `type`.
    pub attributes: &'a Mapping,
}

/// Classify every top-level entry of a document, in declaration order.
///
/// Entries without attributes are skipped. Entries whose `type` is neither
/// `enum` nor `table` are skipped with a warning.
pub fn scan(document: &Value) -> Result<Vec<Declaration<'_>>> {
    let entries = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(entries) => entries,
        other => {
            return Err(Error::Structural {
                entry: "document".to_string(),
                reason: format!("top level must be a mapping, found '{}'", describe(other)),
            });
        }
    };

    let mut declarations = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let name = key_str(key, "document")?;
        if name.is_empty() {
            return Err(Error::Structural {
                entry: "document".to_string(),
                reason: "declaration name must not be empty".to_string(),
            });
        }

        let attributes = match value {
            Value::Null => continue,
            Value::Mapping(attributes) => attributes,
            other => {
                return Err(Error::Structural {
                    entry: name.to_string(),
                    reason: format!("declaration must be a mapping, found '{}'", describe(other)),
                });
            }
        };

        let Some((first_key, first_value)) = attributes.iter().next() else {
            continue;
        };

        if first_key.as_str() != Some("type") {
            return Err(Error::Structural {
                entry: name.to_string(),
                reason: "the first attribute must be 'type'".to_string(),
            });
        }

        let kind = match first_value.as_str() {
            Some("enum") => DeclarationKind::Enum,
            Some("table") => DeclarationKind::Table,
            Some(other) => {
                tracing::warn!(event = "declaration_skipped", entry = %name, kind = %other);
                continue;
            }
            None => {
                return Err(Error::Structural {
                    entry: name.to_string(),
                    reason: format!("'type' must be a string, found '{}'", describe(first_value)),
                });
            }
        };

        declarations.push(Declaration {
            name,
            kind,
            attributes,
        });
    }

    Ok(declarations)
}

/// Decode a parsed document into [`Metadata`].
///
/// Every enumeration is built before any table, so tables may reference
/// enumerations declared later in the document.
pub fn decode(document: &Value, opts: &DecodeOptions) -> Result<Metadata> {
    let declarations = scan(document)?;
    resolve(&declarations, opts)
}

/// Build declarations in two phases: enumerations, then tables.
pub fn resolve(declarations: &[Declaration<'_>], opts: &DecodeOptions) -> Result<Metadata> {
    let mut registry = TypeRegistry::new();
    let mut metadata = Metadata::default();

    for declaration in of_kind(declarations, DeclarationKind::Enum) {
        let enumeration = build_enumeration(declaration.name, declaration.attributes, opts)?;
        tracing::debug!(
            event = "enum_built",
            name = %enumeration.name,
            values = enumeration.values.len()
        );
        registry.register(&enumeration);
        metadata.enums.push(enumeration);
    }

    for declaration in of_kind(declarations, DeclarationKind::Table) {
        let table = build_table(declaration.name, declaration.attributes, &registry, opts)?;
        tracing::debug!(
            event = "table_built",
            name = %table.name,
            db = %table.db,
            fields = table.fields.len()
        );
        metadata.tables.push(table);
    }

    Ok(metadata)
}

fn of_kind<'d, 'a>(
    declarations: &'d [Declaration<'a>],
    kind: DeclarationKind,
) -> impl Iterator<Item = &'d Declaration<'a>> {
    declarations
        .iter()
        .filter(move |declaration| declaration.kind == kind)
}
