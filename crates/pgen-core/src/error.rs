use thiserror::Error;

/// Schema compilation error shared across pgen crates.
///
/// Every variant names the offending entry, table, enumeration or field so the
/// message alone is enough to locate the problem in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A document entry has the wrong shape or is missing its `type` discriminator.
    #[error("{entry}: {reason}")]
    Structural { entry: String, reason: String },
    /// A type token matches neither a built-in type nor a declared enumeration.
    #[error("{field}: invalid data type: {token}")]
    UnresolvedType { field: String, token: String },
    /// A required attribute is absent or empty.
    #[error("{entity}: {reason}")]
    MissingAttribute { entity: String, reason: String },
    /// An attribute was applied to a data type that does not support it.
    #[error("{field}: {reason}")]
    IncompatibleAttribute { field: String, reason: String },
    /// An attribute value has the wrong shape or is out of range.
    #[error("{entity}: {reason}")]
    InvalidValue { entity: String, reason: String },
    /// Two attributes of the same field contradict each other.
    #[error("{field}: {reason}")]
    Conflict { field: String, reason: String },
    /// An attribute key is not recognised.
    #[error("{entity}: invalid attribute: {attribute}")]
    UnknownAttribute { entity: String, attribute: String },
    /// A table declares the same field name twice.
    #[error("{table}: duplicate field name: {field}")]
    DuplicateField { table: String, field: String },
    /// An index lists a column that is not a field of its table.
    #[error("{table}: index column not found: {column}")]
    UnknownIndexColumn { table: String, column: String },
}

impl Error {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Structural { .. } => "structural",
            Error::UnresolvedType { .. } => "unresolved_type",
            Error::MissingAttribute { .. } => "missing_attribute",
            Error::IncompatibleAttribute { .. } => "incompatible_attribute",
            Error::InvalidValue { .. } => "invalid_value",
            Error::Conflict { .. } => "conflict",
            Error::UnknownAttribute { .. } => "unknown_attribute",
            Error::DuplicateField { .. } => "duplicate_field",
            Error::UnknownIndexColumn { .. } => "unknown_index_column",
        }
    }

    /// A `varchar` field declared without a size.
    pub fn missing_size(field: &str) -> Self {
        Error::Conflict {
            field: field.to_string(),
            reason: "should have size. if size is not a consideration, 'text' should be used"
                .to_string(),
        }
    }
}

/// Convenience alias for results returned by pgen crates.
pub type Result<T> = std::result::Result<T, Error>;
