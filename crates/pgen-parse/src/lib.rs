//! Schema document decoding.
//!
//! Turns a YAML schema document into a validated [`Metadata`]: entries are
//! classified into declarations, enumerations are built and registered, then
//! tables are built against the registered types.

mod attrs;
pub mod builders;
pub mod decoder;
pub mod error;
pub mod options;

pub use decoder::{Declaration, DeclarationKind, decode, resolve, scan};
pub use error::DecodeError;
pub use options::DecodeOptions;

pub use pgen_core::Metadata;

/// Parse and decode a YAML schema document with default options.
pub fn parse_str(source: &str) -> Result<Metadata, DecodeError> {
    parse_str_with_options(source, &DecodeOptions::default())
}

/// Parse and decode a YAML schema document with caller-provided options.
pub fn parse_str_with_options(source: &str, opts: &DecodeOptions) -> Result<Metadata, DecodeError> {
    let document: serde_yaml::Value = serde_yaml::from_str(source)?;
    let metadata = decode(&document, opts)?;
    Ok(metadata)
}
