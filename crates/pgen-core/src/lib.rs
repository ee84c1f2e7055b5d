//! Core contracts for pgen.
//!
//! This crate defines the compiled schema model, the closed set of column data
//! types with their attribute capabilities, the type registry used to resolve
//! enumeration references, and the error taxonomy shared by the parser, the
//! renderer and the CLI.

pub mod error;
pub mod model;
pub mod registry;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use model::{Enumeration, Field, Index, Metadata, Table};
pub use registry::TypeRegistry;
pub use types::{Capabilities, DataType, DefaultRule, DefaultValue};
pub use validation::{validate_metadata, validate_table};

/// Header line written at the top of every generated file.
pub const GENERATED_HEADER: &str = "-- Auto generated by pgen, DO NOT MODIFY.";
