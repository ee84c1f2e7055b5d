//! Builders turning one document entry into a validated domain entity.

mod enumeration;
mod field;
mod table;

pub use enumeration::build_enumeration;
pub use field::build_field;
pub use table::build_table;
