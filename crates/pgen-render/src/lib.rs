//! DDL rendering for compiled schemas.
//!
//! Output is a pure function of the [`Metadata`]: enumerations first, then
//! tables, each in declaration order. Enumerations without values and tables
//! without fields produce no statements.

mod ddl;

use std::io;

use pgen_core::{GENERATED_HEADER, Metadata};

use crate::ddl::{DdlWriter, write_enumeration, write_table};

/// Render the whole schema as PostgreSQL DDL.
pub fn render(metadata: &Metadata) -> String {
    let mut out = DdlWriter::default();
    out.line(GENERATED_HEADER);
    out.blank();

    out.line("-- Enums");
    out.blank();
    let enums = metadata.enums.iter().filter(|item| !item.values.is_empty());
    for (position, enumeration) in enums.enumerate() {
        if position > 0 {
            out.blank();
        }
        write_enumeration(&mut out, enumeration);
    }

    out.blank();
    out.line("-- Tables");
    out.blank();
    let tables = metadata.tables.iter().filter(|item| !item.fields.is_empty());
    for (position, table) in tables.enumerate() {
        if position > 0 {
            out.blank();
        }
        write_table(&mut out, table);
    }

    let text = out.finish();
    tracing::debug!(
        event = "render_finished",
        enums = metadata.enums.len(),
        tables = metadata.tables.len(),
        bytes = text.len()
    );
    text
}

/// Render the schema and write it to `writer` in one call.
pub fn render_to<W: io::Write>(metadata: &Metadata, mut writer: W) -> io::Result<()> {
    writer.write_all(render(metadata).as_bytes())?;
    writer.flush()
}
