use pgen_core::{DataType, DefaultValue, Enumeration, Field, Index, Table};

/// Line-oriented text buffer for generated DDL.
#[derive(Debug, Default)]
pub(crate) struct DdlWriter {
    buf: String,
}

impl DdlWriter {
    pub(crate) fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

pub(crate) fn write_enumeration(out: &mut DdlWriter, enumeration: &Enumeration) {
    let values = enumeration
        .values
        .iter()
        .map(|value| quote(value))
        .collect::<Vec<_>>()
        .join(", ");
    out.line(&format!(
        "create type {} as enum({values});",
        enumeration.name
    ));

    if let Some(comment) = non_empty(&enumeration.comment) {
        out.line(&format!(
            "comment on type {} is {};",
            enumeration.name,
            quote(comment)
        ));
    }
}

pub(crate) fn write_table(out: &mut DdlWriter, table: &Table) {
    out.line(&format!("create table if not exists {} (", table.name));
    let last = table.fields.len().saturating_sub(1);
    for (position, field) in table.fields.iter().enumerate() {
        let separator = if position < last { "," } else { "" };
        out.line(&format!("{}{separator}", column_clause(field)));
    }
    out.line(");");

    for index in &table.uniques {
        out.line(&index_statement(&table.name, index, true));
    }
    for index in &table.indexes {
        out.line(&index_statement(&table.name, index, false));
    }

    if let Some(comment) = non_empty(&table.comment) {
        out.line(&format!(
            "comment on table {} is {};",
            table.name,
            quote(comment)
        ));
    }

    for field in &table.fields {
        if let Some(comment) = non_empty(&field.comment) {
            out.line(&format!(
                "comment on column {}.{} is {};",
                table.name,
                field.name,
                quote(comment)
            ));
        }
    }
}

/// One column definition, indented, without the trailing separator.
pub(crate) fn column_clause(field: &Field) -> String {
    let mut clause = format!("  {} {}", field.name, field.data_type.sql_name());

    if field.data_type == DataType::Varchar {
        if let Some(size) = field.size {
            clause.push_str(&format!("({size})"));
        }
    }

    if let Some(default) = &field.default {
        clause.push_str(" default ");
        clause.push_str(&default_literal(default));
    }

    if !field.nullable && !field.primary_key {
        clause.push_str(" not null");
    }

    if field.primary_key {
        clause.push_str(" primary key");
    }

    clause
}

pub(crate) fn default_literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Integer(number) => number.to_string(),
        DefaultValue::Float(number) => number.to_string(),
        DefaultValue::Bool(flag) => flag.to_string(),
        DefaultValue::Text(text) | DefaultValue::EnumLabel(text) => quote(text),
        DefaultValue::CurrentTimestamp => "current_timestamp".to_string(),
    }
}

fn index_statement(table: &str, index: &Index, unique: bool) -> String {
    let (kind, suffix) = if unique {
        ("unique index", "key")
    } else {
        ("index", "idx")
    };
    format!(
        "create {kind} {table}_{}_{suffix} on {table} ({});",
        index.columns.join("_"),
        index.columns.join(", ")
    )
}

/// Single-quoted SQL string literal.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.is_empty())
}
