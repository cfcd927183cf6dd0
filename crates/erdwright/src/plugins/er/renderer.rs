//! ER diagram notation renderer
//!
//! Emits canonical `erDiagram` notation for a schema model. The output is
//! always accepted by [`ErParser`](super::ErParser) and re-parses to the same
//! content, but ids, positions and comments are not carried over. Blank
//! names and types get placeholders, and whitespace inside a column name or
//! type is written as `_`.

use std::fmt::Write;

use anyhow::Result;
use tracing::{debug, span, Level};

use super::chumsky_parser::normalize_label;
use super::parser::{DEFAULT_COLUMN_NAME, DEFAULT_COLUMN_TYPE, DEFAULT_TABLE_NAME};
use super::{Column, Relationship, SchemaModel, Table};
use crate::core::Renderer;

const TABLE_INDENT: &str = "    ";
const COLUMN_INDENT: &str = "        ";

/// Notation renderer
pub struct NotationRenderer;

impl NotationRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render without going through `anyhow`; rendering cannot fail
    pub fn render_model(&self, model: &SchemaModel) -> String {
        let span = span!(
            Level::INFO,
            "render_notation",
            tables = model.tables.len(),
            relationships = model.relationships.len()
        );
        let _enter = span.enter();

        let mut out = String::from("erDiagram\n");
        for table in &model.tables {
            push_table(&mut out, table);
        }

        if !model.relationships.is_empty() {
            out.push_str(TABLE_INDENT);
            out.push_str("%% Relationships\n");
            for relationship in &model.relationships {
                push_relationship(&mut out, relationship);
            }
        }

        debug!(output_len = out.len(), "Rendered notation");
        out
    }
}

impl Default for NotationRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// One whitespace-free token
fn token(value: &str, placeholder: &str) -> String {
    non_blank(value, placeholder)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn push_table(out: &mut String, table: &Table) {
    let name = non_blank(&table.name, DEFAULT_TABLE_NAME).trim();
    let _ = writeln!(out, "{}{} {{", TABLE_INDENT, name);
    for column in &table.columns {
        push_column(out, column);
    }
    let _ = writeln!(out, "{}}}\n", TABLE_INDENT);
}

fn push_column(out: &mut String, column: &Column) {
    let _ = write!(
        out,
        "{}{} {}",
        COLUMN_INDENT,
        token(&column.data_type, DEFAULT_COLUMN_TYPE),
        token(&column.name, DEFAULT_COLUMN_NAME)
    );
    if column.is_primary_key {
        out.push_str(" PK");
    }
    if column.is_foreign_key {
        out.push_str(" FK");
    }
    if column.is_not_null && !column.is_primary_key {
        out.push_str(" \"NOT NULL\"");
    }
    if column.is_unique && !column.is_primary_key {
        out.push_str(" \"UNIQUE\"");
    }
    if let Some(value) = column.effective_default() {
        let _ = write!(out, " DEFAULT {}", value);
    }
    out.push('\n');
}

fn push_relationship(out: &mut String, relationship: &Relationship) {
    let label = relationship
        .label
        .as_deref()
        .and_then(normalize_label)
        .unwrap_or_else(|| {
            format!("{} to {}", relationship.from_column, relationship.to_column)
        });
    let _ = writeln!(
        out,
        "{}{} {} {} : \"{}\"",
        TABLE_INDENT,
        relationship.from_table,
        relationship.kind.symbol(),
        relationship.to_table,
        label
    );
}

impl Renderer<SchemaModel> for NotationRenderer {
    type Output = String;

    fn render(&self, database: &SchemaModel) -> Result<Self::Output> {
        Ok(self.render_model(database))
    }

    fn name(&self) -> &'static str {
        "notation"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "mermaid"
    }
}
