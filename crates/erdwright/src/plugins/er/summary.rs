//! Boxed text summary of a schema model
//!
//! Each table becomes a box listing its columns with key markers, followed by
//! one line per relationship. Widths are measured in terminal cells.

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use super::{Column, RelationshipKind, SchemaModel, Table};
use crate::core::Renderer;

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const T_LEFT: char = '├';
const T_RIGHT: char = '┤';

/// Table summary renderer
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_model(&self, model: &SchemaModel) -> String {
        let mut blocks: Vec<String> = model.tables.iter().map(render_table).collect();

        if !model.relationships.is_empty() {
            let lines: Vec<String> = model
                .relationships
                .iter()
                .map(|r| {
                    let mut line = format!(
                        "{}.{} {} {}.{}",
                        r.from_table,
                        r.from_column,
                        cardinality(r.kind),
                        r.to_table,
                        r.to_column
                    );
                    if let Some(label) = &r.label {
                        line.push_str(&format!(" ({})", label));
                    }
                    line
                })
                .collect();
            blocks.push(lines.join("\n"));
        }

        blocks.join("\n\n")
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cardinality(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::OneToOne => "1──1",
        RelationshipKind::OneToMany => "1──N",
        RelationshipKind::ManyToMany => "N──N",
    }
}

fn key_markers(column: &Column) -> String {
    let mut markers = Vec::new();
    if column.is_primary_key {
        markers.push("PK");
    }
    if column.is_foreign_key {
        markers.push("FK");
    }
    markers.join(" ")
}

/// Pad `text` with spaces to `width` cells
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn render_table(table: &Table) -> String {
    let rows: Vec<(&str, &str, String)> = table
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.data_type.as_str(), key_markers(c)))
        .collect();

    let name_w = rows.iter().map(|r| r.0.width()).max().unwrap_or(0);
    let type_w = rows.iter().map(|r| r.1.width()).max().unwrap_or(0);
    let key_w = rows.iter().map(|r| r.2.width()).max().unwrap_or(0);
    let row_w = if rows.is_empty() {
        0
    } else if key_w == 0 {
        name_w + 1 + type_w
    } else {
        name_w + 1 + type_w + 1 + key_w
    };
    let inner = row_w.max(table.name.width());
    let rule = HORIZONTAL.to_string().repeat(inner + 2);

    let mut lines = vec![
        format!("{}{}{}", TOP_LEFT, rule, TOP_RIGHT),
        format!("{} {} {}", VERTICAL, pad(&table.name, inner), VERTICAL),
    ];
    if !rows.is_empty() {
        lines.push(format!("{}{}{}", T_LEFT, rule, T_RIGHT));
        for (name, data_type, keys) in &rows {
            let mut row = format!("{} {}", pad(name, name_w), pad(data_type, type_w));
            if key_w > 0 {
                row.push(' ');
                row.push_str(keys);
            }
            lines.push(format!("{} {} {}", VERTICAL, pad(&row, inner), VERTICAL));
        }
    }
    lines.push(format!("{}{}{}", BOTTOM_LEFT, rule, BOTTOM_RIGHT));
    lines.join("\n")
}

impl Renderer<SchemaModel> for TableRenderer {
    type Output = String;

    fn render(&self, database: &SchemaModel) -> Result<Self::Output> {
        Ok(self.render_model(database))
    }

    fn name(&self) -> &'static str {
        "summary"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}
