//! ER diagram parser implementation
//!
//! Line-oriented and permissive: lines are classified as headers, comments,
//! table openers, columns, table closers or relationships. Anything else is
//! skipped. Relationship lines are handed to the chumsky grammar.

use std::fmt;

use super::chumsky_parser::ChumskyErParser;
use super::database::fresh_id;
use super::{Column, Position, SchemaModel, Table};
use crate::core::{ErdError, Parser};
use anyhow::Result;
use tracing::{debug, span, trace, Level};

/// Name written for a table whose name is blank
pub const DEFAULT_TABLE_NAME: &str = "table";
/// Type used for a column line without a type token
pub const DEFAULT_COLUMN_TYPE: &str = "string";
/// Name used for a column line without a name token
pub const DEFAULT_COLUMN_NAME: &str = "column";

const HEADER_KEYWORDS: [&str; 2] = ["erDiagram", "graph"];
const COMMENT_PREFIX: &str = "%%";

/// Why a line did not contribute to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Outside a table and not a relationship
    UnrecognizedStatement,
    /// A table opener with nothing before the brace
    EmptyTableName,
    /// Inside a table but looks like a relationship or carries a comment
    DroppedColumn,
    /// Table still open at end of input
    UnclosedTable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnrecognizedStatement => write!(f, "unrecognized statement"),
            SkipReason::EmptyTableName => write!(f, "table without a name"),
            SkipReason::DroppedColumn => write!(f, "not a column definition"),
            SkipReason::UnclosedTable => write!(f, "table is never closed"),
        }
    }
}

/// A source line the parser ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the first non-blank character
    pub column: usize,
    pub text: String,
    pub reason: SkipReason,
}

impl SkippedLine {
    fn to_error(&self) -> ErdError {
        ErdError::parse_error(format!("{}: {}", self.reason, self.text), self.line, self.column)
    }
}

/// ER diagram parser implementation
pub struct ErParser;

impl ErParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse into a fresh model. Never fails.
    pub fn parse_model(&self, input: &str) -> SchemaModel {
        self.parse_with_report(input).0
    }

    /// Parse into a fresh model, also returning the lines that were skipped
    pub fn parse_with_report(&self, input: &str) -> (SchemaModel, Vec<SkippedLine>) {
        let mut model = SchemaModel::new();
        let skipped = self.parse_into(input, &mut model);
        (model, skipped)
    }

    /// Parse, failing on the first line the permissive parser would skip
    pub fn parse_strict(&self, input: &str) -> Result<SchemaModel, ErdError> {
        let (model, skipped) = self.parse_with_report(input);
        match skipped.iter().min_by_key(|s| s.line) {
            Some(first) => Err(first.to_error()),
            None => Ok(model),
        }
    }

    /// Append everything parsed from `input` to `model`.
    ///
    /// Id counters and grid slots continue from what `model` already holds;
    /// ids still held by `model` are never handed out again.
    fn parse_into(&self, input: &str, model: &mut SchemaModel) -> Vec<SkippedLine> {
        let span = span!(Level::INFO, "parse_er", input_len = input.len());
        let _enter = span.enter();

        let grammar = ChumskyErParser::new();
        let mut table_index = model.tables.len();
        let mut column_counter: usize = model.tables.iter().map(|t| t.columns.len()).sum();
        let mut relationship_counter = model.relationships.len();
        let mut open_table: Option<(Table, usize, usize)> = None;
        let mut skipped = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if is_header(line) || line.starts_with(COMMENT_PREFIX) {
                trace!(line = index + 1, "Skipping header or comment");
                continue;
            }

            let line_no = index + 1;
            let column_no = raw.chars().take_while(|c| c.is_whitespace()).count() + 1;
            let skip = |reason: SkipReason| {
                debug!(line = line_no, %reason, text = line, "Skipped line");
                SkippedLine {
                    line: line_no,
                    column: column_no,
                    text: line.to_string(),
                    reason,
                }
            };

            if let Some((mut table, opened_at, opened_col)) = open_table.take() {
                if line == "}" {
                    trace!(table = %table.name, columns = table.columns.len(), "Closed table");
                    model.tables.push(table);
                    continue;
                }
                if looks_like_relationship(line) || line.contains(COMMENT_PREFIX) {
                    skipped.push(skip(SkipReason::DroppedColumn));
                } else {
                    let column = parse_column(line);
                    let id = fresh_id(&format!("col_{}", column.name), column_counter, |c| {
                        table.column(c).is_some()
                            || model.tables.iter().any(|t| t.column(c).is_some())
                    });
                    column_counter += 1;
                    trace!(column = %column.name, data_type = %column.data_type, "Parsed column");
                    table.columns.push(column.with_id(id));
                }
                open_table = Some((table, opened_at, opened_col));
                continue;
            }

            if is_table_open(line) {
                let name = line.split('{').next().unwrap_or_default().trim();
                if name.is_empty() {
                    skipped.push(skip(SkipReason::EmptyTableName));
                    continue;
                }
                trace!(table = name, "Opened table");
                let id = fresh_id(&format!("table_{}", name), table_index, |c| {
                    model.table(c).is_some()
                });
                let table = Table::new(id, name, Position::for_table(table_index));
                table_index += 1;
                open_table = Some((table, line_no, column_no));
                continue;
            }

            match grammar.parse_relationship(line) {
                Ok(statement) => {
                    let id = fresh_id("rel", relationship_counter, |c| {
                        model.relationship(c).is_some()
                    });
                    let relationship = statement.into_relationship().with_id(id);
                    relationship_counter += 1;
                    trace!(
                        from = %relationship.from_table,
                        to = %relationship.to_table,
                        kind = %relationship.kind,
                        "Parsed relationship"
                    );
                    model.relationships.push(relationship);
                }
                Err(_) => skipped.push(skip(SkipReason::UnrecognizedStatement)),
            }
        }

        if let Some((table, line, column)) = open_table {
            debug!(table = %table.name, line, "Discarding unclosed table");
            skipped.push(SkippedLine {
                line,
                column,
                text: format!("{} {{", table.name),
                reason: SkipReason::UnclosedTable,
            });
        }

        debug!(
            tables = model.tables.len(),
            relationships = model.relationships.len(),
            skipped = skipped.len(),
            "Parsed ER diagram"
        );
        skipped
    }
}

impl Default for ErParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<SchemaModel> for ErParser {
    fn parse(&self, input: &str, database: &mut SchemaModel) -> Result<()> {
        self.parse_into(input, database);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "er"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.trim_start().starts_with("erDiagram") || looks_like_relationship(input)
    }
}

fn is_header(line: &str) -> bool {
    HEADER_KEYWORDS.iter().any(|keyword| line.starts_with(keyword))
}

fn looks_like_relationship(line: &str) -> bool {
    line.contains("||") || line.contains("}o")
}

fn is_table_open(line: &str) -> bool {
    line.contains('{') && !line.contains('}') && !looks_like_relationship(line)
}

/// Parse a `type name [constraints...]` column line.
///
/// Missing tokens fall back to [`DEFAULT_COLUMN_TYPE`] and
/// [`DEFAULT_COLUMN_NAME`]. The returned column has no id.
pub fn parse_column(line: &str) -> Column {
    let mut tokens = line.split_whitespace();
    let data_type = tokens.next().unwrap_or(DEFAULT_COLUMN_TYPE);
    let name = tokens.next().unwrap_or(DEFAULT_COLUMN_NAME);
    let constraints = tokens.collect::<Vec<_>>().join(" ");

    let primary = constraints.contains("PK");
    Column {
        id: String::new(),
        name: name.to_string(),
        data_type: data_type.to_string(),
        is_primary_key: primary,
        is_foreign_key: constraints.contains("FK"),
        is_not_null: primary || constraints.contains("NOT NULL"),
        is_unique: primary || constraints.contains("UNIQUE"),
        default_value: extract_default(&constraints),
    }
}

/// First `DEFAULT <value>` (keyword case-insensitive) in the constraint text.
///
/// The value runs up to the next whitespace or comma.
fn extract_default(constraints: &str) -> Option<String> {
    const KEYWORD: &str = "default";
    let lower = constraints.to_ascii_lowercase();
    let mut from = 0;

    while let Some(offset) = lower[from..].find(KEYWORD) {
        let start = from + offset;
        let after = &constraints[start + KEYWORD.len()..];
        let rest = after.trim_start();
        if rest.len() < after.len() {
            let value: String = rest
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != ',')
                .collect();
            if !value.is_empty() {
                return Some(value);
            }
        }
        from = start + 1;
    }
    None
}
