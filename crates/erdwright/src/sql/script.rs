//! Schema script generation.
//!
//! One `CREATE TABLE` per table in model order, then one `ALTER TABLE ... ADD
//! CONSTRAINT` per relationship whose tables both exist. Relationship tables
//! are resolved by exact name.

use anyhow::Result;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, span, warn, Level};

use super::naming::ConstraintNamer;
use super::types::map_type;
use super::Dialect;
use crate::core::Renderer;
use crate::plugins::er::{Column, Relationship, SchemaModel, Table};

const INDENT: &str = "    ";

/// Wrap an identifier in the dialect's delimiters.
pub fn quote_identifier(identifier: &str, dialect: Dialect) -> String {
    dialect.quote(identifier)
}

/// Render a default value as a SQL literal.
///
/// Finite numbers and `TRUE`/`FALSE`/`NULL` (any case) are emitted bare. Anything
/// else becomes a single-quoted string with embedded quotes doubled.
pub fn format_default_value(value: &str) -> String {
    let value = value.trim();
    let is_number = value.parse::<f64>().map(f64::is_finite).unwrap_or(false);
    let is_keyword = ["TRUE", "FALSE", "NULL"]
        .iter()
        .any(|keyword| value.eq_ignore_ascii_case(keyword));

    if is_number || is_keyword {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Generate a script stamped with the current UTC time.
pub fn generate_script(model: &SchemaModel, dialect: Dialect) -> String {
    generate_script_at(model, dialect, OffsetDateTime::now_utc())
}

/// Generate a script stamped with `generated_at`.
pub fn generate_script_at(
    model: &SchemaModel,
    dialect: Dialect,
    generated_at: OffsetDateTime,
) -> String {
    let span = span!(
        Level::INFO,
        "generate_script",
        %dialect,
        tables = model.tables.len(),
        relationships = model.relationships.len()
    );
    let _enter = span.enter();

    let utc = generated_at.to_offset(UtcOffset::UTC);
    let stamp = utc
        .format(&Rfc3339)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string());

    let mut script = format!(
        "-- Generated DDL for {}\n-- Generated on {}\n\n",
        dialect.name().to_uppercase(),
        stamp
    );

    for table in &model.tables {
        script.push_str(&create_table(table, dialect));
        script.push_str("\n\n");
    }

    let mut namer = ConstraintNamer::new();
    let mut constraints = 0;
    for relationship in &model.relationships {
        if let Some(statement) = foreign_key(model, relationship, dialect, &mut namer) {
            script.push_str(&statement);
            script.push_str("\n\n");
            constraints += 1;
        }
    }

    debug!(constraints, script_len = script.len(), "Generated script");
    script
}

fn column_clause(column: &Column, dialect: Dialect) -> String {
    let mut clause = format!(
        "{}{} {}",
        INDENT,
        dialect.quote(&column.name),
        map_type(&column.data_type, dialect)
    );
    if column.is_not_null || column.is_primary_key {
        clause.push_str(" NOT NULL");
    }
    if column.is_unique && !column.is_primary_key {
        clause.push_str(" UNIQUE");
    }
    if let Some(value) = column.effective_default() {
        clause.push_str(" DEFAULT ");
        clause.push_str(&format_default_value(value));
    }
    clause
}

fn create_table(table: &Table, dialect: Dialect) -> String {
    let mut clauses: Vec<String> = table
        .columns
        .iter()
        .map(|column| column_clause(column, dialect))
        .collect();

    let primary_keys: Vec<String> = table
        .primary_key_columns()
        .map(|column| dialect.quote(&column.name))
        .collect();
    if !primary_keys.is_empty() {
        clauses.push(format!("{}PRIMARY KEY ({})", INDENT, primary_keys.join(", ")));
    }

    format!(
        "CREATE TABLE {} (\n{}\n);",
        dialect.quote(&table.name),
        clauses.join(",\n")
    )
}

fn foreign_key(
    model: &SchemaModel,
    relationship: &Relationship,
    dialect: Dialect,
    namer: &mut ConstraintNamer,
) -> Option<String> {
    for table in [&relationship.from_table, &relationship.to_table] {
        if model.table_named(table).is_none() {
            warn!(
                relationship = %relationship.id,
                table = %table,
                "Skipping foreign key for unknown table"
            );
            return None;
        }
    }

    let Some(name) = namer.next_name(
        &relationship.to_table,
        &relationship.to_column,
        &relationship.from_table,
        &relationship.from_column,
    ) else {
        warn!(relationship = %relationship.id, "No free constraint name");
        return None;
    };

    Some(format!(
        "ALTER TABLE {}\n{INDENT}ADD CONSTRAINT {}\n{INDENT}FOREIGN KEY ({})\n{INDENT}REFERENCES {} ({});",
        dialect.quote(&relationship.to_table),
        dialect.quote(&name),
        dialect.quote(&relationship.to_column),
        dialect.quote(&relationship.from_table),
        dialect.quote(&relationship.from_column),
    ))
}

/// Script renderer for one dialect
pub struct ScriptRenderer {
    dialect: Dialect,
}

impl ScriptRenderer {
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn render_at(&self, model: &SchemaModel, generated_at: OffsetDateTime) -> String {
        generate_script_at(model, self.dialect, generated_at)
    }
}

impl Default for ScriptRenderer {
    fn default() -> Self {
        Self::with_dialect(Dialect::default())
    }
}

impl Renderer<SchemaModel> for ScriptRenderer {
    type Output = String;

    fn render(&self, database: &SchemaModel) -> Result<Self::Output> {
        Ok(generate_script(database, self.dialect))
    }

    fn name(&self) -> &'static str {
        "script"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "sql"
    }
}
