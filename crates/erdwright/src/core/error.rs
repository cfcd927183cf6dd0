//! Core error types for schema processing
//!
//! The parser and generators are permissive and never fail on malformed
//! notation. These errors cover the exceptional paths: strict parsing,
//! direct model edits that name an unknown id, and unknown dialect names.

use thiserror::Error;

/// Core error types for schema processing
#[derive(Error, Debug)]
pub enum ErdError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Unknown table: {id}")]
    UnknownTable { id: String },

    #[error("Unknown column {column_id} in table {table_id}")]
    UnknownColumn { table_id: String, column_id: String },

    #[error("Unknown relationship: {id}")]
    UnknownRelationship { id: String },

    #[error("Unknown SQL dialect: {name} (expected one of mysql, postgresql, sqlite, sqlserver, oracle)")]
    UnknownDialect { name: String },
}

impl ErdError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    pub fn unknown_table(id: impl Into<String>) -> Self {
        Self::UnknownTable { id: id.into() }
    }

    pub fn unknown_column(table_id: impl Into<String>, column_id: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table_id: table_id.into(),
            column_id: column_id.into(),
        }
    }

    pub fn unknown_relationship(id: impl Into<String>) -> Self {
        Self::UnknownRelationship { id: id.into() }
    }

    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect { name: name.into() }
    }
}
