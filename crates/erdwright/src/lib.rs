//! Erdwright - ER diagram notation and SQL schema scripts
//!
//! A library for turning Mermaid-style `erDiagram` notation into a structured
//! schema model, editing that model, and rendering it back to notation or to
//! DDL for MySQL, PostgreSQL, SQLite, SQL Server and Oracle.
//!
//! # Quick Start
//!
//! ```rust
//! use erdwright::{generate, parse};
//!
//! let model = parse("erDiagram\n    User {\n        int id PK\n    }\n    User ||--o{ Post : writes");
//! assert_eq!(model.tables.len(), 1);
//! assert_eq!(model.relationships[0].to_column, "user_id");
//!
//! let notation = generate(&model);
//! assert!(notation.starts_with("erDiagram\n    User {\n"));
//! ```
//!
//! # Generating DDL
//!
//! ```rust
//! use erdwright::{generate_script, parse, Dialect};
//!
//! let model = parse("User {\n    int id PK\n    string email UNIQUE\n}");
//! let dialect: Dialect = "postgresql".parse().unwrap();
//! let ddl = generate_script(&model, dialect);
//! assert!(ddl.contains("\"email\" VARCHAR(255) UNIQUE"));
//! ```
//!
//! # Advanced Usage
//!
//! The parser, renderers and detector implement the shared traits in
//! [`core`]:
//!
//! ```rust
//! use erdwright::prelude::*;
//!
//! let parser = ErParser::new();
//! let mut model = SchemaModel::new();
//! parser.parse(SAMPLE_DIAGRAM, &mut model).unwrap();
//! assert_eq!(model.node_count(), 3);
//!
//! let renderer = ScriptRenderer::with_dialect(Dialect::Sqlite);
//! let ddl = renderer.render(&model).unwrap();
//! assert!(ddl.contains("CREATE TABLE \"CUSTOMER\""));
//! ```

pub mod core;
pub mod plugins;
pub mod sql;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use plugins::er::{SchemaModel, SAMPLE_DIAGRAM};
pub use sql::{generate_script, generate_script_at, Dialect};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Database, Detector, ErdError, Parser, Renderer};
    pub use crate::plugins::er::{
        Column, ColumnFlag, Diagnostic, ErDetector, ErParser, NotationRenderer, Position,
        Relationship, RelationshipKind, SchemaModel, Table, TableRenderer, SAMPLE_DIAGRAM,
    };
    pub use crate::sql::{Dialect, ScriptRenderer};
}

/// Parse notation into a schema model
///
/// Never fails: unrecognized lines are skipped and an empty or unrelated
/// input yields an empty model.
///
/// # Example
/// ```rust
/// let model = erdwright::parse("nonsense");
/// assert!(model.tables.is_empty());
/// ```
pub fn parse(input: &str) -> SchemaModel {
    plugins::er::ErParser::new().parse_model(input)
}

/// Parse notation, failing on the first line that would be skipped
///
/// # Example
/// ```rust
/// use erdwright::{parse_strict, ErdError};
///
/// let err = parse_strict("erDiagram\n    User {\n").unwrap_err();
/// assert!(matches!(err, ErdError::ParseError { line: 2, .. }));
/// ```
pub fn parse_strict(input: &str) -> Result<SchemaModel, ErdError> {
    plugins::er::ErParser::new().parse_strict(input)
}

/// Render a schema model as canonical notation
pub fn generate(model: &SchemaModel) -> String {
    plugins::er::NotationRenderer::new().render_model(model)
}

/// Render a boxed plain-text summary of a schema model
pub fn summarize(model: &SchemaModel) -> String {
    plugins::er::TableRenderer::new().render_model(model)
}
