//! Column type to native SQL type mapping.

use super::Dialect;

/// Type tokens with a dialect-specific mapping, in table order.
pub const GENERIC_TYPES: [&str; 13] = [
    "string",
    "text",
    "int",
    "integer",
    "bigint",
    "decimal",
    "float",
    "double",
    "boolean",
    "date",
    "datetime",
    "timestamp",
    "time",
];

fn native_types(dialect: Dialect) -> [&'static str; 13] {
    match dialect {
        Dialect::MySql => [
            "VARCHAR(255)",
            "TEXT",
            "INT",
            "INT",
            "BIGINT",
            "DECIMAL(10,2)",
            "FLOAT",
            "DOUBLE",
            "BOOLEAN",
            "DATE",
            "DATETIME",
            "TIMESTAMP",
            "TIME",
        ],
        Dialect::PostgreSql => [
            "VARCHAR(255)",
            "TEXT",
            "INTEGER",
            "INTEGER",
            "BIGINT",
            "DECIMAL(10,2)",
            "REAL",
            "DOUBLE PRECISION",
            "BOOLEAN",
            "DATE",
            "TIMESTAMP",
            "TIMESTAMP",
            "TIME",
        ],
        // SQLite only has storage classes
        Dialect::Sqlite => [
            "TEXT", "TEXT", "INTEGER", "INTEGER", "INTEGER", "REAL", "REAL", "REAL", "INTEGER",
            "TEXT", "TEXT", "TEXT", "TEXT",
        ],
        Dialect::SqlServer => [
            "NVARCHAR(255)",
            "NTEXT",
            "INT",
            "INT",
            "BIGINT",
            "DECIMAL(10,2)",
            "FLOAT",
            "FLOAT",
            "BIT",
            "DATE",
            "DATETIME2",
            "DATETIME2",
            "TIME",
        ],
        Dialect::Oracle => [
            "VARCHAR2(255)",
            "CLOB",
            "NUMBER(10)",
            "NUMBER(10)",
            "NUMBER(19)",
            "NUMBER(10,2)",
            "BINARY_FLOAT",
            "BINARY_DOUBLE",
            "NUMBER(1)",
            "DATE",
            "TIMESTAMP",
            "TIMESTAMP",
            "TIMESTAMP",
        ],
    }
}

/// Map a column type token to the dialect's native type.
///
/// Lookup is case-insensitive. Unknown tokens pass through upper-cased.
pub fn map_type(data_type: &str, dialect: Dialect) -> String {
    let lower = data_type.to_lowercase();
    match GENERIC_TYPES.iter().position(|generic| *generic == lower) {
        Some(index) => native_types(dialect)[index].to_string(),
        None => data_type.to_uppercase(),
    }
}
