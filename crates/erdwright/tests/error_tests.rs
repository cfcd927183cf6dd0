//! Error handling tests
//!
//! The permissive paths never fail; these cover the ones that do.

use erdwright::prelude::*;
use erdwright::{parse, parse_strict};

#[test]
fn test_strict_reports_first_skipped_line() {
    let input = "erDiagram\n    User {\n        int id PK\n    }\n    User -> Post\n    ??";
    match parse_strict(input) {
        Err(ErdError::ParseError {
            message,
            line,
            column,
        }) => {
            assert_eq!(line, 5);
            assert_eq!(column, 5);
            assert!(message.contains("unrecognized statement"), "{}", message);
            assert!(message.contains("User -> Post"), "{}", message);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_strict_unclosed_table_points_at_opener() {
    // the unclosed opener sorts before the dropped relationship line
    let err = parse_strict("A {\n    int id\nB ||--o{ A").unwrap_err();
    assert!(matches!(err, ErdError::ParseError { line: 1, .. }), "{}", err);

    let err = parse_strict("\n\n  A {\n    int id\n").unwrap_err();
    match err {
        ErdError::ParseError {
            message,
            line,
            column,
        } => {
            assert_eq!((line, column), (3, 3));
            assert!(message.contains("never closed"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_strict_error_display() {
    let err = parse_strict("{\n}").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Parse error: table without a name"), "{}", message);
    assert!(message.ends_with("at line 1, column 1"), "{}", message);
}

#[test]
fn test_edits_with_unknown_ids() {
    let mut model = parse("User {\n    int id PK\n}");
    let table_id = model.tables[0].id.clone();

    assert!(matches!(
        model.rename_table("nope", "X"),
        Err(ErdError::UnknownTable { .. })
    ));
    assert!(matches!(
        model.move_table("nope", Position::new(1.0, 1.0)),
        Err(ErdError::UnknownTable { .. })
    ));
    assert!(matches!(
        model.add_column("nope", Column::new("a", "int")),
        Err(ErdError::UnknownTable { .. })
    ));
    assert!(matches!(
        model.toggle_flag(&table_id, "nope", ColumnFlag::Unique),
        Err(ErdError::UnknownColumn { .. })
    ));
    assert!(matches!(
        model.remove_column(&table_id, "nope"),
        Err(ErdError::UnknownColumn { .. })
    ));
    assert!(matches!(
        model.remove_relationship("rel_9"),
        Err(ErdError::UnknownRelationship { .. })
    ));

    // failed edits leave the model untouched
    assert_eq!(model, parse("User {\n    int id PK\n}"));
}

#[test]
fn test_unknown_column_message_names_both_ids() {
    let mut model = parse("User {\n}");
    let err = model
        .rename_column("table_User_0", "col_x_0", "y")
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown column col_x_0 in table table_User_0");
}

#[test]
fn test_unknown_dialect() {
    let err = "db2".parse::<Dialect>().unwrap_err();
    assert!(matches!(err, ErdError::UnknownDialect { ref name } if name == "db2"));
    assert!(err.to_string().contains("mysql, postgresql, sqlite, sqlserver, oracle"));
}

#[test]
fn test_dialect_aliases() {
    assert_eq!("Postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
    assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::SqlServer);
    assert_eq!(" sqlite ".parse::<Dialect>().unwrap(), Dialect::Sqlite);
}

#[test]
fn test_invalid_model_json_is_rejected() {
    let result: Result<SchemaModel, _> = serde_json::from_str("{\"tables\": [{\"name\": 1}]}");
    assert!(result.is_err());

    let model: SchemaModel = serde_json::from_str("{}").unwrap();
    assert!(model.tables.is_empty());
}
