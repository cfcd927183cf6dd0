//! Edge case tests for the permissive parser and the generators

use erdwright::plugins::er::{ErParser, SkipReason};
use erdwright::prelude::*;
use erdwright::{generate, generate_script, parse};

#[test]
fn test_empty_and_whitespace_input() {
    for input in ["", "   ", "\n\n\t\n", "erDiagram", "erDiagram\n    %% nothing here"] {
        let model = parse(input);
        assert!(model.tables.is_empty(), "input {:?}", input);
        assert!(model.relationships.is_empty(), "input {:?}", input);
    }
}

#[test]
fn test_header_is_optional() {
    let with = parse("erDiagram\nA {\n    int id PK\n}");
    let without = parse("A {\n    int id PK\n}");
    assert_eq!(with, without);
}

#[test]
fn test_unclosed_table_is_dropped() {
    let (model, skipped) = ErParser::new().parse_with_report("erDiagram\n    A {\n        int id PK\n");
    assert!(model.tables.is_empty());
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].reason, SkipReason::UnclosedTable);
    assert_eq!(skipped[0].line, 2);
}

#[test]
fn test_relationship_inside_table_is_dropped() {
    let input = "A {\n    int id PK\n    A ||--o{ B : nested\n}";
    let (model, skipped) = ErParser::new().parse_with_report(input);
    assert_eq!(model.tables.len(), 1);
    assert_eq!(model.tables[0].columns.len(), 1);
    assert!(model.relationships.is_empty());
    assert_eq!(skipped[0].reason, SkipReason::DroppedColumn);
    assert_eq!(skipped[0].line, 3);
}

#[test]
fn test_comment_inside_table_is_not_a_column() {
    let model = parse("A {\n    %% ids first\n    int id PK\n}");
    assert_eq!(model.tables[0].columns.len(), 1);
}

#[test]
fn test_brace_on_same_line_as_columns_is_not_a_table() {
    let (model, skipped) = ErParser::new().parse_with_report("A { int id }");
    assert!(model.tables.is_empty());
    assert_eq!(skipped[0].reason, SkipReason::UnrecognizedStatement);
}

#[test]
fn test_empty_table_name_is_skipped() {
    let (model, skipped) = ErParser::new().parse_with_report("{\n    int id\n}");
    assert!(model.tables.is_empty());
    assert_eq!(skipped[0].reason, SkipReason::EmptyTableName);
}

#[test]
fn test_table_with_no_columns() {
    let model = parse("Empty {\n}");
    assert_eq!(model.tables.len(), 1);
    assert!(model.tables[0].columns.is_empty());

    let ddl = generate_script(&model, Dialect::PostgreSql);
    assert!(ddl.contains("CREATE TABLE \"Empty\" (\n\n);"));
}

#[test]
fn test_duplicate_names_are_kept_with_distinct_ids() {
    let model = parse("A {\n    int id\n    int id\n}\nA {\n}");
    assert_eq!(model.tables.len(), 2);
    assert_ne!(model.tables[0].id, model.tables[1].id);
    let columns = &model.tables[0].columns;
    assert_ne!(columns[0].id, columns[1].id);
}

#[test]
fn test_every_crows_foot_symbol() {
    let model = parse(
        "A ||--o{ B\nA ||--|{ B\nA ||--|| B\nA }o--o{ B\nA }o--|| B",
    );
    let kinds: Vec<_> = model.relationships.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            RelationshipKind::OneToMany,
            RelationshipKind::OneToMany,
            RelationshipKind::OneToOne,
            RelationshipKind::ManyToMany,
            RelationshipKind::OneToMany,
        ]
    );

    // many-to-one flips direction so the "one" side is referenced
    let flipped = &model.relationships[4];
    assert_eq!(flipped.from_table, "B");
    assert_eq!(flipped.to_table, "A");
    assert_eq!(flipped.to_column, "b_id");
}

#[test]
fn test_relationship_to_undeclared_table_is_kept() {
    let model = parse("A {\n    int id PK\n}\nA ||--o{ Ghost : haunts");
    assert_eq!(model.relationships.len(), 1);

    let ddl = generate_script(&model, Dialect::MySql);
    assert!(!ddl.contains("ALTER TABLE"));
}

#[test]
fn test_quoted_label_is_unwrapped() {
    let model = parse("A ||--o{ B : \"has many\"");
    assert_eq!(model.relationships[0].label.as_deref(), Some("has many"));
    assert!(generate(&model).contains("A ||--o{ B : \"has many\"\n"));
}

#[test]
fn test_missing_label_uses_column_names() {
    let model = parse("A ||--o{ B");
    assert_eq!(model.relationships[0].label, None);
    assert!(generate(&model).contains("A ||--o{ B : \"id to a_id\"\n"));
}

#[test]
fn test_hyphenated_and_unicode_names() {
    let model = parse("LINE-ITEM {\n    string code\n}\nORDER ||--|{ LINE-ITEM");
    assert_eq!(model.tables[0].name, "LINE-ITEM");
    assert_eq!(model.relationships[0].to_table, "LINE-ITEM");

    let model = parse("Café {\n    string naïve\n}");
    assert_eq!(model.tables[0].name, "Café");
    assert_eq!(model.tables[0].columns[0].name, "naïve");
}

#[test]
fn test_default_values() {
    let model = parse(
        "T {\n    int a DEFAULT 0\n    string b default hello\n    bool c DEFAULT\n    string d DEFAULT x,y\n}",
    );
    let defaults: Vec<_> = model.tables[0]
        .columns
        .iter()
        .map(|c| c.default_value.as_deref())
        .collect();
    assert_eq!(defaults, [Some("0"), Some("hello"), None, Some("x")]);
}

#[test]
fn test_blank_default_is_not_emitted() {
    let mut model = parse("T {\n    int a\n}");
    model.tables[0].columns[0].default_value = Some("   ".to_string());
    assert!(!generate(&model).contains("DEFAULT"));
    assert!(!generate_script(&model, Dialect::Sqlite).contains("DEFAULT"));
}

#[test]
fn test_blank_names_render_as_placeholders() {
    let mut model = SchemaModel::new();
    let table_id = model.add_table("T").id.clone();
    model.add_column(&table_id, Column::new("", "")).unwrap();
    assert!(generate(&model).contains("        string column\n"));
}

#[test]
fn test_composite_primary_key() {
    let model = parse("Tag {\n    int post_id PK\n    int tag_id PK\n}");
    let ddl = generate_script(&model, Dialect::SqlServer);
    assert!(ddl.contains("    PRIMARY KEY ([post_id], [tag_id])\n"));
}

#[test]
fn test_crlf_input() {
    let model = parse("erDiagram\r\n    A {\r\n        int id PK\r\n    }\r\n    A ||--o{ B : x\r\n");
    assert_eq!(model.tables.len(), 1);
    assert_eq!(model.tables[0].columns.len(), 1);
    assert_eq!(model.relationships.len(), 1);
}

#[test]
fn test_constraint_names_stay_unique() {
    let model = parse(
        "A {\n    int id PK\n}\nB {\n    int a_id FK\n}\nA ||--o{ B\nA ||--o{ B\nA ||--o{ B\nA ||--o{ B\nA ||--o{ B",
    );
    let ddl = generate_script(&model, Dialect::PostgreSql);
    let names: Vec<&str> = ddl
        .lines()
        .filter_map(|l| l.trim().strip_prefix("ADD CONSTRAINT "))
        .collect();
    assert_eq!(
        names,
        [
            "\"FK_B_aid_A_id\"",
            "\"FK_B_aid_A\"",
            "\"FK_B_A_aid\"",
            "\"FK_B_A\"",
            "\"FK_B_A1\"",
        ]
    );
}

#[test]
fn test_long_constraint_names_are_truncated() {
    let long = "a".repeat(80);
    let model = parse(&format!("{long} {{\n    int id PK\n}}\nB {{\n}}\n{long} ||--o{{ B"));
    let ddl = generate_script(&model, Dialect::PostgreSql);
    let name = ddl
        .lines()
        .find_map(|l| l.trim().strip_prefix("ADD CONSTRAINT "))
        .unwrap()
        .trim_matches('"');
    assert_eq!(name.chars().count(), 63);
    assert!(name.starts_with("FK_B_"));
}
