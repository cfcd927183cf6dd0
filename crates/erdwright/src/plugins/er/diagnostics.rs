//! Advisory checks over a schema model
//!
//! Nothing here blocks parsing or generation. Findings point at things the
//! script generator will silently skip or that usually indicate a mistake.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::{Column, Relationship, SchemaModel};

/// A single advisory finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A relationship names a table that does not exist
    DanglingRelationship { relationship_id: String, table: String },
    /// The referenced or foreign-key column is not declared on its table
    MissingRelationshipColumn {
        relationship_id: String,
        table: String,
        column: String,
    },
    DuplicateTableName { name: String },
    DuplicateColumnName { table: String, column: String },
    EmptyTableName { table_id: String },
    EmptyColumnName { table: String, column_id: String },
    MissingPrimaryKey { table: String },
    /// A column name, type or default that notation cannot hold as one token
    SplitToken {
        table: String,
        column: String,
        field: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingRelationship { relationship_id, table } => write!(
                f,
                "relationship {} refers to unknown table {}; no constraint will be generated",
                relationship_id, table
            ),
            Diagnostic::MissingRelationshipColumn {
                relationship_id,
                table,
                column,
            } => write!(
                f,
                "relationship {} uses column {}.{} which is not declared",
                relationship_id, table, column
            ),
            Diagnostic::DuplicateTableName { name } => {
                write!(f, "table name {} is used more than once", name)
            }
            Diagnostic::DuplicateColumnName { table, column } => {
                write!(f, "column {} appears more than once in table {}", column, table)
            }
            Diagnostic::EmptyTableName { table_id } => {
                write!(f, "table {} has an empty name", table_id)
            }
            Diagnostic::EmptyColumnName { table, column_id } => {
                write!(f, "column {} in table {} has an empty name", column_id, table)
            }
            Diagnostic::MissingPrimaryKey { table } => {
                write!(f, "table {} has no primary key", table)
            }
            Diagnostic::SplitToken { table, column, field } => write!(
                f,
                "{} of column {}.{} contains whitespace; notation output will alter it",
                field, table, column
            ),
        }
    }
}

fn check_tokens(table: &str, column: &Column, findings: &mut Vec<Diagnostic>) {
    let spaced = |value: &str| value.trim().contains(char::is_whitespace);
    let fields = [
        ("name", spaced(&column.name)),
        ("type", spaced(&column.data_type)),
        (
            "default",
            column
                .effective_default()
                .is_some_and(|value| spaced(value) || value.contains(',')),
        ),
    ];
    for (field, split) in fields {
        if split {
            findings.push(Diagnostic::SplitToken {
                table: table.to_string(),
                column: column.name.clone(),
                field: field.to_string(),
            });
        }
    }
}

impl SchemaModel {
    /// Run every check, tables first then relationships
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut findings = Vec::new();
        let mut seen_tables = HashSet::new();

        for table in &self.tables {
            if table.name.trim().is_empty() {
                findings.push(Diagnostic::EmptyTableName {
                    table_id: table.id.clone(),
                });
            } else if !seen_tables.insert(table.name.as_str()) {
                findings.push(Diagnostic::DuplicateTableName {
                    name: table.name.clone(),
                });
            }

            let mut seen_columns = HashSet::new();
            for column in &table.columns {
                if column.name.trim().is_empty() {
                    findings.push(Diagnostic::EmptyColumnName {
                        table: table.name.clone(),
                        column_id: column.id.clone(),
                    });
                } else if !seen_columns.insert(column.name.as_str()) {
                    findings.push(Diagnostic::DuplicateColumnName {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                }
                check_tokens(&table.name, column, &mut findings);
            }

            if table.primary_key_columns().next().is_none() {
                findings.push(Diagnostic::MissingPrimaryKey {
                    table: table.name.clone(),
                });
            }
        }

        for relationship in &self.relationships {
            self.check_relationship(relationship, &mut findings);
        }

        for finding in &findings {
            warn!(%finding, "Schema diagnostic");
        }
        findings
    }

    fn check_relationship(&self, relationship: &Relationship, findings: &mut Vec<Diagnostic>) {
        let ends = [
            (&relationship.from_table, &relationship.from_column),
            (&relationship.to_table, &relationship.to_column),
        ];
        for (table_name, column_name) in ends {
            match self.table_named(table_name) {
                None => findings.push(Diagnostic::DanglingRelationship {
                    relationship_id: relationship.id.clone(),
                    table: table_name.clone(),
                }),
                Some(table) if table.column_named(column_name).is_none() => {
                    findings.push(Diagnostic::MissingRelationshipColumn {
                        relationship_id: relationship.id.clone(),
                        table: table_name.clone(),
                        column: column_name.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::er::ErParser;

    fn diagnose(input: &str) -> Vec<Diagnostic> {
        ErParser::new().parse_model(input).diagnostics()
    }

    #[test]
    fn test_clean_model() {
        let findings = diagnose(
            "User {\n int id PK\n}\nPost {\n int id PK\n int user_id FK\n}\nUser ||--o{ Post : writes",
        );
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_inferred_column_missing() {
        let findings = diagnose("User {\n int id PK\n}\nPost {\n int id PK\n}\nUser ||--o{ Post");
        assert_eq!(
            findings,
            vec![Diagnostic::MissingRelationshipColumn {
                relationship_id: "rel_0".to_string(),
                table: "Post".to_string(),
                column: "user_id".to_string(),
            }]
        );
    }

    #[test]
    fn test_dangling_relationship() {
        let findings = diagnose("User {\n int id PK\n}\nUser ||--o{ Ghost");
        assert!(findings.contains(&Diagnostic::DanglingRelationship {
            relationship_id: "rel_0".to_string(),
            table: "Ghost".to_string(),
        }));
    }

    #[test]
    fn test_duplicates_and_missing_keys() {
        let findings = diagnose("A {\n int x\n int x\n}\nA {\n int id PK\n}");
        assert!(findings.contains(&Diagnostic::DuplicateTableName { name: "A".to_string() }));
        assert!(findings.contains(&Diagnostic::DuplicateColumnName {
            table: "A".to_string(),
            column: "x".to_string(),
        }));
        assert!(findings.contains(&Diagnostic::MissingPrimaryKey { table: "A".to_string() }));
    }

    #[test]
    fn test_spaced_column_tokens() {
        let mut model = SchemaModel::new();
        let id = model.add_table("Person").id.clone();
        model
            .add_column(&id, Column::new("first name", "int").with_default("a b"))
            .unwrap();
        model.add_column(&id, Column::new("id", "int").with_default("1,2")).unwrap();

        let findings: Vec<_> = model
            .diagnostics()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::SplitToken { column, field, .. } => Some((column, field)),
                _ => None,
            })
            .collect();
        assert_eq!(
            findings,
            vec![
                ("first name".to_string(), "name".to_string()),
                ("first name".to_string(), "default".to_string()),
                ("id".to_string(), "default".to_string()),
            ]
        );
    }

    #[test]
    fn test_display_mentions_subject() {
        let finding = Diagnostic::MissingPrimaryKey { table: "Audit".to_string() };
        assert_eq!(finding.to_string(), "table Audit has no primary key");
    }
}
