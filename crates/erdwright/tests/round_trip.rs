//! Property tests for parsing and generation

use std::collections::HashSet;

use erdwright::plugins::er::ErParser;
use erdwright::prelude::*;
use erdwright::{generate, generate_script, parse};
use proptest::prelude::*;

// ===================
// Strategies
// ===================

fn table_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,10}"
}

fn column_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

/// Type tokens; a leading `graph` would read as a diagram header
fn data_type_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("header keyword", |s| !s.starts_with("graph"))
}

fn column_strategy() -> impl Strategy<Value = Column> {
    (
        data_type_strategy(),
        column_name_strategy(),
        prop::array::uniform4(any::<bool>()),
        prop::option::of("[a-z0-9]{1,6}"),
    )
        .prop_map(|(data_type, name, flags, default_value)| {
            let mut column = Column::new(name, data_type);
            for (flag, on) in ColumnFlag::ALL.into_iter().zip(flags) {
                column.set_flag(flag, on);
            }
            column.default_value = default_value;
            column
        })
}

fn kind_strategy() -> impl Strategy<Value = RelationshipKind> {
    prop_oneof![
        Just(RelationshipKind::OneToOne),
        Just(RelationshipKind::OneToMany),
        Just(RelationshipKind::ManyToMany),
    ]
}

fn model_strategy() -> impl Strategy<Value = SchemaModel> {
    let tables = prop::collection::vec(
        (table_name_strategy(), prop::collection::vec(column_strategy(), 0..6)),
        1..6,
    );
    let relationships = prop::collection::vec(
        (
            any::<prop::sample::Index>(),
            any::<prop::sample::Index>(),
            kind_strategy(),
            prop::option::of("[a-z ]{0,12}"),
        ),
        0..8,
    );

    (tables, relationships).prop_map(|(tables, relationships)| {
        let mut model = SchemaModel::new();
        for (name, columns) in tables {
            let id = model.add_table(name).id.clone();
            for column in columns {
                let _ = model.add_column(&id, column);
            }
        }
        let names: Vec<String> = model.tables.iter().map(|t| t.name.clone()).collect();
        for (from, to, kind, label) in relationships {
            let mut relationship =
                Relationship::inferred(from.get(&names).clone(), to.get(&names).clone(), kind);
            relationship.label = label;
            model.add_relationship(relationship);
        }
        model
    })
}

// ===================
// Properties
// ===================

fn check_notation_is_a_fixed_point(model: &SchemaModel) -> Result<(), TestCaseError> {
    let first = generate(model);
    let (reparsed, skipped) = ErParser::new().parse_with_report(&first);
    prop_assert!(skipped.is_empty(), "skipped {:?} in\n{}", skipped, first);
    prop_assert_eq!(reparsed.tables.len(), model.tables.len());
    prop_assert_eq!(reparsed.relationships.len(), model.relationships.len());

    let second = generate(&reparsed);
    prop_assert_eq!(&first, &second);

    let third = generate(&parse(&second));
    prop_assert_eq!(&second, &third);
    Ok(())
}

fn check_script_shape(model: &SchemaModel) -> Result<(), TestCaseError> {
    for dialect in Dialect::ALL {
        let ddl = generate_script(model, dialect);
        let creates = ddl.lines().filter(|l| l.starts_with("CREATE TABLE ")).count();
        prop_assert_eq!(creates, model.tables.len());

        let names: Vec<&str> = ddl
            .lines()
            .filter_map(|l| l.trim().strip_prefix("ADD CONSTRAINT "))
            .collect();
        prop_assert_eq!(names.len(), model.relationships.len());

        let unique: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len(), "duplicate constraint in\n{}", ddl);
        for name in names {
            // two delimiter characters around at most 63 name characters
            prop_assert!(name.chars().count() <= 65);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn notation_round_trip_is_stable(model in model_strategy()) {
        check_notation_is_a_fixed_point(&model)?;
    }

    #[test]
    fn scripts_name_every_table_and_constraint(model in model_strategy()) {
        check_script_shape(&model)?;
    }

    #[test]
    fn parse_never_panics(input in "(?s).{0,200}") {
        let (model, skipped) = ErParser::new().parse_with_report(&input);
        let _ = generate(&model);
        let _ = generate_script(&model, Dialect::MySql);
        for line in &skipped {
            prop_assert!(line.line >= 1);
            prop_assert!(line.column >= 1);
        }
    }

    #[test]
    fn parsed_flags_follow_primary_key(line in "[a-z]{1,6} [a-z]{1,6}( PK)?( FK)?( UNIQUE)?") {
        let column = erdwright::plugins::er::parse_column(&line);
        if column.is_primary_key {
            prop_assert!(column.is_not_null && column.is_unique);
        }
        prop_assert_eq!(column.is_foreign_key, line.contains("FK"));
    }
}
