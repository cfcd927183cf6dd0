//! ER diagram plugin
//!
//! Mermaid-style `erDiagram` notation: tables in braces with typed columns,
//! and crow's-foot relationship lines between them.

mod chumsky_parser;
mod data_types;
mod database;
mod detector;
mod diagnostics;
mod parser;
mod renderer;
mod sample;
mod summary;

pub use chumsky_parser::{normalize_label, CrowsFoot};
pub use data_types::*;
pub use database::*;
pub use detector::*;
pub use diagnostics::*;
pub use parser::*;
pub use renderer::*;
pub use sample::*;
pub use summary::*;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::core::{Database, Detector, Parser, Renderer};

    #[test]
    fn test_full_pipeline() {
        let detector = ErDetector::new();
        let parser = ErParser::new();
        let mut model = SchemaModel::new();
        let renderer = NotationRenderer::new();

        assert!(detector.detect(SAMPLE_DIAGRAM));
        parser.parse(SAMPLE_DIAGRAM, &mut model).unwrap();
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.edge_count(), 2);

        let output = renderer.render(&model).unwrap();
        assert!(detector.detect(&output));
        let reparsed = parser.parse_model(&output);
        assert!(reparsed.content_eq(&parser.parse_model(&renderer.render(&reparsed).unwrap())));
    }

    #[test]
    fn test_edit_then_render() {
        let mut model = SchemaModel::sample();
        let customer = model.tables[0].id.clone();
        let id = model
            .add_column(&customer, Column::new("id", "int").with_flag(ColumnFlag::PrimaryKey))
            .unwrap()
            .id
            .clone();
        model.set_default_value(&customer, &id, Some("1".to_string())).unwrap();

        let output = NotationRenderer::new().render_model(&model);
        assert!(output.contains("        int id PK DEFAULT 1\n"));
        assert!(output.contains("    CUSTOMER ||--o{ ORDER : \"places\"\n"));
    }
}
