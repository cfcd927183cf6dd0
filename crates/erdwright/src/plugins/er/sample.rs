//! Built-in example diagram

use super::{ErParser, SchemaModel};

/// Customer / order / line-item schema shown to new users
pub const SAMPLE_DIAGRAM: &str = r#"erDiagram
    CUSTOMER {
        string name
        string custNumber
        string sector
    }
    ORDER {
        int orderNumber
        string deliveryAddress
    }
    LINE-ITEM {
        string productCode
        int quantity
        float pricePerUnit
    }
    CUSTOMER ||--o{ ORDER : places
    ORDER ||--|{ LINE-ITEM : contains
"#;

impl SchemaModel {
    /// The parsed [`SAMPLE_DIAGRAM`]
    pub fn sample() -> Self {
        ErParser::new().parse_model(SAMPLE_DIAGRAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses_cleanly() {
        let (model, skipped) = ErParser::new().parse_with_report(SAMPLE_DIAGRAM);
        assert!(skipped.is_empty());
        assert_eq!(model.tables.len(), 3);
        assert_eq!(model.relationships.len(), 2);
        assert_eq!(model.tables[2].name, "LINE-ITEM");
        assert_eq!(model.relationships[1].to_table, "LINE-ITEM");
        assert_eq!(model.relationships[1].to_column, "order_id");
    }
}
