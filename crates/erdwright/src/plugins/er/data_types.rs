//! Column type catalogue offered to editors

/// Type tokens suggested for new columns, grouped string / number / temporal / other
pub const COMMON_DATA_TYPES: &[&str] = &[
    "string",
    "text",
    "varchar",
    "char",
    "nvarchar",
    "nchar",
    "int",
    "integer",
    "bigint",
    "smallint",
    "tinyint",
    "decimal",
    "numeric",
    "float",
    "double",
    "real",
    "date",
    "time",
    "datetime",
    "timestamp",
    "boolean",
    "bit",
    "binary",
    "varbinary",
    "blob",
    "json",
    "jsonb",
    "uuid",
];

/// Catalogue entries containing `query`, case-insensitively, in catalogue order
pub fn filter_data_types(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    COMMON_DATA_TYPES
        .iter()
        .copied()
        .filter(|data_type| data_type.contains(query.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(filter_data_types("").len(), COMMON_DATA_TYPES.len());
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert_eq!(filter_data_types("CHAR"), vec!["varchar", "char", "nvarchar", "nchar"]);
        assert_eq!(filter_data_types("json"), vec!["json", "jsonb"]);
        assert!(filter_data_types("geometry").is_empty());
    }

    #[test]
    fn test_catalogue_groups_stay_in_order() {
        assert_eq!(COMMON_DATA_TYPES.len(), 28);
        let start = |name: &str| COMMON_DATA_TYPES.iter().position(|t| *t == name);
        assert_eq!(start("string"), Some(0));
        assert_eq!(start("int"), Some(6));
        assert_eq!(start("date"), Some(16));
        assert_eq!(start("boolean"), Some(20));
    }
}
