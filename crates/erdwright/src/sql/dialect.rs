//! Target SQL dialects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ErdError;

/// MIME type for downloaded schema scripts
pub const SCRIPT_MIME_TYPE: &str = "text/sql";

/// SQL dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    PostgreSql,
    Sqlite,
    SqlServer,
    Oracle,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::MySql,
        Dialect::PostgreSql,
        Dialect::Sqlite,
        Dialect::SqlServer,
        Dialect::Oracle,
    ];

    /// Lower-case identifier used on the command line and in file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite",
            Self::SqlServer => "sqlserver",
            Self::Oracle => "oracle",
        }
    }

    /// Human-readable product name.
    pub fn label(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
            Self::Sqlite => "SQLite",
            Self::SqlServer => "SQL Server",
            Self::Oracle => "Oracle",
        }
    }

    /// `schema_<dialect>.sql`
    pub fn script_file_name(self) -> String {
        format!("schema_{}.sql", self.name())
    }

    /// Wrap an identifier in this dialect's delimiters.
    ///
    /// Oracle identifiers are upper-cased. Embedded delimiters are not escaped.
    pub fn quote(self, identifier: &str) -> String {
        match self {
            Self::MySql => format!("`{}`", identifier),
            Self::PostgreSql | Self::Sqlite => format!("\"{}\"", identifier),
            Self::SqlServer => format!("[{}]", identifier),
            Self::Oracle => format!("\"{}\"", identifier.to_uppercase()),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ErdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::PostgreSql),
            "sqlite" => Ok(Self::Sqlite),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "oracle" => Ok(Self::Oracle),
            _ => Err(ErdError::unknown_dialect(s)),
        }
    }
}
