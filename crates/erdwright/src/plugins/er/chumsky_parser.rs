//! Relationship grammar using chumsky
//!
//! Parses a single relationship line such as `CUSTOMER ||--o{ ORDER : places`
//! into a statement that can be turned into a [`Relationship`].

use super::{Relationship, RelationshipKind};
use crate::core::chumsky_utils::{entity_name, inline_whitespace, trailing_label};
use anyhow::Result;
use chumsky::prelude::*;

/// Crow's-foot symbols understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrowsFoot {
    /// `||--o{`
    OneToZeroOrMore,
    /// `||--|{`
    OneToOneOrMore,
    /// `||--||`
    OneToOne,
    /// `}o--o{`
    ManyToMany,
    /// `}o--||`, the "one" side is on the right
    ManyToOne,
}

impl CrowsFoot {
    pub const ALL: [CrowsFoot; 5] = [
        CrowsFoot::OneToZeroOrMore,
        CrowsFoot::OneToOneOrMore,
        CrowsFoot::OneToOne,
        CrowsFoot::ManyToMany,
        CrowsFoot::ManyToOne,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            CrowsFoot::OneToZeroOrMore => "||--o{",
            CrowsFoot::OneToOneOrMore => "||--|{",
            CrowsFoot::OneToOne => "||--||",
            CrowsFoot::ManyToMany => "}o--o{",
            CrowsFoot::ManyToOne => "}o--||",
        }
    }

    pub fn kind(self) -> RelationshipKind {
        match self {
            CrowsFoot::OneToZeroOrMore | CrowsFoot::OneToOneOrMore | CrowsFoot::ManyToOne => {
                RelationshipKind::OneToMany
            }
            CrowsFoot::OneToOne => RelationshipKind::OneToOne,
            CrowsFoot::ManyToMany => RelationshipKind::ManyToMany,
        }
    }

    /// True when the right-hand entity is the referenced side
    pub fn is_reversed(self) -> bool {
        matches!(self, CrowsFoot::ManyToOne)
    }
}

/// A parsed relationship line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipStatement {
    pub left: String,
    pub symbol: CrowsFoot,
    pub right: String,
    pub label: Option<String>,
}

impl RelationshipStatement {
    /// Convert to a relationship with inferred columns and no id
    pub fn into_relationship(self) -> Relationship {
        let (from, to) = if self.symbol.is_reversed() {
            (self.right, self.left)
        } else {
            (self.left, self.right)
        };
        let mut relationship = Relationship::inferred(from, to, self.symbol.kind());
        relationship.label = self.label;
        relationship
    }
}

/// Chumsky-based relationship parser
pub struct ChumskyErParser;

impl ChumskyErParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one trimmed relationship line
    pub fn parse_relationship(&self, input: &str) -> Result<RelationshipStatement> {
        Self::relationship_parser()
            .parse(input)
            .into_result()
            .map_err(|errors| anyhow::anyhow!("Parse errors: {:?}", errors))
    }

    fn crows_foot_parser<'src>() -> impl Parser<'src, &'src str, CrowsFoot> + Clone {
        choice((
            just("||--o{").to(CrowsFoot::OneToZeroOrMore),
            just("||--|{").to(CrowsFoot::OneToOneOrMore),
            just("||--||").to(CrowsFoot::OneToOne),
            just("}o--o{").to(CrowsFoot::ManyToMany),
            just("}o--||").to(CrowsFoot::ManyToOne),
        ))
    }

    /// `LEFT <symbol> RIGHT [: label]`, anything else after RIGHT is ignored
    fn relationship_parser<'src>() -> impl Parser<'src, &'src str, RelationshipStatement> + Clone
    {
        entity_name()
            .then_ignore(inline_whitespace())
            .then(Self::crows_foot_parser())
            .then_ignore(inline_whitespace())
            .then(entity_name())
            .then(trailing_label())
            .then_ignore(any().repeated())
            .then_ignore(end())
            .map(|(((left, symbol), right), label)| RelationshipStatement {
                left: left.to_string(),
                symbol,
                right: right.to_string(),
                label: label.and_then(normalize_label),
            })
    }
}

impl Default for ChumskyErParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim, drop one layer of surrounding double quotes, and discard empties
pub fn normalize_label(raw: &str) -> Option<String> {
    let label = raw.trim();
    let label = if label.len() >= 2 && label.starts_with('"') && label.ends_with('"') {
        label[1..label.len() - 1].trim()
    } else {
        label
    };
    (!label.is_empty()).then(|| label.to_string())
}
