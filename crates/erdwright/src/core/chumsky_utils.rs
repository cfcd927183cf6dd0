//! Shared chumsky parser utilities for diagram parsing
//!
//! Small combinators reused by the line-oriented relationship grammar.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
///
/// Useful for relationship parsers that should not consume statement separators.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just(' ').or(just('\t')).repeated().ignored()
}

/// Parse a Mermaid entity name: letters, digits, `_` and `-`.
///
/// Hyphens are allowed so names such as `LINE-ITEM` survive intact.
pub fn entity_name<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '-')
        .repeated()
        .at_least(1)
        .to_slice()
}

/// Parse an optional `: label` suffix, returning the raw label text.
///
/// The label runs to the end of the line. Surrounding whitespace is
/// trimmed; an empty label yields `None`.
pub fn trailing_label<'src>() -> impl Parser<'src, &'src str, Option<&'src str>> + Clone {
    inline_whitespace()
        .ignore_then(just(':'))
        .ignore_then(any().repeated().to_slice())
        .map(|label: &str| {
            let label = label.trim();
            (!label.is_empty()).then_some(label)
        })
        .or_not()
        .map(Option::flatten)
}
