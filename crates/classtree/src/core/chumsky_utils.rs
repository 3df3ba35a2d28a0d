//! Shared chumsky parser utilities for source scanning
//!
//! Whitespace and identifier combinators matching C-family source text.

use chumsky::prelude::*;

/// Parse optional whitespace of any kind, newlines included.
pub fn optional_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    any()
        .filter(|c: &char| c.is_whitespace())
        .repeated()
        .ignored()
}

/// Parse required whitespace (at least one whitespace character).
pub fn whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    any()
        .filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .ignored()
}

/// Parse a word: one or more alphanumeric or `_` characters.
///
/// Unlike `chumsky::text::ident`, a word may start with a digit.
pub fn word<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice()
}
