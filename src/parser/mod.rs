//! Parsers for OData query options.
//!
//! `$filter` goes through the lexer and a recursive-descent parser; the other
//! options are comma-separated lists or integers handled in [`lists`]. The
//! [`assembler`] runs all six and builds a [`ParsedQuery`](crate::ast::ParsedQuery).

pub mod assembler;
mod base;
mod expression;
pub mod lists;

use crate::ast::Expression;
use crate::diag::SyntaxError;
use crate::lexer::tokenize;
use expression::FilterParser;

pub use assembler::{parse_query, parse_query_parts, parse_query_with};
pub use lists::{parse_expand, parse_order_by, parse_select, parse_skip, parse_top};

/// Limits applied while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum nesting depth of a filter expression tree.
    pub max_depth: usize,
}

impl ParseConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses `$filter` text with the default configuration.
///
/// Blank input means no filter and yields `Ok(None)`.
pub fn parse_filter(source: &str) -> Result<Option<Expression>, SyntaxError> {
    parse_filter_with(source, &ParseConfig::default())
}

/// Parses `$filter` text.
pub fn parse_filter_with(
    source: &str,
    config: &ParseConfig,
) -> Result<Option<Expression>, SyntaxError> {
    if source.trim().is_empty() {
        return Ok(None);
    }
    let tokens = tokenize(source)?;
    FilterParser::new(&tokens, config).parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_is_absent() {
        assert_eq!(parse_filter("").unwrap(), None);
        assert_eq!(parse_filter(" \t\r\n").unwrap(), None);
    }

    #[test]
    fn filter_errors_name_the_filter_part() {
        let err = parse_filter("a eq 'x").unwrap_err();
        assert_eq!(err.part, crate::ast::QueryPart::Filter);
        let err = parse_filter("a eq").unwrap_err();
        assert_eq!(err.part, crate::ast::QueryPart::Filter);
    }

    #[test]
    fn config_builder() {
        assert_eq!(ParseConfig::new().max_depth, ParseConfig::DEFAULT_MAX_DEPTH);
        assert_eq!(ParseConfig::new().with_max_depth(4).max_depth, 4);
    }
}
