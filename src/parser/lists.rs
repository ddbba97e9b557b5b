//! Parsers for the list-shaped options: `$orderby`, `$select`, `$expand`,
//! plus the integer options `$top` and `$skip`.
//!
//! List options are comma-separated; each segment is trimmed and empty
//! segments are dropped, so blank input yields an empty list.

use crate::ast::{OrderByTerm, PropertyPath, QueryPart, SelectTerm, SortDirection};
use crate::diag::SyntaxError;
use regex::Regex;
use std::sync::LazyLock;

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:/[A-Za-z0-9]+)*$").expect("path pattern is valid")
});

static ORDER_BY_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z0-9]+(?:/[A-Za-z0-9]+)*)(?:\s+(asc|desc))?$")
        .expect("orderby pattern is valid")
});

/// Splits `raw` on commas, yielding each trimmed, non-empty segment with its
/// byte offset in `raw`.
fn segments(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    raw.split(',').filter_map(move |segment| {
        let start = offset;
        offset += segment.len() + 1;
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            return None;
        }
        let leading = segment.len() - segment.trim_start().len();
        Some((start + leading, trimmed))
    })
}

fn parse_path(part: QueryPart, offset: usize, text: &str) -> Result<PropertyPath, SyntaxError> {
    PropertyPath::parse(text)
        .ok_or_else(|| SyntaxError::new(part, offset, format!("invalid property path '{text}'")))
}

/// Parses `$orderby`, e.g. `user/lname desc, user/fname`.
///
/// The direction keyword is case-insensitive and defaults to ascending.
pub fn parse_order_by(raw: &str) -> Result<Vec<OrderByTerm>, SyntaxError> {
    segments(raw)
        .map(|(offset, segment)| {
            let captures = ORDER_BY_TERM.captures(segment).ok_or_else(|| {
                SyntaxError::new(
                    QueryPart::OrderBy,
                    offset,
                    format!("invalid ordering '{segment}'"),
                )
            })?;

            let path = parse_path(QueryPart::OrderBy, offset, &captures[1])?;
            let direction = match captures.get(2) {
                Some(dir) if dir.as_str().eq_ignore_ascii_case("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
            Ok(OrderByTerm::new(path, direction))
        })
        .collect()
}

/// Parses `$select`; each term is a property path or `*`.
pub fn parse_select(raw: &str) -> Result<Vec<SelectTerm>, SyntaxError> {
    segments(raw)
        .map(|(offset, segment)| {
            if segment == "*" {
                return Ok(SelectTerm::Wildcard);
            }
            if !PATH.is_match(segment) {
                return Err(SyntaxError::new(
                    QueryPart::Select,
                    offset,
                    format!("invalid selection '{segment}'"),
                ));
            }
            parse_path(QueryPart::Select, offset, segment).map(SelectTerm::Property)
        })
        .collect()
}

/// Parses `$expand`; each term is a property path.
pub fn parse_expand(raw: &str) -> Result<Vec<PropertyPath>, SyntaxError> {
    segments(raw)
        .map(|(offset, segment)| {
            if !PATH.is_match(segment) {
                return Err(SyntaxError::new(
                    QueryPart::Expand,
                    offset,
                    format!("invalid expansion '{segment}'"),
                ));
            }
            parse_path(QueryPart::Expand, offset, segment)
        })
        .collect()
}

/// Parses `$top`: blank means absent, otherwise an integer of at least 1.
pub fn parse_top(raw: &str) -> Result<Option<u64>, SyntaxError> {
    let top = parse_unsigned(QueryPart::Top, raw)?;
    match top {
        Some(0) => Err(SyntaxError::unlocated(
            QueryPart::Top,
            "top must be a positive integer",
        )),
        other => Ok(other),
    }
}

/// Parses `$skip`: blank means absent, otherwise a non-negative integer.
pub fn parse_skip(raw: &str) -> Result<Option<u64>, SyntaxError> {
    parse_unsigned(QueryPart::Skip, raw)
}

/// Parses a plain base-10 integer: no sign, no decimal point, and no leading
/// zeros other than `0` itself.
fn parse_unsigned(part: QueryPart, raw: &str) -> Result<Option<u64>, SyntaxError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let invalid = || {
        SyntaxError::unlocated(
            part,
            format!("'{text}' is not a non-negative integer"),
        )
    };

    if !text.bytes().all(|b| b.is_ascii_digit()) || (text.len() > 1 && text.starts_with('0')) {
        return Err(invalid());
    }
    text.parse::<u64>().map(Some).map_err(|_| invalid())
}
