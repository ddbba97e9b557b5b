//! Combines the six independently parsed options into a [`ParsedQuery`].

use super::lists::{parse_expand, parse_order_by, parse_select, parse_skip, parse_top};
use super::{ParseConfig, parse_filter_with};
use crate::ast::{ParsedQuery, QueryPart};
use crate::diag::SyntaxError;
use crate::params::QueryParams;
use tracing::{debug, trace};

/// Parses every option of `params` with the default configuration.
pub fn parse_query<P: QueryParams + ?Sized>(params: &P) -> Result<ParsedQuery, SyntaxError> {
    parse_query_with(params, &ParseConfig::default())
}

/// Parses every option of `params`.
///
/// Options are parsed in the fixed order filter, orderby, top, skip, select,
/// expand; the first failure is returned.
pub fn parse_query_with<P: QueryParams + ?Sized>(
    params: &P,
    config: &ParseConfig,
) -> Result<ParsedQuery, SyntaxError> {
    let result = assemble(params, config);
    match &result {
        Ok(query) => debug!(empty = query.is_empty(), "parsed query options"),
        Err(err) => debug!(part = %err.part, error = %err.message, "query option rejected"),
    }
    result
}

fn assemble<P: QueryParams + ?Sized>(
    params: &P,
    config: &ParseConfig,
) -> Result<ParsedQuery, SyntaxError> {
    Ok(ParsedQuery {
        filter: traced(QueryPart::Filter, parse_filter_with(params.filter(), config))?,
        order_by: traced(QueryPart::OrderBy, parse_order_by(params.order_by()))?,
        top: traced(QueryPart::Top, parse_top(params.top()))?,
        skip: traced(QueryPart::Skip, parse_skip(params.skip()))?,
        select: traced(QueryPart::Select, parse_select(params.select()))?,
        expand: traced(QueryPart::Expand, parse_expand(params.expand()))?,
    })
}

fn traced<T>(part: QueryPart, result: Result<T, SyntaxError>) -> Result<T, SyntaxError> {
    if result.is_ok() {
        trace!(%part, "parsed option");
    }
    result
}

/// Parses the six raw option strings directly.
pub fn parse_query_parts(
    filter: &str,
    order_by: &str,
    top: &str,
    skip: &str,
    select: &str,
    expand: &str,
) -> Result<ParsedQuery, SyntaxError> {
    let params = crate::params::RawQuery::new()
        .with_filter(filter)
        .with_order_by(order_by)
        .with_top(top)
        .with_skip(skip)
        .with_select(select)
        .with_expand(expand);
    parse_query(&params)
}
