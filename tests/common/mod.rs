//! Shared fixtures for the integration tests.
//!
//! - [`user_schema`] - schema used by the validation scenarios
//! - [`parse_filter_ok`] / [`parse_filter_err`] - filter parsing with readable panics
//! - [`to_json`] - serialized shape of a parsed value

#![allow(dead_code)]

use odata_query::ast::Expression;
use odata_query::diag::SyntaxError;
use odata_query::parser::parse_filter;
use odata_query::semantic::{InMemorySchema, Type};
use serde::Serialize;

/// A small user schema with the standard functions registered.
pub fn user_schema() -> InMemorySchema {
    InMemorySchema::new()
        .with_property("user/id", Type::Number)
        .with_property("user/fname", Type::String)
        .with_property("user/lname", Type::String)
        .with_property("user/age", Type::Number)
        .with_property("user/active", Type::Boolean)
        .with_property("user/address", Type::String)
        .with_property("user/address/city", Type::String)
        .with_property("user/phone", Type::String)
        .with_collection("user/tags", Type::String)
        .with_standard_functions()
}

/// Parses a non-blank filter, panicking with the error on failure.
pub fn parse_filter_ok(source: &str) -> Expression {
    match parse_filter(source) {
        Ok(Some(expr)) => expr,
        Ok(None) => panic!("filter `{source}` parsed as absent"),
        Err(err) => panic!("filter `{source}` failed to parse: {err}"),
    }
}

/// Parses a filter that is expected to fail.
pub fn parse_filter_err(source: &str) -> SyntaxError {
    match parse_filter(source) {
        Ok(result) => panic!("filter `{source}` unexpectedly parsed: {result:?}"),
        Err(err) => err,
    }
}

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).expect("value serializes")
}
