//! OData query option parser with schema-driven validation.
//!
//! Parses the six query options `$filter`, `$orderby`, `$top`, `$skip`,
//! `$select` and `$expand` into a [`ParsedQuery`], then checks the result
//! against caller-supplied property and function resolvers.
//!
//! # Example
//!
//! ```
//! use odata_query::semantic::{InMemorySchema, Type};
//! use odata_query::{RawQuery, parse_and_validate};
//!
//! let schema = InMemorySchema::new()
//!     .with_property("user/fname", Type::String)
//!     .with_property("user/lname", Type::String)
//!     .with_standard_functions();
//!
//! let raw = RawQuery::new()
//!     .with_filter("startswith(user/fname, 'Bo') and user/lname ne null")
//!     .with_order_by("user/lname desc")
//!     .with_top("10");
//!
//! let query = parse_and_validate(&raw, &schema, &schema).unwrap();
//! assert_eq!(query.top, Some(10));
//!
//! let bad = RawQuery::new().with_filter("user/fname eq 3");
//! let err = parse_and_validate(&bad, &schema, &schema).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Invalid filter setting: Cannot compare string eq number"
//! );
//! ```

pub mod ast;
pub mod diag;
pub mod lexer;
pub mod params;
pub mod parser;
pub mod semantic;

pub use ast::{Expression, Literal, OrderByTerm, ParsedQuery, PropertyPath, QueryPart, SelectTerm};
pub use diag::{QueryError, SyntaxError, ValidationError};
pub use params::{QueryParams, RawQuery};
pub use parser::{ParseConfig, parse_filter, parse_query};
pub use semantic::{FunctionResolver, PropertyResolver, QueryValidator, Type, ValidationConfig};

/// Parses every option of `params` and validates the result.
pub fn parse_and_validate<P: QueryParams + ?Sized>(
    params: &P,
    properties: &dyn PropertyResolver,
    functions: &dyn FunctionResolver,
) -> Result<ParsedQuery, QueryError> {
    parse_and_validate_with(
        params,
        properties,
        functions,
        &ParseConfig::default(),
        ValidationConfig::default(),
    )
}

/// Like [`parse_and_validate`], with explicit parse and validation limits.
pub fn parse_and_validate_with<P: QueryParams + ?Sized>(
    params: &P,
    properties: &dyn PropertyResolver,
    functions: &dyn FunctionResolver,
    parse_config: &ParseConfig,
    validation_config: ValidationConfig,
) -> Result<ParsedQuery, QueryError> {
    let query = parser::parse_query_with(params, parse_config)?;
    QueryValidator::new(properties, functions)
        .with_config(validation_config)
        .validate(&query)?;
    Ok(query)
}
