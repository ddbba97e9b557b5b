//! Parsing and validation demonstration
//!
//! Decodes a few query strings, validates them against an in-memory schema and
//! prints either the parsed query as JSON or a rendered diagnostic.

use odata_query::diag::{SourceFile, to_report};
use odata_query::semantic::{InMemorySchema, Type};
use odata_query::{QueryError, QueryParams, RawQuery, parse_and_validate};

fn main() {
    println!("=== Parse and Validate Demo ===\n");

    let schema = InMemorySchema::new()
        .with_property("user/id", Type::Number)
        .with_property("user/fname", Type::String)
        .with_property("user/lname", Type::String)
        .with_property("user/active", Type::Boolean)
        .with_property("user/address", Type::String)
        .with_standard_functions();

    let samples = [
        (
            "Valid query",
            "$filter=startswith(user%2Ffname,'Bo')%20and%20user%2Factive%20eq%20true\
             &$orderby=user%2Flname%20desc&$top=10&$select=*&$expand=user%2Faddress",
        ),
        ("Missing operator", "$filter=(a%2Fb%20'MD')"),
        ("Bad skip", "$skip=blah"),
        ("Type mismatch", "$filter=user%2Fid%20eq%20'7'"),
        ("Arithmetic", "$filter=user%2Fid%20add%201%20gt%202"),
    ];

    for (title, query_string) in samples {
        println!("--- {title} ---");
        println!("  {query_string}");

        let raw = match RawQuery::from_query_string(query_string) {
            Ok(raw) => raw,
            Err(err) => {
                println!("✗ Could not decode query string: {err}\n");
                continue;
            }
        };

        match parse_and_validate(&raw, &schema, &schema) {
            Ok(query) => match serde_json::to_string_pretty(&query) {
                Ok(json) => println!("✓ Query is valid:\n{json}"),
                Err(err) => println!("✗ Could not serialize query: {err}"),
            },
            Err(QueryError::Syntax(err)) => {
                let source = SourceFile::with_name(raw.get(err.part), err.part.param_key());
                println!("{:?}", to_report(&err, &source));
            }
            Err(err) => println!("✗ {err}"),
        }
        println!();
    }
}
