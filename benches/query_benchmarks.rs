//! Query option parsing and validation benchmarks.
//!
//! - **filters**: lexing and parsing `$filter` expressions of growing size
//! - **list_options**: `$orderby`, `$select` and `$expand` list parsing
//! - **full_pipeline**: all six options parsed and validated together
//!
//! ```bash
//! cargo bench
//! cargo bench filters
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use odata_query::lexer::tokenize;
use odata_query::parser::{parse_filter, parse_order_by, parse_select};
use odata_query::semantic::{InMemorySchema, Type};
use odata_query::{RawQuery, parse_and_validate};

fn schema() -> InMemorySchema {
    InMemorySchema::new()
        .with_property("user/id", Type::Number)
        .with_property("user/fname", Type::String)
        .with_property("user/lname", Type::String)
        .with_property("user/age", Type::Number)
        .with_property("user/active", Type::Boolean)
        .with_property("user/address", Type::String)
        .with_standard_functions()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    let filters = vec![
        ("single_comparison", "user/id eq 7".to_string()),
        (
            "logical",
            "user/fname eq 'Bob' and (user/age ge 21 or user/active eq true)".to_string(),
        ),
        (
            "functions",
            "startswith(tolower(user/fname), 'bo') and length(user/lname) gt 3".to_string(),
        ),
        (
            "wide_or_chain",
            (0..100)
                .map(|i| format!("user/id eq {i}"))
                .collect::<Vec<_>>()
                .join(" or "),
        ),
        (
            "deep_parentheses",
            format!("{}user/id eq 1{}", "(".repeat(100), ")".repeat(100)),
        ),
    ];

    for (name, filter) in &filters {
        group.throughput(Throughput::Bytes(filter.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", name), filter, |b, f| {
            b.iter(|| tokenize(black_box(f)));
        });
        group.bench_with_input(BenchmarkId::new("parse", name), filter, |b, f| {
            b.iter(|| parse_filter(black_box(f)));
        });
    }

    group.finish();
}

fn bench_list_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_options");

    let order_by = (0..50)
        .map(|i| format!("user/field{i} {}", if i % 2 == 0 { "asc" } else { "desc" }))
        .collect::<Vec<_>>()
        .join(", ");
    let select = (0..50)
        .map(|i| format!("user/field{i}"))
        .collect::<Vec<_>>()
        .join(",");

    group.bench_function("orderby_50", |b| b.iter(|| parse_order_by(black_box(&order_by))));
    group.bench_function("select_50", |b| b.iter(|| parse_select(black_box(&select))));

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let schema = schema();
    let raw = RawQuery::new()
        .with_filter("user/fname eq 'Bob' and user/age ge 21 and not (user/active eq false)")
        .with_order_by("user/lname desc, user/fname")
        .with_top("25")
        .with_skip("50")
        .with_select("user/id, user/fname, user/lname")
        .with_expand("user/address");

    c.bench_function("full_pipeline/parse_and_validate", |b| {
        b.iter(|| parse_and_validate(black_box(&raw), &schema, &schema));
    });

    c.bench_function("full_pipeline/from_query_string", |b| {
        b.iter(|| {
            RawQuery::from_query_string(black_box(
                "$filter=user%2Fid%20eq%207&$orderby=user%2Flname%20desc&$top=10",
            ))
        });
    });
}

criterion_group!(benches, bench_filters, bench_list_options, bench_full_pipeline);
criterion_main!(benches);
