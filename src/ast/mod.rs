//! Intermediate representation of parsed OData query options.

pub mod expression;
pub mod path;
pub mod query;

use std::ops::Range;

/// A byte range in the raw text of a query option.
pub type Span = Range<usize>;

pub use expression::{BinaryOperator, Expression, Literal, UnaryOperator};
pub use path::PropertyPath;
pub use query::{OrderByTerm, ParsedQuery, QueryPart, SelectTerm, SortDirection};
