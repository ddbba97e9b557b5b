//! The assembled result of parsing all six query options.

use super::expression::Expression;
use super::path::PropertyPath;
use serde::{Serialize, Serializer};
use std::fmt;

/// One of the six supported query options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryPart {
    Filter,
    OrderBy,
    Top,
    Skip,
    Select,
    Expand,
}

impl QueryPart {
    /// All parts, in the order they are parsed and validated.
    pub const ALL: [QueryPart; 6] = [
        QueryPart::Filter,
        QueryPart::OrderBy,
        QueryPart::Top,
        QueryPart::Skip,
        QueryPart::Select,
        QueryPart::Expand,
    ];

    /// Lowercase option name without the `$` prefix.
    pub fn name(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::OrderBy => "orderby",
            Self::Top => "top",
            Self::Skip => "skip",
            Self::Select => "select",
            Self::Expand => "expand",
        }
    }

    /// Query string key for this option, e.g. `$filter`.
    pub fn param_key(self) -> &'static str {
        match self {
            Self::Filter => "$filter",
            Self::OrderBy => "$orderby",
            Self::Top => "$top",
            Self::Skip => "$skip",
            Self::Select => "$select",
            Self::Expand => "$expand",
        }
    }

    /// Looks up a part by its query string key.
    pub fn from_param_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.param_key() == key)
    }
}

impl fmt::Display for QueryPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort direction for an `$orderby` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// A single `$orderby` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderByTerm {
    pub property: PropertyPath,
    pub direction: SortDirection,
}

impl OrderByTerm {
    pub fn new(property: PropertyPath, direction: SortDirection) -> Self {
        Self {
            property,
            direction,
        }
    }
}

/// A single `$select` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectTerm {
    /// `*`
    Wildcard,
    Property(PropertyPath),
}

impl fmt::Display for SelectTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Property(path) => write!(f, "{path}"),
        }
    }
}

impl Serialize for SelectTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Wildcard => serializer.serialize_str("*"),
            Self::Property(path) => path.serialize(serializer),
        }
    }
}

/// All six query options, parsed.
///
/// Built once by the assembler and never modified afterwards; validation
/// reads it and returns a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedQuery {
    pub filter: Option<Expression>,
    #[serde(rename = "orderby")]
    pub order_by: Vec<OrderByTerm>,
    pub top: Option<u64>,
    pub skip: Option<u64>,
    pub select: Vec<SelectTerm>,
    pub expand: Vec<PropertyPath>,
}

impl ParsedQuery {
    /// Returns true when no option carries a value.
    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
            && self.order_by.is_empty()
            && self.top.is_none()
            && self.skip.is_none()
            && self.select.is_empty()
            && self.expand.is_empty()
    }
}
