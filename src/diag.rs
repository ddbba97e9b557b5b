//! Error types for the parsing and validation phases, with miette rendering.

use crate::ast::{QueryPart, Span};
use miette::{Diagnostic, LabeledSpan, Report, Severity};
use std::fmt;

/// Raw text of a query option does not conform to its grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// The query option that failed to parse.
    pub part: QueryPart,
    /// Byte offset into the raw option text, when known.
    pub offset: Option<usize>,
    /// What went wrong.
    pub message: String,
}

impl SyntaxError {
    /// Creates an error pointing at `offset` in the raw text of `part`.
    pub fn new(part: QueryPart, offset: usize, message: impl Into<String>) -> Self {
        Self {
            part,
            offset: Some(offset),
            message: message.into(),
        }
    }

    /// Creates an error with no known location.
    pub fn unlocated(part: QueryPart, message: impl Into<String>) -> Self {
        Self {
            part,
            offset: None,
            message: message.into(),
        }
    }

    /// Creates a `$filter` error at `offset`.
    pub fn filter(offset: usize, message: impl Into<String>) -> Self {
        Self::new(QueryPart::Filter, offset, message)
    }

    /// The labelled range for rendering: the offset widened to one byte.
    fn label_span(&self) -> Option<Span> {
        self.offset.map(|offset| offset..offset + 1)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to parse {} setting: {}", self.part, self.message)
    }
}

impl std::error::Error for SyntaxError {}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("odata::syntax") as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.label_span()?;
        let label = LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            (span.start, span.end - span.start),
        );
        Some(Box::new(std::iter::once(label)) as Box<dyn Iterator<Item = LabeledSpan>>)
    }
}

/// A syntactically valid query is inconsistent with the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The query option that failed validation.
    pub part: QueryPart,
    /// What went wrong, including any resolver message.
    pub message: String,
}

impl ValidationError {
    pub fn new(part: QueryPart, message: impl Into<String>) -> Self {
        Self {
            part,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {} setting: {}", self.part, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl Diagnostic for ValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("odata::validation") as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }
}

/// Either phase's error, returned by the combined entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    Syntax(SyntaxError),
    Validation(ValidationError),
}

impl QueryError {
    /// The query option the error belongs to.
    pub fn part(&self) -> QueryPart {
        match self {
            Self::Syntax(err) => err.part,
            Self::Validation(err) => err.part,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => err.fmt(f),
            Self::Validation(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl Diagnostic for QueryError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Self::Syntax(err) => err.code(),
            Self::Validation(err) => err.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Self::Syntax(err) => err.labels(),
            Self::Validation(_) => None,
        }
    }
}

impl From<SyntaxError> for QueryError {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

impl From<ValidationError> for QueryError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Raw option text kept alongside an error for rendering.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    /// Creates a source with a display name, e.g. `$filter`.
    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps a span to valid bounds within this source.
    pub fn clamp_span(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// Renders a syntax error as a miette report with the offending text attached.
///
/// Offsets past the end of `source` are clamped so rendering never panics.
pub fn to_report(err: &SyntaxError, source: &SourceFile) -> Report {
    let clamped = SyntaxError {
        offset: err.label_span().map(|span| source.clamp_span(&span).start),
        ..err.clone()
    };
    let report = Report::new(clamped);
    match source.name() {
        Some(name) => report.with_source_code(miette::NamedSource::new(
            name,
            source.content().to_string(),
        )),
        None => report.with_source_code(source.content().to_string()),
    }
}
