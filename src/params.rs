//! Raw query option text, as extracted from a request.

use crate::ast::QueryPart;

/// Source of the six raw option strings.
///
/// Each accessor returns the option's raw value, or `""` when it was not
/// supplied.
pub trait QueryParams {
    fn filter(&self) -> &str;
    fn order_by(&self) -> &str;
    fn top(&self) -> &str;
    fn skip(&self) -> &str;
    fn select(&self) -> &str;
    fn expand(&self) -> &str;

    /// Returns the raw value for `part`.
    fn get(&self, part: QueryPart) -> &str {
        match part {
            QueryPart::Filter => self.filter(),
            QueryPart::OrderBy => self.order_by(),
            QueryPart::Top => self.top(),
            QueryPart::Skip => self.skip(),
            QueryPart::Select => self.select(),
            QueryPart::Expand => self.expand(),
        }
    }
}

/// Owned raw option strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    filter: String,
    order_by: String,
    top: String,
    skip: String,
    select: String,
    expand: String,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects options from `$`-prefixed key/value pairs.
    ///
    /// Unknown keys are ignored; when a key repeats, the last value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            if let Some(part) = QueryPart::from_param_key(key.as_ref()) {
                raw.set(part, value);
            }
        }
        raw
    }

    /// Decodes an `application/x-www-form-urlencoded` query string such as
    /// `$filter=name%20eq%20'x'&$top=5`.
    pub fn from_query_string(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Sets the raw value for `part`.
    pub fn set(&mut self, part: QueryPart, value: impl Into<String>) {
        let slot = match part {
            QueryPart::Filter => &mut self.filter,
            QueryPart::OrderBy => &mut self.order_by,
            QueryPart::Top => &mut self.top,
            QueryPart::Skip => &mut self.skip,
            QueryPart::Select => &mut self.select,
            QueryPart::Expand => &mut self.expand,
        };
        *slot = value.into();
    }

    pub fn with_filter(mut self, value: impl Into<String>) -> Self {
        self.filter = value.into();
        self
    }

    pub fn with_order_by(mut self, value: impl Into<String>) -> Self {
        self.order_by = value.into();
        self
    }

    pub fn with_top(mut self, value: impl Into<String>) -> Self {
        self.top = value.into();
        self
    }

    pub fn with_skip(mut self, value: impl Into<String>) -> Self {
        self.skip = value.into();
        self
    }

    pub fn with_select(mut self, value: impl Into<String>) -> Self {
        self.select = value.into();
        self
    }

    pub fn with_expand(mut self, value: impl Into<String>) -> Self {
        self.expand = value.into();
        self
    }
}

impl QueryParams for RawQuery {
    fn filter(&self) -> &str {
        &self.filter
    }

    fn order_by(&self) -> &str {
        &self.order_by
    }

    fn top(&self) -> &str {
        &self.top
    }

    fn skip(&self) -> &str {
        &self.skip
    }

    fn select(&self) -> &str {
        &self.select
    }

    fn expand(&self) -> &str {
        &self.expand
    }
}
