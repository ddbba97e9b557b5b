//! Property paths shared by `$filter`, `$orderby`, `$select` and `$expand`.

use serde::{Serialize, Serializer};
use smol_str::SmolStr;
use std::fmt;

/// A reference to a (possibly nested) property, such as `user/address/state`.
///
/// Paths always hold at least one segment and every segment is a non-empty run
/// of ASCII letters and digits. The canonical form joins segments with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<SmolStr>,
}

impl PropertyPath {
    /// Parses a `/`-separated path as written in a query string.
    ///
    /// Returns `None` if the text is empty or any segment is empty or contains
    /// characters other than ASCII letters and digits.
    pub fn parse(raw: &str) -> Option<Self> {
        let segments = raw
            .split('/')
            .map(|segment| is_segment(segment).then(|| SmolStr::new(segment)))
            .collect::<Option<Vec<_>>>()?;

        Self::from_segments(segments)
    }

    /// Builds a path from already split segments.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let segments: Vec<SmolStr> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || !segments.iter().all(|s| is_segment(s)) {
            return None;
        }
        Some(Self { segments })
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// Number of segments (navigation depth) in this path.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns the canonical dot-joined form, e.g. `user.address.state`.
    pub fn canonical(&self) -> String {
        self.join('.')
    }

    /// Returns the path as written in OData syntax, e.g. `user/address/state`.
    pub fn to_odata(&self) -> String {
        self.join('/')
    }

    fn join(&self, sep: char) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.push_str(segment);
        }
        out
    }
}

/// Returns true if `segment` is a valid path segment.
pub(crate) fn is_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_segment() {
        let path = PropertyPath::parse("name").unwrap();
        assert_eq!(path.segments(), &["name"]);
        assert_eq!(path.canonical(), "name");
    }

    #[test]
    fn parse_nested_path_canonicalizes_with_dots() {
        let path = PropertyPath::parse("user/address/state").unwrap();
        assert_eq!(path.depth(), 3);
        assert_eq!(path.canonical(), "user.address.state");
        assert_eq!(path.to_odata(), "user/address/state");
        assert_eq!(path.to_string(), "user.address.state");
    }

    #[test]
    fn round_trip_replaces_only_slashes() {
        for raw in ["a", "a/b", "A1/b2/C3", "9/x", "user/fname"] {
            let path = PropertyPath::parse(raw).unwrap();
            assert_eq!(path.canonical(), raw.replace('/', "."));
        }
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        for raw in ["", "/", "a/", "/a", "a//b", "a.b", "a b", "a_b", "*", "user/*"] {
            assert!(PropertyPath::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn from_segments_requires_valid_segments() {
        assert!(PropertyPath::from_segments(Vec::<&str>::new()).is_none());
        assert!(PropertyPath::from_segments(["a", ""]).is_none());
        let path = PropertyPath::from_segments(["a", "b"]).unwrap();
        assert_eq!(path, PropertyPath::parse("a/b").unwrap());
    }
}
