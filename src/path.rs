//! Path component as a sequence of separator and segment tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::parser;
use crate::serializer;

/// One token of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathToken {
    /// A `/` separator
    Separator,
    /// A non-empty, percent-decoded segment
    Segment(String),
}

impl PathToken {
    /// Returns the decoded segment text, or `None` for a separator.
    #[must_use]
    pub fn as_segment(&self) -> Option<&str> {
        match self {
            Self::Separator => None,
            Self::Segment(s) => Some(s),
        }
    }

    /// Returns true for a `/` separator.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}

/// The path of a URI.
///
/// Separators are kept as explicit tokens, so `/one/two`, `one/two` and
/// `one/` are all distinguishable. Segments are never empty and never
/// adjacent; an empty path has no tokens.
///
/// # Examples
///
/// ```
/// use swim_uri::{Path, PathToken};
///
/// let path = Path::from_tokens(["/", "one", "/", "two", "/"]);
/// assert!(path.is_absolute());
/// assert_eq!(path.segments().collect::<Vec<_>>(), ["one", "two"]);
/// assert_eq!(path.tokens().len(), 5);
/// assert_eq!(path.to_string(), "/one/two/");
///
/// let path = Path::parse("a%20b/c").unwrap();
/// assert_eq!(path.tokens()[0], PathToken::Segment("a b".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    tokens: Vec<PathToken>,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub const fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Builds a path from decoded tokens.
    ///
    /// The string `"/"` is a separator; any other string is segment text.
    /// Empty strings are skipped and adjacent segments are joined. Use
    /// [`Path::appended_segment`] for a segment that is literally `"/"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use swim_uri::{Path, PathToken};
    ///
    /// // Without a "/" between them, "a" and "b" become one segment.
    /// let joined = Path::from_tokens(["a", "b"]);
    /// assert_eq!(joined.tokens(), [PathToken::Segment("ab".to_string())]);
    ///
    /// let split = Path::from_tokens(["a", "/", "b"]);
    /// assert_eq!(split.segments().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| match token.as_ref() {
                "/" => PathToken::Separator,
                segment => PathToken::Segment(segment.to_string()),
            })
            .collect()
    }

    /// Parses a percent-encoded path such as `/a/b%20c`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text contains `?`, `#`, or an invalid
    /// percent escape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parser::parse_path(input).map_err(|kind| ParseError::new(input, kind))
    }

    /// Returns the tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// Returns an iterator over the decoded segments, skipping separators.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(PathToken::as_segment)
    }

    /// Returns true if the path has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns true if the path starts with `/`.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.tokens.first().is_some_and(PathToken::is_separator)
    }

    /// Returns true if the path is non-empty and does not start with `/`.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.is_empty() && !self.is_absolute()
    }

    /// Returns a new path with `segment` appended as segment text.
    #[must_use]
    pub fn appended_segment(&self, segment: &str) -> Self {
        let mut path = self.clone();
        path.push(PathToken::Segment(segment.to_string()));
        path
    }

    /// Returns a new path with a trailing separator appended.
    #[must_use]
    pub fn appended_separator(&self) -> Self {
        let mut path = self.clone();
        path.push(PathToken::Separator);
        path
    }

    pub(crate) fn push(&mut self, token: PathToken) {
        match token {
            PathToken::Segment(segment) if segment.is_empty() => {}
            PathToken::Segment(segment) => match self.tokens.last_mut() {
                Some(PathToken::Segment(last)) => last.push_str(&segment),
                _ => self.tokens.push(PathToken::Segment(segment)),
            },
            PathToken::Separator => self.tokens.push(PathToken::Separator),
        }
    }
}

impl FromIterator<PathToken> for Path {
    fn from_iter<T: IntoIterator<Item = PathToken>>(iter: T) -> Self {
        let mut path = Self::empty();
        for token in iter {
            path.push(token);
        }
        path
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        serializer::write_path(&mut out, self);
        f.write_str(&out)
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: &str) -> PathToken {
        PathToken::Segment(s.to_string())
    }

    #[test]
    fn from_tokens_absolute() {
        let path = Path::from_tokens(["/", "one", "/", "two"]);
        assert_eq!(
            path.tokens(),
            [PathToken::Separator, seg("one"), PathToken::Separator, seg("two")]
        );
        assert!(path.is_absolute());
        assert!(!path.is_relative());
    }

    #[test]
    fn from_tokens_relative_with_trailing_slash() {
        let path = Path::from_tokens(["one", "/"]);
        assert_eq!(path.tokens(), [seg("one"), PathToken::Separator]);
        assert!(path.is_relative());
    }

    #[test]
    fn from_tokens_skips_empty_and_joins_adjacent() {
        let path = Path::from_tokens(["", "a", "b", "", "/", ""]);
        assert_eq!(path.tokens(), [seg("ab"), PathToken::Separator]);
    }

    #[test]
    fn empty_path() {
        let path = Path::empty();
        assert!(path.is_empty());
        assert!(!path.is_absolute());
        assert!(!path.is_relative());
        assert_eq!(path, Path::default());
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn appended_segment_can_hold_a_slash() {
        let path = Path::from_tokens(["/"]).appended_segment("/");
        assert_eq!(path.tokens(), [PathToken::Separator, seg("/")]);
        assert_eq!(path.to_string(), "/%2F");
    }

    #[test]
    fn appended_separator() {
        let path = Path::from_tokens(["a"]).appended_separator().appended_separator();
        assert_eq!(path.to_string(), "a//");
    }

    #[test]
    fn parse_keeps_separators() {
        let path = Path::parse("/a//b/").unwrap();
        assert_eq!(
            path.tokens(),
            [
                PathToken::Separator,
                seg("a"),
                PathToken::Separator,
                PathToken::Separator,
                seg("b"),
                PathToken::Separator,
            ]
        );
    }

    #[test]
    fn parse_decodes_segments() {
        let path = Path::parse("%2F/x%3Fy").unwrap();
        assert_eq!(path.tokens(), [seg("/"), PathToken::Separator, seg("x?y")]);
    }

    #[test]
    fn parse_rejects_query_delimiter() {
        let err = Path::parse("a?b").unwrap_err();
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn display_encodes_segments() {
        let path = Path::from_tokens(["/", "a b", "/", "c?d"]);
        assert_eq!(path.to_string(), "/a%20b/c%3Fd");
    }
}
