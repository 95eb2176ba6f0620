//! Fragment identifier component.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::ParseError;
use crate::parser;
use crate::serializer;

/// A percent-decoded fragment identifier.
///
/// A URI ending in `#` has an empty fragment, which is distinct from having
/// no fragment at all.
///
/// # Examples
///
/// ```
/// use swim_uri::Fragment;
///
/// let frag = Fragment::parse("sec%201").unwrap();
/// assert_eq!(frag.as_str(), "sec 1");
/// assert_eq!(frag.to_string(), "sec%201");
///
/// let frag = Fragment::new("a#b");
/// assert_eq!(frag.to_string(), "a%23b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Creates a fragment from decoded text.
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self(fragment.to_string())
    }

    /// Parses a percent-encoded fragment (without the leading `#`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text contains an invalid percent escape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parser::parse_fragment(input).map_err(|kind| ParseError::new(input, kind))
    }

    /// Returns the decoded fragment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the fragment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        serializer::write_fragment(&mut out, self);
        f.write_str(&out)
    }
}

impl FromStr for Fragment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Fragment {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialOrd for Fragment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fragment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fragment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fragment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}
