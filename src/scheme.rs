//! URI scheme component.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::ComponentError;
use crate::pct::{ALPHA, CharSet, DIGIT};

/// Characters allowed after the first letter of a scheme.
pub(crate) const SCHEME_CHARS: CharSet = ALPHA.or(DIGIT).or(CharSet::new(b"+-."));

/// A validated URI scheme, stored in lowercase.
///
/// # Examples
///
/// ```
/// use swim_uri::Scheme;
///
/// let scheme = Scheme::parse("HTTPS").unwrap();
/// assert_eq!(scheme.as_str(), "https");
/// assert!(Scheme::parse("1http").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scheme(String);

impl Scheme {
    /// Parses a scheme name, folding it to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidScheme`] if the name is empty, does not
    /// start with a letter, or contains characters other than letters, digits,
    /// `+`, `-` and `.`.
    pub fn parse(name: &str) -> Result<Self, ComponentError> {
        match Self::invalid_position(name) {
            None => Ok(Self::from_valid(name)),
            Some(0) if name.is_empty() => Err(ComponentError::InvalidScheme {
                value: name.to_string(),
                reason: "scheme cannot be empty",
            }),
            Some(0) => Err(ComponentError::InvalidScheme {
                value: name.to_string(),
                reason: "scheme must start with a letter",
            }),
            Some(_) => Err(ComponentError::InvalidScheme {
                value: name.to_string(),
                reason: "only letters, digits, '+', '-' and '.' are allowed",
            }),
        }
    }

    /// Returns the lowercase scheme name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the byte offset of the first character breaking the scheme
    /// grammar, or `None` if `name` is a valid scheme.
    pub(crate) fn invalid_position(name: &str) -> Option<usize> {
        let mut chars = name.char_indices();
        match chars.next() {
            Some((_, c)) if ALPHA.allows(c) => {}
            _ => return Some(0),
        }
        chars.find(|&(_, c)| !SCHEME_CHARS.allows(c)).map(|(i, _)| i)
    }

    pub(crate) fn from_valid(name: &str) -> Self {
        Self(name.to_ascii_lowercase())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Scheme {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Scheme {
    type Error = ComponentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for Scheme {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Scheme {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scheme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
