//! Query component as an ordered list of optionally keyed parts.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::parser;
use crate::serializer;

/// Prefix of the synthesized keys in [`Query::keyed`].
const POSITIONAL_PREFIX: char = '$';

/// Query parameters from a URI.
///
/// Parts keep their input order and duplicates. A part without `=` is a
/// bare part and has no key. An empty query has no parts and is rendered
/// without a `?`.
///
/// # Examples
///
/// ```
/// use swim_uri::Query;
///
/// let query = Query::parse("a&a=b&b").unwrap();
/// assert_eq!(query.len(), 3);
/// assert_eq!(query.get("a"), Some("b"));
/// assert_eq!(
///     query.iter().collect::<Vec<_>>(),
///     [(None, "a"), (Some("a"), "b"), (None, "b")]
/// );
/// assert_eq!(query.to_string(), "a&a=b&b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    parts: Vec<(Option<String>, String)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Builds a query from decoded `(key, value)` pairs; `None` keys are bare parts.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Option<K>, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            parts: pairs
                .into_iter()
                .map(|(key, value)| (key.map(Into::into), value.into()))
                .collect(),
        }
    }

    /// Builds a query from the positional-key view produced by [`Query::keyed`].
    ///
    /// Keys of the form `$<digits>` become bare parts and keys starting with
    /// `$$` lose one leading `$`. Every other key is used as is.
    pub fn from_keyed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            parts: pairs
                .into_iter()
                .map(|(key, value)| (unescape_key(key.as_ref()), value.into()))
                .collect(),
        }
    }

    /// Parses a percent-encoded query string (without the leading `?`).
    ///
    /// The empty string is a single bare part with an empty value, as in `"?"`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text contains `#` or an invalid percent escape.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parser::parse_query(input).map_err(|kind| ParseError::new(input, kind))
    }

    pub(crate) const fn from_parts(parts: Vec<(Option<String>, String)>) -> Self {
        Self { parts }
    }

    /// Returns the value of the first part keyed `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(k, _)| k.as_deref() == Some(key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the values of every part keyed `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.parts
            .iter()
            .filter(move |(k, _)| k.as_deref() == Some(key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the query has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns an iterator over `(key, value)` parts in order.
    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &str)> {
        self.parts.iter().map(|(k, v)| (k.as_deref(), v.as_str()))
    }

    /// Returns a new query with a keyed part appended.
    #[must_use]
    pub fn appended(&self, key: &str, value: &str) -> Self {
        let mut query = self.clone();
        query.parts.push((Some(key.to_string()), value.to_string()));
        query
    }

    /// Returns a new query with a bare part appended.
    #[must_use]
    pub fn appended_bare(&self, value: &str) -> Self {
        let mut query = self.clone();
        query.parts.push((None, value.to_string()));
        query
    }

    /// Returns every part with a string key.
    ///
    /// Bare parts get the positional key `$<index>`, where `index` is the
    /// part's position in the query. Literal keys starting with `$` are
    /// escaped as `$$...` so they never collide with positional keys.
    ///
    /// ```
    /// use swim_uri::Query;
    ///
    /// let query = Query::parse("a&$0=x&k=v").unwrap();
    /// let keyed = query.keyed();
    /// assert_eq!(
    ///     keyed,
    ///     [
    ///         ("$0".to_string(), "a"),
    ///         ("$$0".to_string(), "x"),
    ///         ("k".to_string(), "v"),
    ///     ]
    /// );
    /// assert_eq!(Query::from_keyed(keyed), query);
    /// ```
    #[must_use]
    pub fn keyed(&self) -> Vec<(String, &str)> {
        self.parts
            .iter()
            .enumerate()
            .map(|(index, (key, value))| {
                let key = match key {
                    None => format!("{POSITIONAL_PREFIX}{index}"),
                    Some(k) if k.starts_with(POSITIONAL_PREFIX) => format!("{POSITIONAL_PREFIX}{k}"),
                    Some(k) => k.clone(),
                };
                (key, value.as_str())
            })
            .collect()
    }
}

fn unescape_key(key: &str) -> Option<String> {
    let Some(rest) = key.strip_prefix(POSITIONAL_PREFIX) else {
        return Some(key.to_string());
    };
    if rest.starts_with(POSITIONAL_PREFIX) {
        Some(rest.to_string())
    } else if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        Some(key.to_string())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        serializer::write_query(&mut out, self);
        f.write_str(&out)
    }
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K, V> FromIterator<(Option<K>, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (Option<K>, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
