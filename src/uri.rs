//! Main URI type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use crate::authority::{Authority, UserInfo};
use crate::error::{ComponentError, ParseError};
use crate::fragment::Fragment;
use crate::host::Host;
use crate::parser::{self, UriParts};
use crate::path::Path;
use crate::query::Query;
use crate::scheme::Scheme;
use crate::serializer;

/// An immutable URI reference.
///
/// Every component is stored decoded and compared structurally. The
/// canonical string is rendered on first use and cached.
///
/// # Structure
///
/// ```text
/// [scheme ":"] ["//" [userinfo "@"] host [":" port]] path ["?" query] ["#" fragment]
/// ```
///
/// # Examples
///
/// ```
/// use swim_uri::Uri;
///
/// let uri = Uri::parse("scheme://domain:80/path?query#fragment").unwrap();
/// assert_eq!(uri.scheme().map(|s| s.as_str()), Some("scheme"));
/// assert_eq!(uri.host().map(|h| h.as_str()), Some("domain"));
/// assert_eq!(uri.port(), Some(80));
/// assert_eq!(uri.path().segments().collect::<Vec<_>>(), ["path"]);
/// assert_eq!(uri.query().iter().collect::<Vec<_>>(), [(None, "query")]);
/// assert_eq!(uri.fragment().map(|f| f.as_str()), Some("fragment"));
///
/// let expected = Uri::scheme_name("scheme")
///     .unwrap()
///     .with_host_name("domain")
///     .with_port_number(80)
///     .with_path(swim_uri::Path::from_tokens(["/", "path"]))
///     .with_query(swim_uri::Query::from_pairs([(None::<&str>, "query")]))
///     .with_fragment_identifier("fragment");
/// assert_eq!(uri, expected);
/// assert_eq!(expected.to_string(), "scheme://domain:80/path?query#fragment");
/// ```
#[derive(Clone, Default)]
pub struct Uri {
    scheme: Option<Scheme>,
    authority: Option<Authority>,
    path: Path,
    query: Query,
    fragment: Option<Fragment>,
    /// Canonical string, rendered on first use
    serialized: OnceLock<String>,
}

impl Uri {
    /// Parses a URI reference.
    ///
    /// The empty string is the empty URI, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The first segment contains `:` but is not a valid scheme
    /// - An IPv6 literal is missing its closing `]` or contains invalid characters
    /// - The port contains non-digits or exceeds `u32::MAX`
    /// - A `%` is not followed by two hex digits, or escapes decode to invalid UTF-8
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match parser::parse(input) {
            Ok(parts) => Ok(Self::from_parts(parts)),
            Err(kind) => {
                debug!(input, %kind, "rejected URI");
                Err(ParseError::new(input, kind))
            }
        }
    }

    fn from_parts(parts: UriParts) -> Self {
        Self {
            scheme: parts.scheme,
            authority: parts.authority,
            path: parts.path,
            query: parts.query,
            fragment: parts.fragment,
            serialized: OnceLock::new(),
        }
    }

    /// Returns the empty URI, which renders as `""`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a URI with only a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidScheme`] if `name` is not a valid scheme.
    pub fn scheme_name(name: &str) -> Result<Self, ComponentError> {
        Self::empty().with_scheme_name(name)
    }

    /// Returns a URI with only an authority holding a registered-name host.
    ///
    /// ```
    /// use swim_uri::Uri;
    ///
    /// assert_eq!(Uri::host_name("").to_string(), "//");
    /// assert_eq!(Uri::host_name("a b").to_string(), "//a%20b");
    /// ```
    #[must_use]
    pub fn host_name(name: &str) -> Self {
        Self::empty().with_host_name(name)
    }

    /// Returns a URI with only an authority holding an IPv4 host.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidIpv4`] if `address` is not a dotted quad.
    pub fn host_ipv4(address: &str) -> Result<Self, ComponentError> {
        Self::empty().with_host_ipv4(address)
    }

    /// Returns a URI with only an authority holding an IPv6 host.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidIpv6`] if `literal` cannot appear in brackets.
    pub fn host_ipv6(literal: &str) -> Result<Self, ComponentError> {
        Self::empty().with_host_ipv6(literal)
    }

    /// Returns a URI with only an authority holding user information.
    #[must_use]
    pub fn username(username: &str, password: Option<&str>) -> Self {
        Self::empty().with_username(username, password)
    }

    /// Returns a URI with only a path; see [`Path::from_tokens`].
    ///
    /// ```
    /// use swim_uri::Uri;
    ///
    /// let uri = Uri::from_path(["/", "one", "/", "two", "/"]);
    /// assert_eq!(uri.to_string(), "/one/two/");
    /// ```
    #[must_use]
    pub fn from_path<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::empty().with_path(Path::from_tokens(tokens))
    }

    /// Returns a URI with only a query; `None` keys are bare parts.
    ///
    /// ```
    /// use swim_uri::Uri;
    ///
    /// let uri = Uri::from_query([(None, "a"), (Some("a"), "b"), (None, "b")]);
    /// assert_eq!(uri.to_string(), "?a&a=b&b");
    /// ```
    #[must_use]
    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Option<K>, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::empty().with_query(Query::from_pairs(pairs))
    }

    /// Returns a URI with only a fragment.
    #[must_use]
    pub fn fragment_identifier(fragment: &str) -> Self {
        Self::empty().with_fragment_identifier(fragment)
    }

    /// Returns the scheme, if present.
    #[must_use]
    pub const fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_ref()
    }

    /// Returns the authority, if the URI contains `//`.
    #[must_use]
    pub const fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// Returns the user information, if present.
    #[must_use]
    pub fn user_info(&self) -> Option<&UserInfo> {
        self.authority.as_ref().and_then(Authority::user_info)
    }

    /// Returns the host, if an authority is present.
    #[must_use]
    pub fn host(&self) -> Option<&Host> {
        self.authority.as_ref().map(Authority::host)
    }

    /// Returns the port, if present.
    #[must_use]
    pub fn port(&self) -> Option<u32> {
        self.authority.as_ref().and_then(Authority::port)
    }

    /// Returns the path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the fragment, if present.
    #[must_use]
    pub const fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Returns true if every component is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
            && self.authority.is_none()
            && self.path.is_empty()
            && self.query.is_empty()
            && self.fragment.is_none()
    }

    /// Returns the canonical URI string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.serialized.get_or_init(|| {
            let mut out = String::new();
            serializer::write_uri(
                &mut out,
                self.scheme.as_ref(),
                self.authority.as_ref(),
                &self.path,
                &self.query,
                self.fragment.as_ref(),
            );
            out
        })
    }

    /// Returns a new URI with the given scheme.
    #[must_use]
    pub fn with_scheme(&self, scheme: Scheme) -> Self {
        self.modified(|uri| uri.scheme = Some(scheme))
    }

    /// Returns a new URI with a scheme parsed from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidScheme`] if `name` is not a valid scheme.
    pub fn with_scheme_name(&self, name: &str) -> Result<Self, ComponentError> {
        Ok(self.with_scheme(Scheme::parse(name)?))
    }

    /// Returns a new URI without a scheme.
    #[must_use]
    pub fn without_scheme(&self) -> Self {
        self.modified(|uri| uri.scheme = None)
    }

    /// Returns a new URI with the given authority.
    #[must_use]
    pub fn with_authority(&self, authority: Authority) -> Self {
        self.modified(|uri| uri.authority = Some(authority))
    }

    /// Returns a new URI without an authority.
    #[must_use]
    pub fn without_authority(&self) -> Self {
        self.modified(|uri| uri.authority = None)
    }

    /// Returns a new URI with the given user information.
    #[must_use]
    pub fn with_user_info(&self, user_info: UserInfo) -> Self {
        self.map_authority(|authority| authority.with_user_info(user_info))
    }

    /// Returns a new URI with user information built from decoded parts.
    ///
    /// ```
    /// use swim_uri::Uri;
    ///
    /// let uri = Uri::host_name("domain").with_username("user", Some("pass"));
    /// assert_eq!(uri.to_string(), "//user:pass@domain");
    /// ```
    #[must_use]
    pub fn with_username(&self, username: &str, password: Option<&str>) -> Self {
        self.with_user_info(UserInfo::new(username, password))
    }

    /// Returns a new URI without user information. An absent authority stays absent.
    #[must_use]
    pub fn without_user_info(&self) -> Self {
        self.modified(|uri| {
            uri.authority = uri.authority.take().map(Authority::without_user_info);
        })
    }

    /// Returns a new URI with the given host.
    #[must_use]
    pub fn with_host(&self, host: Host) -> Self {
        self.map_authority(|authority| authority.with_host(host))
    }

    /// Returns a new URI with a registered-name host.
    #[must_use]
    pub fn with_host_name(&self, name: &str) -> Self {
        self.with_host(Host::name(name))
    }

    /// Returns a new URI with an IPv4 host.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidIpv4`] if `address` is not a dotted quad.
    pub fn with_host_ipv4(&self, address: &str) -> Result<Self, ComponentError> {
        Ok(self.with_host(Host::ipv4(address)?))
    }

    /// Returns a new URI with an IPv6 host.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidIpv6`] if `literal` cannot appear in brackets.
    pub fn with_host_ipv6(&self, literal: &str) -> Result<Self, ComponentError> {
        Ok(self.with_host(Host::ipv6(literal)?))
    }

    /// Returns a new URI with the given port.
    #[must_use]
    pub fn with_port_number(&self, port: u32) -> Self {
        self.map_authority(|authority| authority.with_port(port))
    }

    /// Returns a new URI without a port. An absent authority stays absent.
    #[must_use]
    pub fn without_port(&self) -> Self {
        self.modified(|uri| {
            uri.authority = uri.authority.take().map(Authority::without_port);
        })
    }

    /// Returns a new URI with the given path.
    #[must_use]
    pub fn with_path(&self, path: Path) -> Self {
        self.modified(|uri| uri.path = path)
    }

    /// Returns a new URI with the given query.
    ///
    /// ```
    /// use swim_uri::{Query, Uri};
    ///
    /// let uri = Uri::parse("/chat#top").unwrap();
    /// let updated = uri.with_query(Query::parse("version=2.0").unwrap());
    /// assert_eq!(updated.to_string(), "/chat?version=2.0#top");
    /// ```
    #[must_use]
    pub fn with_query(&self, query: Query) -> Self {
        self.modified(|uri| uri.query = query)
    }

    /// Returns a new URI without a query.
    #[must_use]
    pub fn without_query(&self) -> Self {
        self.with_query(Query::new())
    }

    /// Returns a new URI with the given fragment.
    #[must_use]
    pub fn with_fragment(&self, fragment: Fragment) -> Self {
        self.modified(|uri| uri.fragment = Some(fragment))
    }

    /// Returns a new URI with a fragment built from decoded text.
    #[must_use]
    pub fn with_fragment_identifier(&self, fragment: &str) -> Self {
        self.with_fragment(Fragment::new(fragment))
    }

    /// Returns a new URI without a fragment.
    ///
    /// ```
    /// use swim_uri::Uri;
    ///
    /// let uri = Uri::parse("/a#").unwrap();
    /// assert!(uri.fragment().is_some());
    /// assert_eq!(uri.without_fragment().to_string(), "/a");
    /// ```
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        self.modified(|uri| uri.fragment = None)
    }

    fn map_authority(&self, f: impl FnOnce(Authority) -> Authority) -> Self {
        self.modified(|uri| {
            uri.authority = Some(f(uri.authority.take().unwrap_or_default()));
        })
    }

    /// Copies the components, applies `f`, and leaves the string cache empty.
    fn modified(&self, f: impl FnOnce(&mut Self)) -> Self {
        let mut uri = Self {
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            serialized: OnceLock::new(),
        };
        f(&mut uri);
        uri
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.authority.hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.fragment.hash(state);
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme)
            .field("authority", &self.authority)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .finish()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
