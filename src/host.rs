//! Host component of a URI authority.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ComponentError;
use crate::pct::{CharSet, SUB_DELIMS, UNRESERVED};
use crate::serializer;

/// Characters allowed between the brackets of an IP literal, besides `%`.
const IP_LITERAL_CHARS: CharSet = UNRESERVED.or(SUB_DELIMS).or(CharSet::new(b":"));

/// Returns true if `c` may appear between the brackets of an IP literal.
///
/// `%` is accepted so that zone identifiers such as `fe80::1%25eth0` are
/// kept verbatim.
pub(crate) fn is_ip_literal_char(c: char) -> bool {
    c == '%' || IP_LITERAL_CHARS.allows(c)
}

/// The host of a URI authority.
///
/// IP literals are kept verbatim as they appeared in the input; only
/// registered names are percent-decoded.
///
/// # Examples
///
/// ```
/// use swim_uri::Host;
///
/// let host = Host::ipv4("127.0.0.1").unwrap();
/// assert!(host.is_localhost());
/// assert_eq!(host.to_string(), "127.0.0.1");
///
/// let host = Host::ipv6("::1").unwrap();
/// assert_eq!(host.to_string(), "[::1]");
///
/// let host = Host::name("a b");
/// assert_eq!(host.as_str(), "a b");
/// assert_eq!(host.to_string(), "a%20b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// A registered name, percent-decoded (may be empty)
    Name(String),
    /// Four dot-separated decimal octets (e.g., "192.168.1.1")
    Ipv4(String),
    /// The text between `[` and `]` (e.g., `::1`)
    Ipv6(String),
}

impl Host {
    /// Creates a registered-name host from decoded text.
    #[must_use]
    pub fn name(name: &str) -> Self {
        Self::Name(name.to_string())
    }

    /// Creates an IPv4 host.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidIpv4`] unless `address` is exactly four
    /// dot-separated groups of one to three digits, each at most 255.
    pub fn ipv4(address: &str) -> Result<Self, ComponentError> {
        if is_ipv4_literal(address) {
            Ok(Self::Ipv4(address.to_string()))
        } else {
            Err(ComponentError::InvalidIpv4 {
                value: address.to_string(),
            })
        }
    }

    /// Creates an IPv6 host from the text that goes inside the brackets.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidIpv6`] if `literal` is empty or contains
    /// characters that cannot appear in an IP literal.
    pub fn ipv6(literal: &str) -> Result<Self, ComponentError> {
        if literal.is_empty() {
            return Err(ComponentError::InvalidIpv6 {
                value: String::new(),
                reason: "IP literal cannot be empty",
            });
        }
        if !literal.chars().all(is_ip_literal_char) {
            return Err(ComponentError::InvalidIpv6 {
                value: literal.to_string(),
                reason: "only unreserved characters, sub-delimiters, ':' and '%' are allowed",
            });
        }
        Ok(Self::Ipv6(literal.to_string()))
    }

    /// Returns the decoded name or the verbatim IP literal.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Name(s) | Self::Ipv4(s) | Self::Ipv6(s) => s,
        }
    }

    /// Returns true for the empty registered name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Name(name) if name.is_empty())
    }

    /// Returns the IP address for IP literals that `std::net` understands.
    ///
    /// IPvFuture literals, zone identifiers and octets with leading zeros
    /// yield `None`.
    #[must_use]
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self {
            Self::Name(_) => None,
            Self::Ipv4(s) => s.parse::<Ipv4Addr>().ok().map(IpAddr::V4),
            Self::Ipv6(s) => s.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        }
    }

    /// Returns true if this host names the local machine.
    #[must_use]
    pub fn is_localhost(&self) -> bool {
        match self {
            Self::Name(name) => name.eq_ignore_ascii_case("localhost"),
            Self::Ipv4(_) | Self::Ipv6(_) => self.ip_addr().is_some_and(|ip| ip.is_loopback()),
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        serializer::write_host(&mut out, self);
        f.write_str(&out)
    }
}

/// Returns true if `s` is four dot-separated groups of 1-3 digits, each <= 255.
pub(crate) fn is_ipv4_literal(s: &str) -> bool {
    let mut groups = 0;
    for group in s.split('.') {
        groups += 1;
        if groups > 4
            || group.is_empty()
            || group.len() > 3
            || !group.bytes().all(|b| b.is_ascii_digit())
            || !group.parse::<u16>().is_ok_and(|n| n <= 255)
        {
            return false;
        }
    }
    groups == 4
}
