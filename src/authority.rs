//! Authority component: `[userinfo "@"] host [":" port]`.

use std::fmt;

use crate::host::Host;
use crate::serializer;

/// Percent-decoded user information preceding `@` in an authority.
///
/// # Examples
///
/// ```
/// use swim_uri::UserInfo;
///
/// let info = UserInfo::new("user", Some("p:ss"));
/// assert_eq!(info.username(), "user");
/// assert_eq!(info.password(), Some("p:ss"));
/// assert_eq!(info.to_string(), "user:p%3Ass");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UserInfo {
    username: String,
    password: Option<String>,
}

impl UserInfo {
    /// Creates user information from decoded parts.
    #[must_use]
    pub fn new(username: &str, password: Option<&str>) -> Self {
        Self {
            username: username.to_string(),
            password: password.map(str::to_string),
        }
    }

    pub(crate) const fn from_parts(username: String, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Returns the decoded username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the decoded password, if a `:` was present.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        serializer::write_user_info(&mut out, self);
        f.write_str(&out)
    }
}

/// The authority of a URI.
///
/// An authority exists whenever a URI contains `//` after its scheme, even
/// if every part of it is empty. The host of an authority with no host text
/// is the empty registered name.
///
/// # Examples
///
/// ```
/// use swim_uri::{Authority, Host};
///
/// let authority = Authority::new(Host::name("example.com")).with_port(8080);
/// assert_eq!(authority.port(), Some(8080));
/// assert_eq!(authority.to_string(), "example.com:8080");
/// assert_eq!(Authority::default().to_string(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Authority {
    user_info: Option<UserInfo>,
    host: Host,
    port: Option<u32>,
}

impl Authority {
    /// Creates an authority with the given host, no user information and no port.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self {
            user_info: None,
            host,
            port: None,
        }
    }

    /// Returns the user information, if an `@` was present.
    #[must_use]
    pub const fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port, if a `:` followed the host.
    #[must_use]
    pub const fn port(&self) -> Option<u32> {
        self.port
    }

    /// Returns this authority with the given user information.
    #[must_use]
    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = Some(user_info);
        self
    }

    /// Returns this authority without user information.
    #[must_use]
    pub fn without_user_info(mut self) -> Self {
        self.user_info = None;
        self
    }

    /// Returns this authority with the given host.
    #[must_use]
    pub fn with_host(mut self, host: Host) -> Self {
        self.host = host;
        self
    }

    /// Returns this authority with the given port.
    #[must_use]
    pub fn with_port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    /// Returns this authority without a port.
    #[must_use]
    pub fn without_port(mut self) -> Self {
        self.port = None;
        self
    }

    /// Returns true if the authority has no user information, an empty
    /// host and no port, as in `"//"`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_info.is_none() && self.host.is_empty() && self.port.is_none()
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        serializer::write_authority(&mut out, self);
        f.write_str(&out)
    }
}
