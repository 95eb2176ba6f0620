//! Canonical rendering of URI components.
//!
//! Components are written in the fixed order scheme, authority, path,
//! query, fragment. Each decoded string is percent-encoded with its
//! component's safe set, and delimiters are written only for components
//! that are present.

use crate::authority::{Authority, UserInfo};
use crate::fragment::Fragment;
use crate::host::Host;
use crate::path::{Path, PathToken};
use crate::pct::{self, FRAGMENT, HOST_NAME, PATH_SEGMENT, QUERY, USER_INFO};
use crate::query::Query;
use crate::scheme::Scheme;

/// Writes a complete URI.
///
/// A relative path following an authority gets a leading `/`, and a `:` in
/// the first segment of a relative path with no scheme or authority is
/// escaped so that it does not read back as a scheme delimiter.
pub(crate) fn write_uri(
    out: &mut String,
    scheme: Option<&Scheme>,
    authority: Option<&Authority>,
    path: &Path,
    query: &Query,
    fragment: Option<&Fragment>,
) {
    if let Some(scheme) = scheme {
        out.push_str(scheme.as_str());
        out.push(':');
    }

    if let Some(authority) = authority {
        out.push_str("//");
        write_authority(out, authority);
        if path.is_relative() {
            out.push('/');
        }
        write_path_tokens(out, path, false);
    } else {
        write_path_tokens(out, path, scheme.is_none());
    }

    if !query.is_empty() {
        out.push('?');
        write_query(out, query);
    }

    if let Some(fragment) = fragment {
        out.push('#');
        write_fragment(out, fragment);
    }
}

/// Writes `[userinfo "@"] host [":" port]` without the leading `//`.
pub(crate) fn write_authority(out: &mut String, authority: &Authority) {
    if let Some(user_info) = authority.user_info() {
        write_user_info(out, user_info);
        out.push('@');
    }
    write_host(out, authority.host());
    if let Some(port) = authority.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
}

pub(crate) fn write_user_info(out: &mut String, user_info: &UserInfo) {
    out.push_str(&USER_INFO.encode(user_info.username()));
    if let Some(password) = user_info.password() {
        out.push(':');
        out.push_str(&USER_INFO.encode(password));
    }
}

pub(crate) fn write_host(out: &mut String, host: &Host) {
    match host {
        Host::Name(name) => out.push_str(&HOST_NAME.encode(name)),
        Host::Ipv4(address) => out.push_str(address),
        Host::Ipv6(literal) => {
            out.push('[');
            out.push_str(literal);
            out.push(']');
        }
    }
}

pub(crate) fn write_path(out: &mut String, path: &Path) {
    write_path_tokens(out, path, false);
}

fn write_path_tokens(out: &mut String, path: &Path, escape_leading_colon: bool) {
    for (i, token) in path.tokens().iter().enumerate() {
        match token {
            PathToken::Separator => out.push('/'),
            PathToken::Segment(segment) if i == 0 && escape_leading_colon => {
                out.push_str(&pct::encode(segment, |c| c != ':' && PATH_SEGMENT.allows(c)));
            }
            PathToken::Segment(segment) => out.push_str(&PATH_SEGMENT.encode(segment)),
        }
    }
}

pub(crate) fn write_query(out: &mut String, query: &Query) {
    for (i, (key, value)) in query.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        if let Some(key) = key {
            out.push_str(&QUERY.encode(key));
            out.push('=');
        }
        out.push_str(&QUERY.encode(value));
    }
}

pub(crate) fn write_fragment(out: &mut String, fragment: &Fragment) {
    out.push_str(&FRAGMENT.encode(fragment.as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        scheme: Option<&str>,
        authority: Option<Authority>,
        path: &Path,
        query: &Query,
        fragment: Option<&str>,
    ) -> String {
        let scheme = scheme.map(|s| Scheme::parse(s).unwrap());
        let fragment = fragment.map(Fragment::new);
        let mut out = String::new();
        write_uri(
            &mut out,
            scheme.as_ref(),
            authority.as_ref(),
            path,
            query,
            fragment.as_ref(),
        );
        out
    }

    #[test]
    fn nothing_renders_empty() {
        assert_eq!(render(None, None, &Path::empty(), &Query::new(), None), "");
    }

    #[test]
    fn empty_authority_renders_slashes() {
        assert_eq!(
            render(None, Some(Authority::default()), &Path::empty(), &Query::new(), None),
            "//"
        );
    }

    #[test]
    fn full_composition() {
        let authority = Authority::new(Host::name("domain"))
            .with_user_info(UserInfo::new("u", Some("p")))
            .with_port(80);
        let rendered = render(
            Some("scheme"),
            Some(authority),
            &Path::from_tokens(["/", "path"]),
            &Query::from_pairs([(None::<&str>, "query")]),
            Some("fragment"),
        );
        assert_eq!(rendered, "scheme://u:p@domain:80/path?query#fragment");
    }

    #[test]
    fn relative_path_after_authority_gets_slash() {
        let rendered = render(
            None,
            Some(Authority::new(Host::name("h"))),
            &Path::from_tokens(["a"]),
            &Query::new(),
            None,
        );
        assert_eq!(rendered, "//h/a");
    }

    #[test]
    fn leading_colon_escaped_without_scheme() {
        let path = Path::from_tokens(["a:b", "/", "c:d"]);
        assert_eq!(render(None, None, &path, &Query::new(), None), "a%3Ab/c:d");
        assert_eq!(render(Some("s"), None, &path, &Query::new(), None), "s:a:b/c:d");
    }

    #[test]
    fn ip_literals_are_verbatim() {
        let mut out = String::new();
        write_host(&mut out, &Host::Ipv6("v1.x".to_string()));
        write_host(&mut out, &Host::Ipv4("001.2.3.4".to_string()));
        assert_eq!(out, "[v1.x]001.2.3.4");
    }

    #[test]
    fn empty_fragment_keeps_hash() {
        assert_eq!(
            render(None, None, &Path::empty(), &Query::new(), Some("")),
            "#"
        );
    }

    #[test]
    fn bare_empty_query_keeps_question_mark() {
        let query = Query::from_pairs([(None::<&str>, ""), (None, "")]);
        assert_eq!(render(None, None, &Path::empty(), &query, None), "?&");
    }
}
