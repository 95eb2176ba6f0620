//! Property-based tests over generated canonical URIs.
//!
//! The strategies build `Uri` values from components, render them, and
//! check that the parser reads back the same components.

use proptest::prelude::*;

use swim_uri::pct::{self, FRAGMENT, HOST_NAME, PATH_SEGMENT, QUERY, USER_INFO};
use swim_uri::{Authority, Fragment, Host, Path, PathToken, Query, Scheme, Uri, UserInfo};

/// Strategies for generating canonical component values.
mod strategies {
    use super::*;

    /// Valid lowercase scheme characters after the first letter
    const SCHEME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789+-.";

    /// Generate a lowercase scheme (1-10 chars, starts with a letter)
    pub fn scheme() -> impl Strategy<Value = Scheme> {
        (
            prop::sample::select(b"abcdefghijklmnopqrstuvwxyz".to_vec()),
            prop::collection::vec(prop::sample::select(SCHEME_CHARS.to_vec()), 0..10),
        )
            .prop_map(|(first, rest)| {
                let mut name = String::with_capacity(1 + rest.len());
                name.push(first as char);
                name.extend(rest.into_iter().map(char::from));
                Scheme::parse(&name).unwrap()
            })
    }

    /// Generate arbitrary decoded text, including delimiters and non-ASCII
    pub fn text(max: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(any::<char>(), 0..=max).prop_map(|chars| chars.into_iter().collect())
    }

    /// Generate a registered name that does not read as a dotted quad
    pub fn host_name() -> impl Strategy<Value = Host> {
        text(12)
            .prop_filter("looks like an IPv4 address", |name| {
                name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            })
            .prop_map(|name| Host::name(&name))
    }

    /// Generate a valid IPv4 address
    pub fn ipv4() -> impl Strategy<Value = Host> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| Host::ipv4(&format!("{a}.{b}.{c}.{d}")).unwrap())
    }

    /// Generate a valid IPv6 address (simplified: full form only)
    pub fn ipv6() -> impl Strategy<Value = Host> {
        prop::collection::vec(0u16..=0xffff, 8).prop_map(|groups| {
            let literal = groups
                .iter()
                .map(|g| format!("{g:x}"))
                .collect::<Vec<_>>()
                .join(":");
            Host::ipv6(&literal).unwrap()
        })
    }

    pub fn host() -> impl Strategy<Value = Host> {
        prop_oneof![host_name(), ipv4(), ipv6()]
    }

    pub fn user_info() -> impl Strategy<Value = UserInfo> {
        (text(8), prop::option::of(text(8)))
            .prop_map(|(username, password)| UserInfo::new(&username, password.as_deref()))
    }

    pub fn authority() -> impl Strategy<Value = Authority> {
        (prop::option::of(user_info()), host(), prop::option::of(any::<u32>())).prop_map(
            |(user_info, host, port)| {
                let mut authority = Authority::new(host);
                if let Some(user_info) = user_info {
                    authority = authority.with_user_info(user_info);
                }
                if let Some(port) = port {
                    authority = authority.with_port(port);
                }
                authority
            },
        )
    }

    /// Generate a path with no empty segments between separators
    pub fn path() -> impl Strategy<Value = Path> {
        (
            any::<bool>(),
            prop::collection::vec(text(8).prop_filter("empty segment", |s| !s.is_empty()), 0..5),
            any::<bool>(),
        )
            .prop_map(|(leading, segments, trailing)| {
                let mut tokens = Vec::new();
                if leading {
                    tokens.push(PathToken::Separator);
                }
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        tokens.push(PathToken::Separator);
                    }
                    tokens.push(PathToken::Segment(segment.clone()));
                }
                if trailing && !segments.is_empty() {
                    tokens.push(PathToken::Separator);
                }
                tokens.into_iter().collect()
            })
    }

    pub fn query() -> impl Strategy<Value = Query> {
        prop::collection::vec((prop::option::of(text(6)), text(6)), 0..5).prop_map(Query::from_pairs)
    }

    pub fn fragment() -> impl Strategy<Value = Fragment> {
        text(10).prop_map(Fragment::from)
    }

    /// Generate a canonical URI; a path following an authority is absolute or empty.
    pub fn uri() -> impl Strategy<Value = Uri> {
        (
            prop::option::of(scheme()),
            prop::option::of(authority()),
            path(),
            query(),
            prop::option::of(fragment()),
        )
            .prop_map(|(scheme, authority, path, query, fragment)| {
                let mut uri = Uri::empty();
                if let Some(scheme) = scheme {
                    uri = uri.with_scheme(scheme);
                }
                let path = match authority {
                    Some(authority) => {
                        uri = uri.with_authority(authority);
                        if path.is_relative() && !path.is_empty() {
                            let mut tokens = vec![PathToken::Separator];
                            tokens.extend(path.tokens().iter().cloned());
                            tokens.into_iter().collect()
                        } else {
                            path
                        }
                    }
                    None => path,
                };
                uri = uri.with_path(path).with_query(query);
                if let Some(fragment) = fragment {
                    uri = uri.with_fragment(fragment);
                }
                uri
            })
    }
}

mod roundtrip_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn canonical_uri_roundtrips(uri in uri()) {
            let rendered = uri.to_string();
            let parsed = Uri::parse(&rendered);
            prop_assert!(parsed.is_ok(), "Failed to parse rendered URI: {}", rendered);
            prop_assert_eq!(parsed.unwrap(), uri);
        }

        #[test]
        fn rendering_is_stable(uri in uri()) {
            let once = uri.to_string();
            let twice = Uri::parse(&once).unwrap().to_string();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn standalone_path_roundtrips(path in path()) {
            prop_assert_eq!(Path::parse(&path.to_string()).unwrap(), path);
        }

        #[test]
        fn standalone_query_roundtrips(query in query()) {
            prop_assume!(!query.is_empty());
            prop_assert_eq!(Query::parse(&query.to_string()).unwrap(), query);
        }
    }
}

mod mutator_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn with_path_changes_only_path(uri in uri(), path in path()) {
            let updated = uri.with_path(path.clone());
            prop_assert_eq!(updated.path(), &path);
            prop_assert_eq!(updated.scheme(), uri.scheme());
            prop_assert_eq!(updated.authority(), uri.authority());
            prop_assert_eq!(updated.query(), uri.query());
            prop_assert_eq!(updated.fragment(), uri.fragment());
        }

        #[test]
        fn with_query_changes_only_query(uri in uri(), query in query()) {
            let updated = uri.with_query(query.clone());
            prop_assert_eq!(updated.query(), &query);
            prop_assert_eq!(updated.scheme(), uri.scheme());
            prop_assert_eq!(updated.authority(), uri.authority());
            prop_assert_eq!(updated.path(), uri.path());
            prop_assert_eq!(updated.fragment(), uri.fragment());
        }

        #[test]
        fn with_port_keeps_host(uri in uri(), port in any::<u32>()) {
            let updated = uri.with_port_number(port);
            prop_assert_eq!(updated.port(), Some(port));
            prop_assert_eq!(updated.host().cloned(), Some(uri.host().cloned().unwrap_or_default()));
            prop_assert_eq!(updated.user_info(), uri.user_info());
        }
    }
}

mod percent_encoding_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn decode_inverts_encode(s in text(24)) {
            for set in [USER_INFO, HOST_NAME, PATH_SEGMENT, QUERY, FRAGMENT] {
                prop_assert_eq!(pct::decode(&set.encode(&s)).unwrap(), s.clone());
            }
        }

        #[test]
        fn canonical_escapes_are_idempotent(s in text(24)) {
            for set in [USER_INFO, HOST_NAME, PATH_SEGMENT, QUERY, FRAGMENT] {
                let canonical = set.encode(&s);
                let again = set.encode(&pct::decode(&canonical).unwrap());
                prop_assert_eq!(again, canonical);
            }
        }

        #[test]
        fn decode_never_panics(s in "\\PC*") {
            let _ = pct::decode(&s);
        }

        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = Uri::parse(&s);
        }
    }
}

#[test]
fn empty_input_is_empty_uri() {
    assert_eq!(Uri::parse("").unwrap(), Uri::empty());
    assert_eq!(Uri::empty().to_string(), "");
}
