//! Single-pass URI scanner.
//!
//! The scanner moves left to right through the stages of
//! `[scheme ":"] ["//" authority] path ["?" query] ["#" fragment]`.
//! Each stage starts where the previous one stopped, and no stage backtracks
//! into an earlier one. Percent escapes are decoded per component, so
//! an escaped delimiter is data, never structure.

use tracing::trace;

use crate::authority::{Authority, UserInfo};
use crate::error::ParseErrorKind;
use crate::fragment::Fragment;
use crate::host::{Host, is_ip_literal_char, is_ipv4_literal};
use crate::path::{Path, PathToken};
use crate::pct;
use crate::query::Query;
use crate::scheme::Scheme;

type Result<T> = std::result::Result<T, ParseErrorKind>;

/// Components scanned from one URI string.
#[derive(Debug, Default)]
pub(crate) struct UriParts {
    pub(crate) scheme: Option<Scheme>,
    pub(crate) authority: Option<Authority>,
    pub(crate) path: Path,
    pub(crate) query: Query,
    pub(crate) fragment: Option<Fragment>,
}

/// Scans a complete URI reference.
pub(crate) fn parse(input: &str) -> Result<UriParts> {
    let mut parser = Parser { input, pos: 0 };
    let scheme = parser.scheme()?;
    let authority = parser.authority()?;
    let path = parser.path()?;
    let query = parser.query()?;
    let fragment = parser.fragment()?;
    Ok(UriParts {
        scheme,
        authority,
        path,
        query,
        fragment,
    })
}

/// Scans a standalone encoded path.
pub(crate) fn parse_path(input: &str) -> Result<Path> {
    if let Some(i) = input.find(['?', '#']) {
        return Err(unexpected(input, i));
    }
    split_path(input, 0)
}

/// Scans a standalone encoded query, without its leading `?`.
pub(crate) fn parse_query(input: &str) -> Result<Query> {
    if let Some(i) = input.find('#') {
        return Err(unexpected(input, i));
    }
    split_query(input, 0)
}

/// Decodes a standalone encoded fragment, without its leading `#`.
pub(crate) fn parse_fragment(input: &str) -> Result<Fragment> {
    decode_at(input, 0).map(Fragment::from)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Returns the length of the remaining input before the first of `delims`.
    fn scan_until(&self, delims: &[u8]) -> usize {
        let rest = self.remaining();
        rest.bytes()
            .position(|b| delims.contains(&b))
            .unwrap_or(rest.len())
    }

    fn scheme(&mut self) -> Result<Option<Scheme>> {
        let len = self.scan_until(b":/?#");
        let rest = self.remaining();
        if rest.as_bytes().get(len) != Some(&b':') {
            return Ok(None);
        }

        let name = &rest[..len];
        if let Some(i) = Scheme::invalid_position(name) {
            return Err(unexpected(self.input, self.pos + i));
        }
        self.pos += len + 1;

        let scheme = Scheme::from_valid(name);
        trace!(scheme = scheme.as_str(), "scanned scheme");
        Ok(Some(scheme))
    }

    fn authority(&mut self) -> Result<Option<Authority>> {
        if !self.remaining().starts_with("//") {
            return Ok(None);
        }
        self.pos += 2;

        let mut authority = Authority::default();

        let section = &self.remaining()[..self.scan_until(b"/?#")];
        if let Some(at) = section.find('@') {
            authority = authority.with_user_info(self.user_info(&section[..at])?);
            self.pos += at + 1;
        }

        let host = if self.peek() == Some(b'[') {
            self.ip_literal()?
        } else {
            self.host_name()?
        };
        authority = authority.with_host(host);

        if self.peek() == Some(b':') {
            self.pos += 1;
            authority = authority.with_port(self.port()?);
        }

        trace!(?authority, "scanned authority");
        Ok(Some(authority))
    }

    fn user_info(&self, raw: &str) -> Result<UserInfo> {
        let start = self.pos;
        let (username, password) = match raw.find(':') {
            Some(colon) => (
                decode_at(&raw[..colon], start)?,
                Some(decode_at(&raw[colon + 1..], start + colon + 1)?),
            ),
            None => (decode_at(raw, start)?, None),
        };
        Ok(UserInfo::from_parts(username, password))
    }

    fn ip_literal(&mut self) -> Result<Host> {
        let open = self.pos;
        let rest = &self.input[open + 1..];
        let len = rest
            .find(|c: char| !is_ip_literal_char(c))
            .unwrap_or(rest.len());

        match rest[len..].chars().next() {
            Some(']') if len > 0 => {}
            Some(']') => return Err(unexpected(self.input, open + 1)),
            None | Some('/' | '?' | '#') => {
                return Err(ParseErrorKind::UnterminatedBracket { position: open });
            }
            Some(_) => return Err(unexpected(self.input, open + 1 + len)),
        }
        self.pos = open + 1 + len + 1;

        match self.peek() {
            None | Some(b':' | b'/' | b'?' | b'#') => Ok(Host::Ipv6(rest[..len].to_string())),
            Some(_) => Err(unexpected(self.input, self.pos)),
        }
    }

    fn host_name(&mut self) -> Result<Host> {
        let start = self.pos;
        let raw = &self.remaining()[..self.scan_until(b":/?#")];
        if let Some(i) = raw.find(['[', ']']) {
            return Err(unexpected(self.input, start + i));
        }
        self.pos += raw.len();

        if is_ipv4_literal(raw) {
            Ok(Host::Ipv4(raw.to_string()))
        } else {
            decode_at(raw, start).map(Host::Name)
        }
    }

    fn port(&mut self) -> Result<u32> {
        let start = self.pos;
        let raw = &self.remaining()[..self.scan_until(b"/?#")];
        if let Some(i) = raw.find(|c: char| !c.is_ascii_digit()) {
            return Err(unexpected(self.input, start + i));
        }
        let port = if raw.is_empty() {
            0
        } else {
            raw.parse::<u32>()
                .map_err(|_| ParseErrorKind::InvalidPort { position: start })?
        };
        self.pos += raw.len();
        Ok(port)
    }

    fn path(&mut self) -> Result<Path> {
        let start = self.pos;
        let raw = &self.remaining()[..self.scan_until(b"?#")];
        self.pos += raw.len();
        let path = split_path(raw, start)?;
        trace!(tokens = path.tokens().len(), "scanned path");
        Ok(path)
    }

    fn query(&mut self) -> Result<Query> {
        if self.peek() != Some(b'?') {
            return Ok(Query::new());
        }
        self.pos += 1;

        let start = self.pos;
        let raw = &self.remaining()[..self.scan_until(b"#")];
        self.pos += raw.len();
        let query = split_query(raw, start)?;
        trace!(parts = query.len(), "scanned query");
        Ok(query)
    }

    fn fragment(&mut self) -> Result<Option<Fragment>> {
        if self.peek() != Some(b'#') {
            return Ok(None);
        }
        self.pos += 1;

        let fragment = decode_at(self.remaining(), self.pos)?;
        self.pos = self.input.len();
        Ok(Some(Fragment::from(fragment)))
    }
}

fn split_path(raw: &str, start: usize) -> Result<Path> {
    let mut path = Path::empty();
    let mut offset = start;
    for (i, segment) in raw.split('/').enumerate() {
        if i > 0 {
            path.push(PathToken::Separator);
            offset += 1;
        }
        path.push(PathToken::Segment(decode_at(segment, offset)?));
        offset += segment.len();
    }
    Ok(path)
}

fn split_query(raw: &str, start: usize) -> Result<Query> {
    let mut parts = Vec::new();
    let mut offset = start;
    for part in raw.split('&') {
        let entry = match part.find('=') {
            Some(eq) => (
                Some(decode_at(&part[..eq], offset)?),
                decode_at(&part[eq + 1..], offset + eq + 1)?,
            ),
            None => (None, decode_at(part, offset)?),
        };
        parts.push(entry);
        offset += part.len() + 1;
    }
    Ok(Query::from_parts(parts))
}

fn decode_at(raw: &str, start: usize) -> Result<String> {
    pct::decode(raw).map_err(|e| ParseErrorKind::InvalidPercentEscape {
        position: start + e.position,
    })
}

fn unexpected(input: &str, position: usize) -> ParseErrorKind {
    let char = input[position..].chars().next().unwrap_or_default();
    ParseErrorKind::UnexpectedCharacter { char, position }
}
