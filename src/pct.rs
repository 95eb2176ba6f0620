//! Percent-encoding and decoding of URI component data.
//!
//! Each URI component has its own set of characters that may appear
//! unescaped. Decoding is the same for every component; encoding takes the
//! component's [`CharSet`] (or any `Fn(char) -> bool` predicate) and escapes
//! everything outside it as `%XX` octets of the UTF-8 encoding.
//!
//! ```
//! use swim_uri::pct::{self, PATH_SEGMENT, QUERY};
//!
//! assert_eq!(PATH_SEGMENT.encode("a b/c"), "a%20b%2Fc");
//! assert_eq!(QUERY.encode("k=v&w"), "k%3Dv%26w");
//! assert_eq!(pct::decode("a%20b%2Fc").unwrap(), "a b/c");
//! ```

use std::fmt;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// A set of ASCII characters that may appear unescaped in a component.
///
/// Non-ASCII characters are never members, and neither is `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSet(u128);

impl CharSet {
    /// Creates a set containing exactly the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any byte is non-ASCII or is `%`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut bits = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(
                cur.is_ascii() && *cur != b'%',
                "character sets only hold ASCII characters other than '%'"
            );
            bits |= 1u128 << (*cur as u32);
            bytes = rem;
        }
        Self(bits)
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if `c` may appear unescaped.
    #[must_use]
    pub const fn allows(self, c: char) -> bool {
        let x = c as u32;
        x < 128 && self.0 & (1u128 << x) != 0
    }

    /// Percent-encodes every character of `decoded` outside this set.
    #[must_use]
    pub fn encode(self, decoded: &str) -> String {
        encode(decoded, |c| self.allows(c))
    }
}

/// `ALPHA`
pub const ALPHA: CharSet = CharSet::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT`
pub const DIGIT: CharSet = CharSet::new(b"0123456789");

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: CharSet = ALPHA.or(DIGIT).or(CharSet::new(b"-._~"));

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: CharSet = CharSet::new(b"!$&'()*+,;=");

/// Characters left unescaped in a username or password.
pub const USER_INFO: CharSet = UNRESERVED.or(SUB_DELIMS);

/// Characters left unescaped in a registered host name.
pub const HOST_NAME: CharSet = UNRESERVED.or(SUB_DELIMS);

/// Characters left unescaped in a single path segment.
pub const PATH_SEGMENT: CharSet = UNRESERVED.or(SUB_DELIMS).or(CharSet::new(b":@"));

/// Characters left unescaped in a query key or value; `&` and `=` are structural.
pub const QUERY: CharSet = UNRESERVED.or(CharSet::new(b"!$()*+,/:;?@'"));

/// Characters left unescaped in a fragment.
pub const FRAGMENT: CharSet = UNRESERVED.or(SUB_DELIMS).or(CharSet::new(b"/:?@"));

/// A `%` not followed by two hex digits, or escapes that do not decode to UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentDecodeError {
    /// Byte offset of the offending `%` in the raw input
    pub position: usize,
}

impl fmt::Display for PercentDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid percent escape at position {}", self.position)
    }
}

impl std::error::Error for PercentDecodeError {}

/// Percent-encodes every character of `decoded` for which `is_safe` is false.
///
/// Unsafe characters are encoded as UTF-8 and every byte is written as `%XX`
/// with uppercase hex digits.
pub fn encode(decoded: &str, is_safe: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(decoded.len());
    let mut buf = [0u8; 4];
    for c in decoded.chars() {
        if is_safe(c) {
            out.push(c);
        } else {
            for &byte in c.encode_utf8(&mut buf).as_bytes() {
                out.push('%');
                out.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
                out.push(char::from(HEX_UPPER[usize::from(byte & 0x0f)]));
            }
        }
    }
    out
}

/// Decodes `%XX` escapes in `raw`, copying every other character unchanged.
///
/// Consecutive escapes are collected into one byte run and validated as
/// UTF-8 together, so multi-byte characters may be escaped octet by octet.
///
/// # Errors
///
/// Returns [`PercentDecodeError`] if a `%` is not followed by two hex digits,
/// or if a run of escapes does not decode to valid UTF-8. The position is the
/// offset of the first escape that cannot be decoded.
pub fn decode(raw: &str) -> Result<String, PercentDecodeError> {
    if !raw.contains('%') {
        return Ok(raw.to_string());
    }

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut run = Vec::new();
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            let (Some(hi), Some(lo)) = (hi, lo) else {
                return Err(PercentDecodeError { position: i });
            };
            if run.is_empty() {
                run_start = i;
            }
            run.push((hi << 4) | lo);
            i += 3;
        } else {
            flush_run(&mut out, &mut run, run_start)?;
            let end = raw[i..].find('%').map_or(raw.len(), |j| i + j);
            out.push_str(&raw[i..end]);
            i = end;
        }
    }
    flush_run(&mut out, &mut run, run_start)?;

    Ok(out)
}

fn flush_run(out: &mut String, run: &mut Vec<u8>, run_start: usize) -> Result<(), PercentDecodeError> {
    if run.is_empty() {
        return Ok(());
    }
    match std::str::from_utf8(run) {
        Ok(s) => out.push_str(s),
        Err(e) => {
            return Err(PercentDecodeError {
                position: run_start + 3 * e.valid_up_to(),
            });
        }
    }
    run.clear();
    Ok(())
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
