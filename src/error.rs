//! Error types for URI parsing and component construction.

use std::fmt;

/// Errors that can occur when parsing a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }

    /// Returns the byte offset into [`ParseError::input`] where parsing failed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.kind.position()
    }
}

/// Specific parsing error types.
///
/// Every variant carries the byte offset of the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that cannot appear at this point of the grammar
    UnexpectedCharacter {
        /// The unexpected character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// An IPv6 literal opened with `[` was never closed
    UnterminatedBracket {
        /// Position of the opening bracket
        position: usize,
    },
    /// A `%` not followed by two hex digits, or escapes that decode to invalid UTF-8
    InvalidPercentEscape {
        /// Position of the offending `%`
        position: usize,
    },
    /// Port digits that do not fit in a `u32`
    InvalidPort {
        /// Position of the first port digit
        position: usize,
    },
}

impl ParseErrorKind {
    /// Returns the byte offset carried by this error.
    #[must_use]
    pub const fn position(&self) -> usize {
        match *self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedBracket { position }
            | Self::InvalidPercentEscape { position }
            | Self::InvalidPort { position } => position,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { char, position } => {
                write!(f, "unexpected character '{char}' at position {position}")
            }
            Self::UnterminatedBracket { position } => {
                write!(f, "unterminated '[' opened at position {position}")
            }
            Self::InvalidPercentEscape { position } => {
                write!(
                    f,
                    "invalid percent escape at position {position}; expected '%' followed by two hex digits encoding UTF-8"
                )
            }
            Self::InvalidPort { position } => {
                write!(f, "port starting at position {position} exceeds {}", u32::MAX)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': {}", self.input, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Errors for building a URI component from an unencoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
    InvalidScheme {
        /// The invalid scheme
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// The host is not four dot-separated decimal octets
    InvalidIpv4 {
        /// The invalid value
        value: String,
    },
    /// The host cannot appear between `[` and `]`
    InvalidIpv6 {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScheme { value, reason } => {
                write!(f, "invalid scheme '{value}': {reason}")
            }
            Self::InvalidIpv4 { value } => {
                write!(
                    f,
                    "invalid IPv4 address '{value}'; expected four dot-separated octets 0-255"
                )
            }
            Self::InvalidIpv6 { value, reason } => {
                write!(f, "invalid IPv6 literal '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for ComponentError {}
