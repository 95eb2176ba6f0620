//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use swim_uri::prelude::*;
//!
//! let uri = Uri::parse("http://example.com/a?k=v").unwrap();
//! assert_eq!(uri.query().get("k"), Some("v"));
//! ```

pub use crate::{
    // Core types
    Authority, Fragment, Host, Path, PathToken, Query, Scheme, Uri, UserInfo,
    // Errors
    ComponentError, ParseError, ParseErrorKind,
};
