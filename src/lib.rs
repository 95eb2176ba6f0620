//! Immutable URI values with a lenient parser and a canonical serializer.
//!
//! This crate parses URI references into decoded components, builds them
//! from components, and renders them back to a canonical string.
//!
//! # Overview
//!
//! A URI has the structure:
//!
//! ```text
//! [scheme ":"] ["//" [userinfo "@"] host [":" port]] path ["?" query] ["#" fragment]
//! ```
//!
//! Every component is stored percent-decoded. Two URIs are equal when their
//! components are equal, whatever spelling they were parsed from.
//!
//! # Quick Start
//!
//! ```rust
//! use swim_uri::{Host, Uri};
//!
//! // Parse a URI
//! let uri = Uri::parse("warp://user@swim.example:9001/node/lane?live#top").unwrap();
//!
//! // Access components
//! assert_eq!(uri.scheme().unwrap().as_str(), "warp");
//! assert_eq!(uri.host(), Some(&Host::name("swim.example")));
//! assert_eq!(uri.port(), Some(9001));
//! assert_eq!(uri.path().segments().collect::<Vec<_>>(), ["node", "lane"]);
//!
//! // Derive new values
//! let other = uri.without_user_info().with_port_number(80);
//! assert_eq!(other.to_string(), "warp://swim.example:80/node/lane?live#top");
//! ```
//!
//! # Building From Components
//!
//! Each constructor sets exactly one component; `with_*` methods add the rest.
//!
//! ```rust
//! use swim_uri::Uri;
//!
//! let built = Uri::host_name("domain").with_path(swim_uri::Path::from_tokens(["/", "a b"]));
//! assert_eq!(built.to_string(), "//domain/a%20b");
//! assert_eq!(Uri::parse("//domain/a%20b").unwrap(), built);
//! ```
//!
//! # Percent-Encoding
//!
//! Escapes are decoded per component, so `%2F` in a path segment is a `/`
//! inside that segment and never a separator. On output each component is
//! encoded with its own safe set; see [`pct`].
//!
//! # Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Uri`], [`Scheme`] and
//!   [`Fragment`] as strings.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod authority;
mod error;
mod fragment;
mod host;
mod parser;
mod path;
pub mod pct;
pub mod prelude;
mod query;
mod scheme;
mod serializer;
mod uri;

pub use authority::{Authority, UserInfo};
pub use error::{ComponentError, ParseError, ParseErrorKind};
pub use fragment::Fragment;
pub use host::Host;
pub use path::{Path, PathToken};
pub use query::Query;
pub use scheme::Scheme;
pub use uri::Uri;
