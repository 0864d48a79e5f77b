//! # Grappelli
//!
//! HTTP content negotiation and conditional request handling for Rust
//! services, in the Reinhardt family.
//!
//! Grappelli covers the header-driven half of serving a representation:
//! picking the response media type for an `Accept` header, picking the
//! charset for `Accept-Charset`, and deciding what an
//! `If-Match`/`If-None-Match` request resolves to (proceed, 304, 412,
//! or 400). All three are pure, stateless functions promoted to
//! first-class public API, with a middleware wrapper for pipelines that
//! want the 304/412 plumbing handled for them.
//!
//! ## Feature Flags
//!
//! - `negotiation` (default) - `Accept`/`Accept-Charset` parsing and
//!   selection
//! - `conditional` (default) - entity tags, precondition evaluation and
//!   the conditional middleware
//! - `full` - everything
//!
//! ## Quick Example
//!
//! ```
//! use grappelli::negotiation::{CharsetNegotiator, MediaTypeNegotiator};
//!
//! let negotiator = MediaTypeNegotiator::new();
//! let supported = ["application/json", "application/atom+xml"];
//!
//! let chosen = negotiator
//!     .select("application/atom+xml;q=0.9, */*;q=0.1", &supported)
//!     .unwrap();
//! assert_eq!(chosen, Some("application/atom+xml"));
//!
//! let charset = CharsetNegotiator::new()
//!     .select("iso-8859-5;q=0.8, utf-8", &["utf-8", "iso-8859-5"])
//!     .unwrap();
//! assert_eq!(charset, "utf-8");
//! ```

pub use grappelli_http as http;

#[cfg(feature = "negotiation")]
pub use grappelli_negotiation as negotiation;

#[cfg(feature = "conditional")]
pub use grappelli_conditional as conditional;

// Headline types, re-exported flat
pub use grappelli_http::{Error, Handler, Middleware, Request, Response, Result};

#[cfg(feature = "negotiation")]
pub use grappelli_negotiation::{
	CharsetNegotiator, CharsetPart, MediaType, MediaTypeNegotiator, NegotiationError, Quality,
	parse_accept_charset_parts, parse_accept_header,
};

#[cfg(feature = "conditional")]
pub use grappelli_conditional::{
	ConditionalError, ConditionalMiddleware, ConditionalOutcome, EntityTag, Precondition, evaluate,
};

pub use hyper::StatusCode;
