//! # Grappelli Negotiation
//!
//! Content negotiation for the Grappelli toolkit: `Accept` and
//! `Accept-Charset` parsing plus server-side selection, with the strict
//! RFC 2616 quality-value grammar (three fractional digits, hard errors
//! on anything else).
//!
//! ## Negotiators
//!
//! - **MediaTypeNegotiator**: pick the best response media type for an
//!   `Accept` header against the server's supported list
//! - **CharsetNegotiator**: pick the response charset for an
//!   `Accept-Charset` header, defaulting to UTF-8
//!
//! ## Parsing
//!
//! - **MediaType**: one media range with ordered parameters
//! - **CharsetPart** / [`parse_accept_charset_parts`]: lazy, single-pass
//!   `Accept-Charset` tokenizer; malformed input fails at the element
//!   where it is reached, not up front
//! - **Quality**: fixed-point q-value in `[0, 1000]`
//!
//! All of it is pure and stateless; negotiators are free to be shared
//! across requests.

pub mod charset;
pub mod error;
pub mod media_type;
pub mod quality;

pub use charset::{AcceptCharsetParts, CharsetNegotiator, CharsetPart, parse_accept_charset_parts};
pub use error::NegotiationError;
pub use media_type::{MediaType, MediaTypeNegotiator, parse_accept_header};
pub use quality::Quality;
