//! Error types for header parsing and negotiation.

use hyper::StatusCode;
use thiserror::Error;

/// Errors raised while parsing negotiation headers or selecting a
/// representation.
///
/// Parse failures map to 400 (the client sent a header we refuse to
/// guess at); a failed negotiation maps to 406. Nothing here is ever
/// silently defaulted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NegotiationError {
	/// A quality value outside the `q=0` .. `q=1`, three-fractional-digit
	/// grammar (`q=2`, `q=1.0000`, `q=abc`).
	#[error("malformed quality value: {value:?}")]
	MalformedQualityValue { value: String },

	/// A media range that is not `type/subtype`, `type/*` or `*/*`, or
	/// has an unparseable parameter.
	#[error("malformed media range in Accept header: {range:?}")]
	MalformedAcceptHeader { range: String },

	/// An invalid character between tokens of an `Accept-Charset`
	/// header (missing separator, stray punctuation).
	#[error("invalid character {found:?} at byte {position} in Accept-Charset header")]
	MalformedCharsetList { found: char, position: usize },

	/// No supported media type satisfies any non-zero-quality range.
	#[error("no supported media type satisfies Accept header {accept:?} (supported: {supported:?})")]
	NotAcceptable {
		accept: String,
		supported: Vec<String>,
	},
}

impl NegotiationError {
	/// The HTTP status this error maps to.
	pub fn status_code(&self) -> StatusCode {
		match self {
			NegotiationError::MalformedQualityValue { .. }
			| NegotiationError::MalformedAcceptHeader { .. }
			| NegotiationError::MalformedCharsetList { .. } => StatusCode::BAD_REQUEST,
			NegotiationError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
		}
	}
}

impl From<NegotiationError> for grappelli_http::Error {
	fn from(err: NegotiationError) -> Self {
		match &err {
			NegotiationError::NotAcceptable { .. } => {
				grappelli_http::Error::NotAcceptable(err.to_string())
			}
			_ => grappelli_http::Error::BadRequest(err.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_codes() {
		let malformed = NegotiationError::MalformedQualityValue {
			value: "2".to_string(),
		};
		assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);

		let not_acceptable = NegotiationError::NotAcceptable {
			accept: "image/png".to_string(),
			supported: vec!["application/json".to_string()],
		};
		assert_eq!(not_acceptable.status_code(), StatusCode::NOT_ACCEPTABLE);
	}

	#[test]
	fn test_converts_to_http_error() {
		let err: grappelli_http::Error = NegotiationError::MalformedCharsetList {
			found: '@',
			position: 3,
		}
		.into();
		assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
	}
}
