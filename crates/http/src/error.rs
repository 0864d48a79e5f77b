//! Error types shared across the Grappelli crates.

use hyper::StatusCode;
use thiserror::Error;

/// Result alias used throughout the toolkit.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors a request can fail with, each carrying its HTTP mapping.
///
/// The negotiation and conditional crates define their own error enums
/// and convert into this type at the pipeline boundary, so handlers and
/// middleware only ever deal with one error surface.
#[derive(Debug, Error)]
pub enum Error {
	/// Malformed client input: unparseable headers, invalid quality
	/// values, bad entity tags.
	#[error("bad request: {0}")]
	BadRequest(String),

	/// The target resource does not exist.
	#[error("not found: {0}")]
	NotFound(String),

	/// No representation satisfies the request's `Accept` constraints.
	#[error("not acceptable: {0}")]
	NotAcceptable(String),

	/// The request body's media type is not supported.
	#[error("unsupported media type: {0}")]
	UnsupportedMediaType(String),

	/// A conditional header did not hold against the current resource
	/// state.
	#[error("precondition failed: {0}")]
	PreconditionFailed(String),

	/// The request exceeded a configured transfer allowance (status 509,
	/// non-standard but emitted by deployments fronted by bandwidth
	/// accounting).
	#[error("bandwidth limit exceeded: {0}")]
	BandwidthLimitExceeded(String),

	/// Anything that is the server's fault.
	#[error("internal error: {0}")]
	Internal(String),
}

impl Error {
	/// The HTTP status this error maps to.
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Error;
	/// use hyper::StatusCode;
	///
	/// let err = Error::BadRequest("invalid quality value".into());
	/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::BadRequest(_) => StatusCode::BAD_REQUEST,
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
			Error::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Error::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
			// 509 has no named constant in hyper
			Error::BandwidthLimitExceeded(_) => {
				StatusCode::from_u16(509).expect("509 is a valid status code")
			}
			Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_code_mapping() {
		assert_eq!(
			Error::NotAcceptable("".into()).status_code(),
			StatusCode::NOT_ACCEPTABLE
		);
		assert_eq!(
			Error::PreconditionFailed("".into()).status_code(),
			StatusCode::PRECONDITION_FAILED
		);
		assert_eq!(
			Error::BandwidthLimitExceeded("".into()).status_code().as_u16(),
			509
		);
	}

	#[test]
	fn test_display_includes_detail() {
		let err = Error::BadRequest("invalid quality value: \"q=2\"".into());
		assert!(err.to_string().contains("invalid quality value"));
	}
}
