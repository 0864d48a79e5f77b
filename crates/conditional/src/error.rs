//! Error types for conditional request handling.

use hyper::StatusCode;
use thiserror::Error;

/// Errors raised while parsing or applying conditional headers.
///
/// These are all client errors (400). A failed precondition (412) and a
/// cache hit (304) are outcomes of a well-formed request, not errors —
/// see [`ConditionalOutcome`](crate::ConditionalOutcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionalError {
	/// An entity tag that is not `"tag"` or `W/"tag"`.
	#[error("malformed entity tag: {value:?}")]
	MalformedEntityTag { value: String },

	/// `If-Match` and `If-None-Match` on the same request.
	#[error("If-Match and If-None-Match cannot be combined on the same request")]
	ConflictingPreconditions,

	/// A concrete entity tag against a resource that carries no ETag;
	/// only `*` has meaning there.
	#[error("conditional header requires an entity tag on the target resource; only \"*\" applies")]
	InapplicablePrecondition,
}

impl ConditionalError {
	pub fn status_code(&self) -> StatusCode {
		StatusCode::BAD_REQUEST
	}
}

impl From<ConditionalError> for grappelli_http::Error {
	fn from(err: ConditionalError) -> Self {
		grappelli_http::Error::BadRequest(err.to_string())
	}
}
