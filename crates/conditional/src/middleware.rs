//! Conditional Request Middleware
//!
//! Applies the precondition decision table around a handler and
//! enforces the restricted 304 header contract.

use async_trait::async_trait;
use bytes::Bytes;
use hyper::header::{CONTENT_LENGTH, DATE, ETAG, HeaderName, IF_MATCH, IF_NONE_MATCH};
use hyper::{HeaderMap, Method, StatusCode};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

use grappelli_http::{Handler, Middleware, Request, Response, Result};

use crate::error::ConditionalError;
use crate::etag::{EntityTag, Precondition};
use crate::evaluator::{ConditionalOutcome, evaluate};

/// Conditional request middleware
///
/// Parses `If-Match`/`If-None-Match`, resolves the response's entity
/// tag (the handler's own `ETag` header, or one generated from the
/// body), and maps the evaluator's outcome onto the response:
/// - `NotModified` → 304 carrying ONLY `ETag`, `Date`,
///   `Content-Length: 0` and the configured allow-list of custom
///   headers. Everything else is dropped; this is a strict contract,
///   not best-effort.
/// - `PreconditionFailed` → 412.
/// - `BadRequest` → 400 with the specific conditional error.
///
/// Only GET and HEAD responses are processed; write-path preconditions
/// belong in the provider, which calls
/// [`evaluate`](crate::evaluate) before mutating anything.
pub struct ConditionalMiddleware {
	/// Whether to generate ETags from the body when the handler set
	/// none
	generate_etag: bool,
	/// Custom response headers allowed through on a 304
	preserved_headers: Vec<HeaderName>,
}

impl ConditionalMiddleware {
	/// Create middleware with automatic ETag generation enabled.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use async_trait::async_trait;
	/// use bytes::Bytes;
	/// use grappelli_conditional::ConditionalMiddleware;
	/// use grappelli_http::{Handler, Middleware, Request, Response, Result};
	/// use hyper::{HeaderMap, Method, StatusCode, Uri, Version};
	///
	/// struct TestHandler;
	///
	/// #[async_trait]
	/// impl Handler for TestHandler {
	///     async fn handle(&self, _request: Request) -> Result<Response> {
	///         Ok(Response::ok().with_body(Bytes::from("content")))
	///     }
	/// }
	///
	/// # tokio_test::block_on(async {
	/// let middleware = ConditionalMiddleware::new();
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/items/1"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	///
	/// let response = middleware.process(request, Arc::new(TestHandler)).await.unwrap();
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.headers.contains_key(hyper::header::ETAG));
	/// # });
	/// ```
	pub fn new() -> Self {
		Self {
			generate_etag: true,
			preserved_headers: Vec::new(),
		}
	}

	/// Create middleware that never generates ETags; only handler-set
	/// tags are evaluated.
	pub fn without_etag() -> Self {
		Self {
			generate_etag: false,
			preserved_headers: Vec::new(),
		}
	}

	/// Allow the named custom headers through on a 304.
	pub fn with_preserved_headers(
		mut self,
		headers: impl IntoIterator<Item = HeaderName>,
	) -> Self {
		self.preserved_headers = headers.into_iter().collect();
		self
	}

	fn parse_precondition(
		headers: &HeaderMap,
		name: HeaderName,
	) -> std::result::Result<Option<Precondition>, ConditionalError> {
		match headers.get(&name).and_then(|v| v.to_str().ok()) {
			Some(value) => Precondition::parse(value).map(Some),
			None => Ok(None),
		}
	}

	/// Build the restricted 304 response from the full response.
	fn not_modified_from(&self, response: &Response) -> Response {
		let mut not_modified = Response::new(StatusCode::NOT_MODIFIED);

		if let Some(etag) = response.headers.get(ETAG) {
			not_modified.headers.insert(ETAG, etag.clone());
		}
		match response.headers.get(DATE) {
			Some(date) => {
				not_modified.headers.insert(DATE, date.clone());
			}
			None => {
				let now = httpdate::fmt_http_date(SystemTime::now());
				if let Ok(value) = now.parse() {
					not_modified.headers.insert(DATE, value);
				}
			}
		}
		for name in &self.preserved_headers {
			if let Some(value) = response.headers.get(name) {
				not_modified.headers.insert(name.clone(), value.clone());
			}
		}
		not_modified
			.headers
			.insert(CONTENT_LENGTH, hyper::header::HeaderValue::from_static("0"));

		not_modified
	}
}

impl Default for ConditionalMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for ConditionalMiddleware {
	async fn process(&self, request: Request, handler: Arc<dyn Handler>) -> Result<Response> {
		let preconditions = Self::parse_precondition(&request.headers, IF_MATCH).and_then(
			|if_match| {
				Self::parse_precondition(&request.headers, IF_NONE_MATCH)
					.map(|if_none_match| (if_match, if_none_match))
			},
		);
		let (if_match, if_none_match) = match preconditions {
			Ok(parsed) => parsed,
			Err(err) => {
				debug!(%err, "rejecting malformed conditional header");
				return Ok(Response::bad_request().with_body(Bytes::from(err.to_string())));
			}
		};
		let method = request.method.clone();

		let mut response = handler.handle(request).await?;

		if method != Method::GET && method != Method::HEAD {
			return Ok(response);
		}
		if !response.status.is_success() {
			return Ok(response);
		}

		// Resolve the response's entity tag
		let handler_etag = response
			.headers
			.get(ETAG)
			.and_then(|v| v.to_str().ok())
			.map(str::to_string);
		let current = match handler_etag {
			Some(raw) => match EntityTag::parse(&raw) {
				Ok(tag) => Some(tag),
				// a handler that sets a malformed ETag is a server bug
				Err(err) => {
					return Err(grappelli_http::Error::Internal(format!(
						"handler produced an invalid ETag header: {err}"
					)));
				}
			},
			None if self.generate_etag => {
				let generated = EntityTag::from_body(&response.body);
				response
					.headers
					.insert(ETAG, generated.to_string().parse().expect("hex etag is a valid header value"));
				Some(generated)
			}
			None => None,
		};

		if if_match.is_none() && if_none_match.is_none() {
			return Ok(response);
		}

		match evaluate(current.as_ref(), if_match.as_ref(), if_none_match.as_ref()) {
			ConditionalOutcome::Proceed => Ok(response),
			ConditionalOutcome::NotModified => {
				debug!("serving 304 from conditional evaluation");
				Ok(self.not_modified_from(&response))
			}
			ConditionalOutcome::PreconditionFailed => Ok(Response::precondition_failed()
				.with_body(Bytes::from(&b"Precondition Failed"[..]))),
			ConditionalOutcome::BadRequest => {
				let err = if if_match.is_some() && if_none_match.is_some() {
					ConditionalError::ConflictingPreconditions
				} else {
					ConditionalError::InapplicablePrecondition
				};
				Ok(Response::bad_request().with_body(Bytes::from(err.to_string())))
			}
		}
	}
}
