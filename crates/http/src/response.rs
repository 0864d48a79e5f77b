use bytes::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};

/// HTTP Response representation
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new Response with the given status code
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a Response with HTTP 200 OK status
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a Response with HTTP 304 Not Modified status
	///
	/// The conditional middleware builds 304 responses itself so it can
	/// enforce the restricted header set; this constructor is for
	/// handlers that short-circuit on their own.
	pub fn not_modified() -> Self {
		Self::new(StatusCode::NOT_MODIFIED)
	}

	/// Create a Response with HTTP 400 Bad Request status
	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// Create a Response with HTTP 404 Not Found status
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Create a Response with HTTP 406 Not Acceptable status
	pub fn not_acceptable() -> Self {
		Self::new(StatusCode::NOT_ACCEPTABLE)
	}

	/// Create a Response with HTTP 412 Precondition Failed status
	pub fn precondition_failed() -> Self {
		Self::new(StatusCode::PRECONDITION_FAILED)
	}

	/// Create a Response with HTTP 415 Unsupported Media Type status
	pub fn unsupported_media_type() -> Self {
		Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE)
	}

	/// Create a Response with HTTP 500 Internal Server Error status
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Create a Response with the non-standard HTTP 509 status
	/// (Bandwidth Limit Exceeded)
	pub fn bandwidth_limit_exceeded() -> Self {
		Self::new(StatusCode::from_u16(509).expect("509 is a valid status code"))
	}

	/// Set the response body
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Response;
	/// use bytes::Bytes;
	///
	/// let response = Response::ok().with_body(Bytes::from("hello"));
	/// assert_eq!(&response.body[..], b"hello");
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Insert a header, replacing any existing value.
	///
	/// Panics on invalid header values only in the builder position,
	/// where values are compile-time literals; use `headers` directly
	/// for runtime values.
	pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
		self.headers.insert(
			name,
			HeaderValue::from_str(value).expect("invalid header value"),
		);
		self
	}

	/// Set the `Content-Type` header.
	///
	/// The value is inserted verbatim: parameter order is part of the
	/// compatibility contract with deployed clients, so no
	/// normalization happens here.
	pub fn with_content_type(self, content_type: &str) -> Self {
		self.with_header(CONTENT_TYPE, content_type)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_shortcuts() {
		assert_eq!(Response::not_modified().status, StatusCode::NOT_MODIFIED);
		assert_eq!(
			Response::precondition_failed().status,
			StatusCode::PRECONDITION_FAILED
		);
		assert_eq!(Response::bandwidth_limit_exceeded().status.as_u16(), 509);
	}

	#[test]
	fn test_content_type_is_verbatim() {
		let exact = "application/json;odata.metadata=minimal;odata.streaming=true;IEEE754Compatible=false;charset=utf-8";
		let response = Response::ok().with_content_type(exact);
		assert_eq!(
			response.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(),
			exact
		);
	}
}
