use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};

/// HTTP Request representation
///
/// A plain value type carrying the parts of an incoming request the
/// middleware chain and handlers need. Bodies are fully buffered; this
/// toolkit negotiates headers, it does not stream.
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Create a new Request from its parts
	///
	/// # Examples
	///
	/// ```
	/// use grappelli_http::Request;
	/// use hyper::{Method, Uri, Version, HeaderMap};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/items/1"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.method, Method::GET);
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
		}
	}

	/// Look up a header value as a string slice.
	///
	/// Returns `None` when the header is absent or not valid UTF-8.
	pub fn header(&self, name: impl hyper::header::AsHeaderName) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}
