//! End-to-end pipeline tests: content-type negotiation, charset
//! negotiation, then conditional evaluation, the order a request
//! pipeline applies them in.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use grappelli::conditional::ConditionalMiddleware;
use grappelli::negotiation::{CharsetNegotiator, MediaTypeNegotiator};
use grappelli::{Handler, Middleware, Request, Response, Result, StatusCode};
use hyper::header::{ACCEPT, ACCEPT_CHARSET, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use hyper::{HeaderMap, Method, Uri, Version};

const SUPPORTED: &[&str] = &["application/json", "application/atom+xml;type=feed"];

/// A handler that performs both negotiations itself and serializes an
/// exact Content-Type, the way a resource endpoint would.
struct NegotiatingHandler;

#[async_trait]
impl Handler for NegotiatingHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		let media_types = MediaTypeNegotiator::new();
		let charsets = CharsetNegotiator::new();

		let accept = request.header(ACCEPT).unwrap_or("");
		let media_type = match media_types.select(accept, SUPPORTED)? {
			Some(selected) => selected,
			None => return Ok(Response::not_acceptable()),
		};

		let accept_charset = request.header(ACCEPT_CHARSET).unwrap_or("");
		let charset = charsets.select(accept_charset, &["utf-8", "iso-8859-5"])?;

		let content_type = format!("{media_type};charset={charset}");
		Ok(Response::ok()
			.with_content_type(&content_type)
			.with_body(Bytes::from("{\"value\":1}")))
	}
}

fn request(headers: HeaderMap) -> Request {
	Request::new(
		Method::GET,
		Uri::from_static("/items/1"),
		Version::HTTP_11,
		headers,
		Bytes::new(),
	)
}

#[tokio::test]
async fn test_negotiated_content_type_is_exact() {
	let middleware = ConditionalMiddleware::new();

	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, "application/atom+xml;q=0.9, */*;q=0.1".parse().unwrap());

	let response = middleware
		.process(request(headers), Arc::new(NegotiatingHandler))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::OK);
	assert_eq!(
		response.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap(),
		"application/atom+xml;type=feed;charset=utf-8"
	);
	assert!(response.headers.contains_key(ETAG));
}

#[tokio::test]
async fn test_conditional_round_trip() {
	let middleware = Arc::new(ConditionalMiddleware::new());
	let handler: Arc<dyn Handler> = Arc::new(NegotiatingHandler);

	// first request: fetch the representation and its generated tag
	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, "application/json".parse().unwrap());
	let first = middleware
		.process(request(headers.clone()), handler.clone())
		.await
		.unwrap();
	assert_eq!(first.status, StatusCode::OK);
	let etag = first.headers.get(ETAG).unwrap().clone();

	// second request: revalidate with the tag we were given
	headers.insert(IF_NONE_MATCH, etag.clone());
	let second = middleware.process(request(headers), handler).await.unwrap();

	assert_eq!(second.status, StatusCode::NOT_MODIFIED);
	assert!(second.body.is_empty());
	assert_eq!(second.headers.get(ETAG).unwrap(), &etag);
	assert_eq!(second.headers.get("content-length").unwrap(), "0");
	assert!(!second.headers.contains_key(CONTENT_TYPE));
}

#[tokio::test]
async fn test_unacceptable_accept_is_406() {
	let middleware = ConditionalMiddleware::new();

	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, "image/png".parse().unwrap());

	let response = middleware
		.process(request(headers), Arc::new(NegotiatingHandler))
		.await
		.unwrap();

	assert_eq!(response.status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_malformed_quality_maps_to_400() {
	let middleware = ConditionalMiddleware::new();

	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, "application/json;q=1.0000".parse().unwrap());

	let result = middleware
		.process(request(headers), Arc::new(NegotiatingHandler))
		.await;

	let err = result.unwrap_err();
	assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}
