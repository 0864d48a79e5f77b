//! The handler/middleware seam.
//!
//! Middleware wraps a handler and may short-circuit with its own
//! response (304, 400, 412) before or after delegating.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;

/// A terminal request handler.
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// A processing step wrapped around a handler.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use grappelli_http::{Handler, Middleware, Request, Response, Result};
/// use hyper::{Method, StatusCode, Uri, Version, HeaderMap};
/// use bytes::Bytes;
///
/// struct Ok200;
///
/// #[async_trait]
/// impl Handler for Ok200 {
///     async fn handle(&self, _request: Request) -> Result<Response> {
///         Ok(Response::ok())
///     }
/// }
///
/// struct Passthrough;
///
/// #[async_trait]
/// impl Middleware for Passthrough {
///     async fn process(&self, request: Request, handler: Arc<dyn Handler>) -> Result<Response> {
///         handler.handle(request).await
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let request = Request::new(
///     Method::GET,
///     Uri::from_static("/"),
///     Version::HTTP_11,
///     HeaderMap::new(),
///     Bytes::new(),
/// );
/// let response = Passthrough.process(request, Arc::new(Ok200)).await.unwrap();
/// assert_eq!(response.status, StatusCode::OK);
/// # });
/// ```
#[async_trait]
pub trait Middleware: Send + Sync {
	async fn process(&self, request: Request, handler: Arc<dyn Handler>) -> Result<Response>;
}
