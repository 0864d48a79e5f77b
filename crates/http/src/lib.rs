//! # Grappelli HTTP
//!
//! Shared HTTP primitives for the Grappelli toolkit: request/response
//! types on top of `hyper`, the crate-wide error type with its status
//! code mapping, and the `Handler`/`Middleware` seam the negotiation and
//! conditional layers plug into.

pub mod error;
pub mod middleware;
pub mod request;
pub mod response;

pub use error::{Error, Result};
pub use middleware::{Handler, Middleware};
pub use request::Request;
pub use response::Response;
