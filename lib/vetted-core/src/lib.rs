//! Core types and traits for the vetted schema-validated HTTP client.
//!
//! This crate provides the transport-independent building blocks:
//! - [`outcome`] - Result toolkit (`ok`, `err`, `wrap`, `wrap_async`, `unwrap`)
//! - [`Method`], [`Request`], [`Response`] - HTTP types
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`Error`] and [`Result`] - Transport errors
//! - [`ApiError`] - Endpoint call failures
//! - [`Schema`] with [`Shape`], [`Ignored`] and [`schema::from_fn`] - Response validation
//! - [`Params`], [`ParamValue`], [`Blob`] - Call parameters
//! - [`PathTemplate`] - Path with `{name}` placeholders
//! - [`BodyEncoding`] - JSON or multipart request bodies
//! - [`RequestContext`] - Shared headers
//! - [`AbortHandle`] and [`AbortSignal`] - Cooperative cancellation
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod abort;
mod api_error;
mod body;
mod client;
mod context;
mod error;
mod method;
mod multipart;
pub mod outcome;
mod params;
mod path_template;
pub mod prelude;
mod request;
mod response;
pub mod schema;

pub use abort::{AbortHandle, AbortReason, AbortSignal};
pub use api_error::ApiError;
pub use body::{BodyEncoding, EncodedBody};
pub use client::HttpClient;
pub use context::RequestContext;
pub use error::{Error, Result};
pub use method::Method;
pub use multipart::{Form, Part};
pub use params::{Blob, IntoParams, ParamValue, Params, ParamsError};
pub use path_template::{PathMode, PathTemplate};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use schema::{Ignored, Issue, Issues, Merged, Schema, Shape, validate_merged};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
