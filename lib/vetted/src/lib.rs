//! Schema-validated HTTP API client.
//!
//! Declare endpoints as constants, bind them to an [`ApiClient`] and get a
//! typed [`Result`](std::result::Result) back from every call: either a
//! validated body or one [`ApiError`] variant. Nothing panics on bad input
//! from the network.
//!
//! # Example
//!
//! ```ignore
//! use vetted::prelude::*;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! pub struct Project {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Clone, Deserialize)]
//! pub struct Problem {
//!     error: String,
//! }
//!
//! vetted::endpoints! {
//!     pub struct ProjectApi {
//!         get: Endpoint<Params, Shape<Project>, Shape<Problem>> =
//!             Endpoint::get("/projects/{id}", Shape::new(), Shape::new()),
//!     }
//! }
//!
//! let client = ApiClient::builder("https://api.example.com").build()?;
//! let api = ProjectApi::new(&client);
//! match api.get.call(Params::new().with("id", 42_u64), CallOptions::new()).await {
//!     Ok(response) => println!("{}", response.body.name),
//!     Err(ApiError::ErrorResponse { status, body, .. }) => eprintln!("{status}: {}", body.error),
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```
//!
//! See the [tutorial][_tutorial] for a complete guide.

pub mod _tutorial;
mod api_call;
mod api_client;
mod call_state;
mod client;
mod config;
mod connector;
mod endpoint;
mod invoker;
pub mod middleware;
pub mod prelude;

pub use api_call::ApiCall;
pub use api_client::{ApiClient, ApiClientBuilder, Bound};
pub use call_state::{AsyncCall, CallState};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, Credentials, FetchOptions};
pub use endpoint::Endpoint;
pub use invoker::{ApiResponse, CallOptions, CallResult, Failure, Success};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use vetted_core::{
    AbortHandle, AbortReason, AbortSignal, ApiError, Blob, BodyEncoding, EncodedBody, Error,
    Form, HttpClient, Ignored, IntoParams, Issue, Issues, Merged, Method, ParamValue, Params,
    ParamsError, Part, PathMode, PathTemplate, Request, RequestBuilder, RequestContext,
    Response, Result, Schema, Shape, outcome, schema, validate_merged,
};

// Re-export http types for status codes and headers
pub use vetted_core::{StatusCode, header};
