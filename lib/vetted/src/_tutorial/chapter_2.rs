//! # Chapter 2: Results & Errors
//!
//! Every call returns a `Result`; this chapter covers what is inside it.
//!
//! ## Schemas
//!
//! A [`Schema`][crate::Schema] validates decoded JSON and produces a typed
//! value. [`Shape<T>`][crate::Shape] uses `T`'s `Deserialize` impl and
//! reports the path of the failing field; [`Ignored`][crate::Ignored]
//! accepts anything; [`schema::from_fn`][crate::schema::from_fn] wraps a
//! closure.
//!
//! ## Base Schema
//!
//! APIs often wrap every body in a common envelope. Declare it once on the
//! client:
//!
//! ```ignore
//! #[derive(Debug, Clone, Deserialize)]
//! struct Envelope {
//!     request_id: String,
//! }
//!
//! let client = ApiClient::builder(url)
//!     .base_schema(Shape::<Envelope>::new())
//!     .build()?;
//! ```
//!
//! Every success and error body must then satisfy both schemas. The body of
//! a response is a [`Merged`][crate::Merged] value: it derefs to the
//! endpoint part, and [`Merged::base`][crate::Merged::base] holds the
//! envelope.
//!
//! ## Error Variants
//!
//! | Variant | When |
//! |---------|------|
//! | `Fetch` | Network, TLS, timeout or abort |
//! | `Parse` | Body not UTF-8 (`raw: None`) or not JSON (`raw: Some(text)`) |
//! | `Schema` | Body does not match the success or error schema |
//! | `ErrorResponse` | Non-2xx status with a body matching the error schema |
//! | `RequestData` | Bad parameters, detected before any I/O |
//!
//! The status is checked first: a 404 whose body happens to match the
//! success schema is still an error.
//!
//! ```ignore
//! match api.get_project.call(params, CallOptions::new()).await {
//!     Ok(response) => show(&response.body),
//!     Err(ApiError::ErrorResponse { status: 404, .. }) => show_not_found(),
//!     Err(ApiError::ErrorResponse { body, .. }) => toast(&body.error),
//!     Err(err) if err.is_fetch() => toast("network problem"),
//!     Err(err) => tracing::error!(%err, "unexpected response"),
//! }
//! ```
//!
//! ## The Result Toolkit
//!
//! [`outcome`][crate::outcome] bridges code that panics:
//!
//! ```ignore
//! use vetted::outcome::{wrap, unwrap};
//!
//! let parsed = wrap(|| legacy_parse(input));   // Err holds the panic payload
//! let value = unwrap(parsed);                  // re-raises the same payload
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 3: Call State][super::chapter_3] - Superseding, aborting, teardown
