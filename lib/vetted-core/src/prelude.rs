//! Prelude module for convenient imports.
//!
//! ```ignore
//! use vetted_core::prelude::*;
//! ```

pub use crate::outcome::{err, ok, unwrap, wrap, wrap_async};
pub use crate::{
    AbortHandle, AbortReason, AbortSignal, ApiError, Blob, BodyEncoding, Error, HttpClient,
    Ignored, IntoParams, Merged, Method, Params, PathTemplate, RequestContext, Result, Schema,
    Shape,
};
