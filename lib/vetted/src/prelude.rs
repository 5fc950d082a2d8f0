//! Prelude module for convenient imports.
//!
//! ```ignore
//! use vetted::prelude::*;
//! ```

pub use crate::outcome::{err, ok, unwrap, wrap, wrap_async};
pub use crate::{
    AbortReason, ApiCall, ApiClient, ApiError, ApiResponse, AsyncCall, Blob, CallOptions,
    CallState, Credentials, Endpoint, FetchOptions, HyperClient, Ignored, Params, RequestContext,
    Schema, Shape,
};
pub use serde::{Deserialize, Serialize};
