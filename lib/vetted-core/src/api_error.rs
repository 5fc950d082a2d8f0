//! API-level error taxonomy.
//!
//! Every failure of an endpoint call lands in exactly one [`ApiError`]
//! variant. Nothing in the call pipeline panics; callers branch on the
//! variant.

use std::fmt;

use derive_more::Display;
use serde_json::Value;

use crate::{Error, Issues};

/// Why an endpoint call failed.
///
/// `E` is the validated error body of [`ApiError::ErrorResponse`].
#[derive(Debug, Clone, Display)]
pub enum ApiError<E> {
    /// The transport failed: network, DNS, TLS, timeout or abort.
    #[display("fetch error: {cause}")]
    Fetch {
        /// Underlying transport error.
        cause: Error,
    },

    /// The response body was not UTF-8 text or not JSON.
    #[display("parse error: {message}")]
    Parse {
        /// Decoder message.
        message: String,
        /// The raw text, when it could be read.
        raw: Option<String>,
    },

    /// The decoded body did not satisfy the declared schema.
    #[display("schema error: {issues}")]
    Schema {
        /// Validation issues.
        issues: Issues,
        /// The decoded JSON that failed validation.
        raw: Value,
    },

    /// The server answered with a non-success status and a body matching
    /// the declared error schema.
    #[display("error response {status}: {message}")]
    ErrorResponse {
        /// HTTP status code.
        status: u16,
        /// Status text.
        message: String,
        /// Validated error body.
        body: E,
    },

    /// The call parameters were rejected before any network I/O.
    #[display("invalid request data: {message}")]
    RequestData {
        /// Offending parameter, when there is one.
        field: Option<String>,
        /// What is wrong with it.
        message: String,
    },
}

impl<E: fmt::Debug> std::error::Error for ApiError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch { cause } => Some(cause),
            _ => None,
        }
    }
}

impl<E> From<Error> for ApiError<E> {
    fn from(cause: Error) -> Self {
        Self::Fetch { cause }
    }
}

impl<E> From<crate::ParamsError> for ApiError<E> {
    fn from(err: crate::ParamsError) -> Self {
        let (field, message) = err.into_parts();
        Self::RequestData { field, message }
    }
}

impl<E> ApiError<E> {
    /// Returns `true` for a fetch error.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Returns `true` for a parse error.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` for a schema error.
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Returns `true` for an error response.
    #[must_use]
    pub const fn is_error_response(&self) -> bool {
        matches!(self, Self::ErrorResponse { .. })
    }

    /// Returns `true` for a request-data error.
    #[must_use]
    pub const fn is_request_data(&self) -> bool {
        matches!(self, Self::RequestData { .. })
    }

    /// HTTP status of an error response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ErrorResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Validated body of an error response.
    #[must_use]
    pub const fn body(&self) -> Option<&E> {
        match self {
            Self::ErrorResponse { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Transform the error body.
    pub fn map_body<F, E2>(self, f: F) -> ApiError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Fetch { cause } => ApiError::Fetch { cause },
            Self::Parse { message, raw } => ApiError::Parse { message, raw },
            Self::Schema { issues, raw } => ApiError::Schema { issues, raw },
            Self::ErrorResponse {
                status,
                message,
                body,
            } => ApiError::ErrorResponse {
                status,
                message,
                body: f(body),
            },
            Self::RequestData { field, message } => ApiError::RequestData { field, message },
        }
    }
}
