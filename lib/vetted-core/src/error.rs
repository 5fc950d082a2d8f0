//! Transport error type.
//!
//! [`Error`] covers what can go wrong below the API layer: connecting,
//! TLS, timeouts, aborts and malformed requests. The API-level taxonomy
//! lives in [`crate::ApiError`], which wraps these as fetch errors.

use derive_more::{Display, Error, From};

use crate::AbortReason;

/// Transport-level error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The request was aborted through its abort signal.
    #[display("request aborted: {_0}")]
    #[from]
    Aborted(#[error(not(source))] AbortReason),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the abort reason if the request was aborted.
    #[must_use]
    pub const fn abort_reason(&self) -> Option<AbortReason> {
        match self {
            Self::Aborted(reason) => Some(*reason),
            _ => None,
        }
    }
}
