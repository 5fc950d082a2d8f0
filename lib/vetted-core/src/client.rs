//! HTTP client trait.
//!
//! [`HttpClient`] is the transport seam of the endpoint invoker. The `vetted`
//! crate provides a hyper-based implementation; tests and alternative
//! runtimes can plug their own.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations return a response for every status code; only transport
/// failures are errors.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the buffered response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
