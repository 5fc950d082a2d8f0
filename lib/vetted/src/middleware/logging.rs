//! Exchange logging.
//!
//! Each exchange runs inside an `http_request` span. The span carries the
//! method, the concrete URL and, when the request comes from an endpoint
//! call, the [`PathTemplate`] it was rendered from; status and elapsed time
//! are recorded on the span once the exchange ends.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::field::Empty;
use tracing::{Instrument, Level, Span, debug, info, span, warn};

use crate::{Error, PathTemplate, Request, Response, Result};

/// Verbosity of [`LoggingLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// One line per exchange outcome.
    #[default]
    Info,
    /// Also log request header names and body presence before dispatch.
    Debug,
}

/// Layer producing [`Logging`] services.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

impl LoggingLayer {
    /// Info-level logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Debug-level logging.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Verbosity of the services built by this layer.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service logging every exchange of its inner service.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

fn exchange_span(request: &Request<Bytes>) -> Span {
    let template = request
        .extensions()
        .get::<PathTemplate>()
        .map(PathTemplate::as_str);
    span!(
        Level::INFO,
        "http_request",
        method = %request.method(),
        url = %request.url(),
        template,
        status = Empty,
        elapsed_ms = Empty,
    )
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let span = exchange_span(&request);
        if self.level == LogLevel::Debug {
            // names only: values may hold credentials
            let headers: Vec<&str> = request.headers().keys().map(String::as_str).collect();
            span.in_scope(|| debug!(?headers, has_body = request.body().is_some(), "dispatching"));
        }

        // take the ready service, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let outcome_span = span.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                outcome_span.record("elapsed_ms", elapsed_ms);

                match &result {
                    Ok(response) => {
                        outcome_span.record("status", response.status());
                        if response.is_success() {
                            info!("exchange completed");
                        } else {
                            warn!(reason = response.status_text(), "exchange returned an error status");
                        }
                    }
                    Err(err) => warn!(error = %err, "exchange failed"),
                }
                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use assert2::check;
    use tower::ServiceExt;

    use super::*;
    use crate::Method;

    #[test]
    fn layer_levels() {
        check!(LoggingLayer::new().level() == LogLevel::Info);
        check!(LoggingLayer::debug().level() == LogLevel::Debug);
    }

    #[tokio::test]
    async fn request_and_response_pass_through_untouched() {
        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let inner = tower::service_fn(move |request: Request<Bytes>| {
            let recorder = Arc::clone(&recorder);
            async move {
                let template = request.extensions().get::<PathTemplate>().copied();
                *recorder.lock().expect("lock") = template;
                Ok::<_, Error>(Response::new(418, HashMap::new(), Bytes::from_static(b"{}")))
            }
        });
        let service = LoggingLayer::debug().layer(inner);
        let url = url::Url::parse("http://localhost/teapots/7").expect("url");
        let request = Request::builder(Method::Get, url)
            .extension(PathTemplate::new("/teapots/{id}"))
            .build();

        let response = service.oneshot(request).await.expect("response");
        check!(response.status() == 418);
        check!(*seen.lock().expect("lock") == Some(PathTemplate::new("/teapots/{id}")));
    }

    #[tokio::test]
    async fn errors_pass_through() {
        let inner = tower::service_fn(|_request: Request<Bytes>| async {
            Err::<Response<Bytes>, _>(Error::Timeout)
        });
        let url = url::Url::parse("http://localhost/slow").expect("url");
        let request = Request::builder(Method::Post, url).build();

        let err = LoggingLayer::new()
            .layer(inner)
            .oneshot(request)
            .await
            .expect_err("timeout");
        check!(err.is_timeout());
    }
}
