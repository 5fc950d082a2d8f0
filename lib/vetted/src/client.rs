//! hyper-based transport behind [`crate::ApiClient`].
//!
//! The transport is a stack of tower services. At the bottom sits the pooled
//! hyper client; [`HyperClientBuilder::layer`] wraps it in middleware. The
//! whole stack is erased into one cloneable, `Sync` service so that a single
//! [`HyperClient`] can be shared by every endpoint of an API client.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tower::util::BoxCloneSyncService;
use tower::{Layer, ServiceExt};
use tower_service::Service;

use crate::middleware::LoggingLayer;
use crate::{
    Error, Request, Response, Result,
    config::ClientConfig,
    connector::https_connector,
};

/// Type-erased transport stack.
pub type BoxedService = BoxCloneSyncService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by the transport services.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

type Pool = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Bottom of the stack: one exchange over the connection pool.
#[derive(Clone)]
struct Exchange {
    pool: Pool,
    timeout: Duration,
}

impl Exchange {
    fn new(config: &ClientConfig) -> Self {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(https_connector(config));
        Self {
            pool,
            timeout: config.timeout,
        }
    }

    /// Send the request and read the whole body, within the timeout.
    async fn run(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = to_hyper(request)?;
        tokio::time::timeout(self.timeout, async {
            let response = self.pool.request(request).await.map_err(classify)?;
            let status = response.status().as_u16();
            let reason = wire_reason(response.extensions());
            let headers = response_headers(response.headers());
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|err| Error::connection(format!("reading body: {err}")))?
                .to_bytes();
            let response = Response::new(status, headers, body);
            Ok(match reason {
                Some(reason) => response.with_reason(reason),
                None => response,
            })
        })
        .await
        .map_err(|_| Error::Timeout)?
    }
}

impl Service<Request<Bytes>> for Exchange {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().run(request))
    }
}

fn to_hyper(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
    let (method, url, headers, body, extensions) = request.into_parts();

    let mut builder = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str());
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut request = builder
        .body(body.map_or_else(Full::default, Full::new))
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    *request.extensions_mut() = extensions;
    Ok(request)
}

/// hyper only records the HTTP/1 reason phrase when it differs from the
/// canonical one.
fn wire_reason(extensions: &http::Extensions) -> Option<String> {
    extensions
        .get::<hyper::ext::ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
}

/// Header names come out lowercase; non-text values are skipped and only
/// the first value of a repeated header is kept.
fn response_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
    let mut out = HashMap::with_capacity(headers.keys_len());
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            out.entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    out
}

/// TLS failures are found by walking the source chain for a rustls error,
/// looking inside `io::Error` wrappers on the way.
#[allow(clippy::needless_pass_by_value)]
fn classify(err: hyper_util::client::legacy::Error) -> Error {
    let mut source: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(&err);
    while let Some(cause) = source {
        let tls = cause.is::<rustls::Error>()
            || cause
                .downcast_ref::<std::io::Error>()
                .and_then(std::io::Error::get_ref)
                .is_some_and(|inner| inner.is::<rustls::Error>());
        if tls {
            return Error::tls(cause.to_string());
        }
        source = cause.source();
    }
    Error::connection(err.to_string())
}

/// Pooled HTTP/1.1 + HTTP/2 client over rustls, with optional tower layers.
///
/// This is the default transport of [`crate::ApiClient`]. Cloning is cheap
/// and clones share the connection pool.
///
/// ```ignore
/// use std::time::Duration;
/// use vetted::HyperClient;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    service: BoxedService,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with the default configuration and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl vetted_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.service.clone().oneshot(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.service.call(request)
    }
}

type Wrap = Box<dyn FnOnce(BoxedService) -> BoxedService + Send>;

/// Builder for [`HyperClient`].
///
/// Layers apply in insertion order: the last layer added is the outermost
/// and sees each request first.
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfig,
    layers: Vec<Wrap>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Whole-exchange timeout, body read included.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// TCP connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Maximum idle connections kept per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// How long an idle connection stays in the pool.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Wrap the stack built so far in a tower layer.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send + 'static,
    {
        self.layers.push(Box::new(move |service| {
            BoxCloneSyncService::new(layer.layer(service))
        }));
        self
    }

    /// Log every exchange at info level.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Log every exchange at debug level, request header names included.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Replace the whole transport configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble the stack.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = self.config;
        let service = self.layers.into_iter().fold(
            BoxCloneSyncService::new(Exchange::new(&config)),
            |service, wrap| wrap(service),
        );
        HyperClient { service, config }
    }
}
