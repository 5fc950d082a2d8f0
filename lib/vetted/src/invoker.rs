//! Endpoint invocation: path rendering, body encoding, dispatch, decoding and
//! layered validation.
//!
//! Every outcome of a call is a value. Transport failures, undecodable bodies,
//! schema mismatches, error statuses and bad parameters all come back as an
//! [`ApiError`] variant; the pipeline never panics.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;
use tracing::{Instrument, debug, debug_span, warn};

use crate::config::{Credentials, FetchOptions};
use crate::{
    AbortSignal, ApiError, Endpoint, Error, HttpClient, IntoParams, Merged, Request, Response,
    Schema, header, validate_merged,
};

/// A validated success response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// HTTP status code (2xx).
    pub status: u16,
    /// Body validated against the endpoint and base schemas.
    pub body: T,
}

/// Value of a successful call: base schema output `B`, endpoint output `S`.
pub type Success<B, S> = ApiResponse<Merged<B, S>>;

/// Failure of a call whose error schema outputs `E`.
pub type Failure<B, E> = ApiError<Merged<B, E>>;

/// Outcome of an endpoint call.
pub type CallResult<B, S, E> = Result<Success<B, S>, Failure<B, E>>;

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Signal that cancels the call.
    pub abort: Option<AbortSignal>,
}

impl CallOptions {
    /// No abort signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the call when `signal` fires.
    #[must_use]
    pub fn abort(mut self, signal: AbortSignal) -> Self {
        self.abort = Some(signal);
        self
    }
}

/// Everything a call needs besides the endpoint and its parameters.
pub(crate) struct Invocation<'a, C, B> {
    pub(crate) http: &'a C,
    pub(crate) base_url: &'a str,
    pub(crate) base_schema: &'a B,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) fetch: FetchOptions,
    pub(crate) options: CallOptions,
}

impl<C, B> Invocation<'_, C, B>
where
    C: HttpClient,
    B: Schema + Sync,
{
    pub(crate) async fn invoke<P, S, E>(
        self,
        endpoint: &Endpoint<P, S, E>,
        params: P,
    ) -> CallResult<B::Output, S::Output, E::Output>
    where
        P: IntoParams,
        S: Schema + Sync,
        E: Schema + Sync,
    {
        let span = debug_span!("api_call", method = %endpoint.method(), path = %endpoint.path());
        self.run(endpoint, params).instrument(span).await
    }

    async fn run<P, S, E>(
        self,
        endpoint: &Endpoint<P, S, E>,
        params: P,
    ) -> CallResult<B::Output, S::Output, E::Output>
    where
        P: IntoParams,
        S: Schema + Sync,
        E: Schema + Sync,
    {
        let request = self.build_request(endpoint, params)?;
        debug!(url = %request.url(), "dispatching");

        let response = dispatch(self.http, request, self.fetch.timeout, self.options.abort)
            .await
            .inspect_err(|cause| warn!(%cause, "fetch failed"))?;

        let status = response.status();
        let message = response.status_text().to_string();
        let raw = match decode(response) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(status, %err, "undecodable body");
                return Err(err);
            }
        };

        if !(200..300).contains(&status) {
            return match validate_merged(endpoint.error_schema(), self.base_schema, &raw) {
                Ok(body) => {
                    debug!(status, "error response");
                    Err(ApiError::ErrorResponse {
                        status,
                        message,
                        body,
                    })
                }
                Err(issues) => Err(schema_error(status, issues, raw)),
            };
        }

        match validate_merged(endpoint.success_schema(), self.base_schema, &raw) {
            Ok(body) => {
                debug!(status, "success");
                Ok(ApiResponse { status, body })
            }
            Err(issues) => Err(schema_error(status, issues, raw)),
        }
    }

    fn build_request<P, S, E>(
        &self,
        endpoint: &Endpoint<P, S, E>,
        params: P,
    ) -> Result<Request<Bytes>, Failure<B::Output, E::Output>>
    where
        P: IntoParams,
        E: Schema,
    {
        let params = params.into_params()?;
        let path = endpoint.path().render(&params, endpoint.path_mode())?;
        let url = url::Url::parse(&format!("{}{path}", self.base_url)).map_err(Error::from)?;

        let method = endpoint.method();
        let mut builder = Request::builder(method, url)
            .headers(self.headers.clone())
            .extension(endpoint.path());

        if method.has_body() {
            let body = endpoint.body_encoding().encode(&params)?;
            builder = builder
                .header(header::CONTENT_TYPE.as_str(), body.content_type)
                .body(body.bytes);
        }

        if self.fetch.credentials == Credentials::Omit {
            builder = builder.without_headers(Credentials::SENSITIVE_HEADERS);
        }

        Ok(builder.build())
    }
}

async fn dispatch<C: HttpClient>(
    http: &C,
    request: Request<Bytes>,
    timeout: Option<Duration>,
    abort: Option<AbortSignal>,
) -> Result<Response<Bytes>, Error> {
    let send = async {
        match timeout {
            Some(timeout) => tokio::time::timeout(timeout, http.execute(request))
                .await
                .map_err(|_| Error::Timeout)?,
            None => http.execute(request).await,
        }
    };

    match abort {
        Some(signal) => {
            tokio::select! {
                biased;
                reason = signal.aborted() => Err(Error::Aborted(reason)),
                result = send => result,
            }
        }
        None => send.await,
    }
}

fn decode<E>(response: Response<Bytes>) -> Result<Value, ApiError<E>> {
    let text = response.text().map_err(|err| ApiError::Parse {
        message: err.to_string(),
        raw: None,
    })?;
    serde_json::from_str(&text).map_err(|err| ApiError::Parse {
        message: err.to_string(),
        raw: Some(text),
    })
}

fn schema_error<E>(status: u16, issues: crate::Issues, raw: Value) -> ApiError<E> {
    warn!(status, %issues, "body does not match schema");
    ApiError::Schema { issues, raw }
}
