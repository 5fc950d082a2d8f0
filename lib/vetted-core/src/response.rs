//! HTTP response handling.
//!
//! [`Response`] is what an [`crate::HttpClient`] hands back: status, headers
//! and the fully buffered body. Decoding and validation happen in the
//! endpoint invoker.

use std::collections::HashMap;

use bytes::Bytes;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    reason: Option<String>,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            reason: None,
            headers,
            body,
        }
    }

    /// Reason phrase sent by the server in place of the canonical one.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase of the status line.
    ///
    /// Falls back to the canonical phrase of the status when the server's
    /// phrase is unknown, and to an empty string for unregistered codes.
    #[must_use]
    pub fn status_text(&self) -> &str {
        self.reason.as_deref().unwrap_or_else(|| {
            http::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or_default()
        })
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}
