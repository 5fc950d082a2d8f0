//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, extensions and bodies.
//!
//! # Example
//!
//! ```
//! use vetted_core::{Method, PathTemplate, Request};
//! use bytes::Bytes;
//!
//! let request = Request::<Bytes>::builder(Method::Get, "https://api.example.com/users/1".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .extension(PathTemplate::new("/users/{id}"))
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::Extensions;

use crate::Method;

/// An HTTP request with method, URL, headers, extensions and optional body.
///
/// Header lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    extensions: Extensions,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Typed request extensions (path template, credentials mode...).
    #[must_use]
    pub const fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body, extensions).
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        url::Url,
        HashMap<String, String>,
        Option<B>,
        Extensions,
    ) {
        (
            self.method,
            self.url,
            self.headers,
            self.body,
            self.extensions,
        )
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    extensions: Extensions,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            extensions: Extensions::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any header with the same name in another case.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Removes headers by name, ignoring case.
    #[must_use]
    pub fn without_headers(mut self, names: &[&str]) -> Self {
        self.headers
            .retain(|key, _| !names.iter().any(|name| key.eq_ignore_ascii_case(name)));
        self
    }

    /// Inserts a typed extension.
    #[must_use]
    pub fn extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            extensions: self.extensions,
            body: self.body,
        }
    }
}
