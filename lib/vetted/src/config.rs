//! Transport and fetch configuration.
//!
//! [`ClientConfig`] tunes the hyper transport and is fixed once the
//! [`crate::HyperClient`] is built. [`FetchOptions`] applies to every
//! endpoint call of one [`crate::ApiClient`].

use std::time::Duration;

/// Settings of the HTTP transport.
///
/// ```
/// use std::time::Duration;
/// use vetted::ClientConfig;
///
/// let config = ClientConfig::default().timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout, Duration::from_secs(5));
/// assert_eq!(config.connect_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline of one exchange, from dispatch to the last body byte.
    pub timeout: Duration,
    /// Deadline of the TCP connect.
    pub connect_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_idle_per_host: usize,
    /// How long a connection may stay idle in the pool.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Set [`ClientConfig::timeout`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set [`ClientConfig::connect_timeout`].
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set [`ClientConfig::pool_idle_per_host`].
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = count;
        self
    }

    /// Set [`ClientConfig::pool_idle_timeout`].
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }
}

/// Whether credentials travel with the requests of an API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Send every header of the request context.
    #[default]
    Include,
    /// Strip `Authorization` and `Cookie` before dispatch.
    Omit,
}

impl Credentials {
    /// Headers removed in [`Credentials::Omit`] mode.
    pub const SENSITIVE_HEADERS: &'static [&'static str] = &["authorization", "cookie"];
}

/// Transport options applied to every endpoint of an API client.
///
/// The per-call abort signal is merged in at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Credentials mode.
    pub credentials: Credentials,
    /// Deadline of a single call, on top of the transport timeout.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Default options: credentials included, no extra timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credentials mode.
    #[must_use]
    pub const fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the per-call deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn setters_leave_other_fields_alone() {
        let config = ClientConfig::default()
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16);

        check!(config.timeout == Duration::from_secs(30));
        check!(config.connect_timeout == Duration::from_secs(5));
        check!(config.pool_idle_per_host == 16);
        check!(config.pool_idle_timeout == Duration::from_secs(90));
    }

    #[test]
    fn fetch_options_include_credentials_by_default() {
        let options = FetchOptions::default();
        check!(options.credentials == Credentials::Include);
        check!(options.timeout == None);
    }

    #[test]
    fn fetch_options_setters() {
        let options = FetchOptions::new()
            .credentials(Credentials::Omit)
            .timeout(Duration::from_millis(250));
        check!(options.credentials == Credentials::Omit);
        check!(options.timeout == Some(Duration::from_millis(250)));
    }

    #[test]
    fn sensitive_headers_are_lowercase() {
        for name in Credentials::SENSITIVE_HEADERS {
            check!(*name == name.to_lowercase());
        }
    }
}
