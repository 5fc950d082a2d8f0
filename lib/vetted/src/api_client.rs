//! API client factory.
//!
//! [`ApiClient`] holds what every endpoint of an API shares: the transport,
//! the base URL, the base response schema, the [`RequestContext`] and the
//! [`FetchOptions`]. Binding an [`Endpoint`] to it yields a [`Bound`]
//! callable; the [`endpoints!`](crate::endpoints) macro binds a whole set at
//! once.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::config::FetchOptions;
use crate::invoker::{CallOptions, CallResult, Invocation};
use crate::{Endpoint, Error, HttpClient, HyperClient, Ignored, IntoParams, RequestContext, Schema};

struct Inner<C, B> {
    http: C,
    base_url: String,
    base_schema: B,
    context: RequestContext,
    fetch: FetchOptions,
}

/// A configured API: transport, base URL, base schema, context and options.
///
/// Cloning is cheap and clones share everything.
///
/// # Example
///
/// ```ignore
/// use vetted::{ApiClient, RequestContext};
///
/// let context = RequestContext::new();
/// let api = ApiClient::builder("https://api.example.com")
///     .context(context.clone())
///     .build()?;
/// context.add_header("Authorization", "Bearer token");
/// ```
pub struct ApiClient<C = HyperClient, B = Ignored> {
    inner: Arc<Inner<C, B>>,
}

impl<C, B> Clone for ApiClient<C, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, B> fmt::Debug for ApiClient<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("fetch", &self.inner.fetch)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Start configuring a client for `base_url`, using a default [`HyperClient`].
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            http: HyperClient::new(),
            base_schema: Ignored,
            context: None,
            fetch: FetchOptions::default(),
        }
    }
}

impl<C, B> ApiClient<C, B> {
    /// Base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Shared request context.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.inner.context
    }

    /// Transport options.
    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        self.inner.fetch
    }

    /// Underlying HTTP client.
    #[must_use]
    pub fn http_client(&self) -> &C {
        &self.inner.http
    }

    /// Bind an endpoint to this client.
    #[must_use]
    pub fn bind<P, S, E>(&self, endpoint: Endpoint<P, S, E>) -> Bound<P, S, E, C, B> {
        Bound {
            client: self.clone(),
            endpoint,
        }
    }
}

impl<C, B> ApiClient<C, B>
where
    C: HttpClient,
    B: Schema + Sync,
{
    /// Call `endpoint` once with `params`.
    ///
    /// The context headers are snapshotted at this point.
    pub async fn call<P, S, E>(
        &self,
        endpoint: &Endpoint<P, S, E>,
        params: P,
        options: CallOptions,
    ) -> CallResult<B::Output, S::Output, E::Output>
    where
        P: IntoParams,
        S: Schema + Sync,
        E: Schema + Sync,
    {
        let invocation = Invocation {
            http: &self.inner.http,
            base_url: &self.inner.base_url,
            base_schema: &self.inner.base_schema,
            headers: self.inner.context.snapshot(),
            fetch: self.inner.fetch,
            options,
        };
        invocation.invoke(endpoint, params).await
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder<C = HyperClient, B = Ignored> {
    base_url: String,
    http: C,
    base_schema: B,
    context: Option<RequestContext>,
    fetch: FetchOptions,
}

impl<C, B> fmt::Debug for ApiClientBuilder<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("base_url", &self.base_url)
            .field("has_context", &self.context.is_some())
            .field("fetch", &self.fetch)
            .finish_non_exhaustive()
    }
}

impl<C, B> ApiClientBuilder<C, B> {
    /// Schema every success and error body must also satisfy.
    #[must_use]
    pub fn base_schema<B2>(self, base_schema: B2) -> ApiClientBuilder<C, B2> {
        ApiClientBuilder {
            base_url: self.base_url,
            http: self.http,
            base_schema,
            context: self.context,
            fetch: self.fetch,
        }
    }

    /// Use a specific HTTP transport.
    #[must_use]
    pub fn http_client<C2>(self, http: C2) -> ApiClientBuilder<C2, B> {
        ApiClientBuilder {
            base_url: self.base_url,
            http,
            base_schema: self.base_schema,
            context: self.context,
            fetch: self.fetch,
        }
    }

    /// Share a request context. Without one the client gets a fresh, empty context.
    #[must_use]
    pub fn context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Transport options for every endpoint.
    #[must_use]
    pub fn fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL does not parse.
    pub fn build(self) -> Result<ApiClient<C, B>, Error> {
        Url::parse(&self.base_url)?;
        let base_url = self.base_url.trim_end_matches('/').to_string();

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http: self.http,
                base_url,
                base_schema: self.base_schema,
                context: self.context.unwrap_or_default(),
                fetch: self.fetch,
            }),
        })
    }
}

/// An endpoint bound to an [`ApiClient`]: the callable of one endpoint.
pub struct Bound<P, S, E, C = HyperClient, B = Ignored> {
    client: ApiClient<C, B>,
    endpoint: Endpoint<P, S, E>,
}

impl<P, S: Clone, E: Clone, C, B> Clone for Bound<P, S, E, C, B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl<P, S, E, C, B> fmt::Debug for Bound<P, S, E, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("client", &self.client)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl<P, S, E, C, B> Bound<P, S, E, C, B> {
    /// The endpoint declaration.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint<P, S, E> {
        &self.endpoint
    }

    /// The client the endpoint is bound to.
    #[must_use]
    pub const fn client(&self) -> &ApiClient<C, B> {
        &self.client
    }
}

impl<P, S, E, C, B> Bound<P, S, E, C, B>
where
    P: IntoParams,
    S: Schema + Sync,
    E: Schema + Sync,
    C: HttpClient,
    B: Schema + Sync,
{
    /// Call the endpoint.
    pub async fn call(
        &self,
        params: P,
        options: CallOptions,
    ) -> CallResult<B::Output, S::Output, E::Output> {
        self.client.call(&self.endpoint, params, options).await
    }
}

/// Declare a struct holding one [`Bound`] callable per endpoint.
///
/// Each field is written `name: Endpoint<Params, Success, Error> = declaration`.
/// The generated struct is generic over the transport and base schema of the
/// client it is built from, and has a `new(&ApiClient)` constructor.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use vetted::{ApiClient, Endpoint, Ignored, Shape};
///
/// #[derive(Serialize)]
/// struct NewProject {
///     name: String,
/// }
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct Project {
///     id: u64,
///     name: String,
/// }
///
/// vetted::endpoints! {
///     /// Project endpoints.
///     pub struct ProjectApi {
///         list: Endpoint<(), Shape<Vec<Project>>, Ignored> =
///             Endpoint::get("/projects", Shape::new(), Ignored),
///         create: Endpoint<NewProject, Shape<Project>, Ignored> =
///             Endpoint::post("/projects", Shape::new(), Ignored),
///     }
/// }
///
/// # fn main() -> Result<(), vetted::Error> {
/// let client = ApiClient::builder("https://api.example.com").build()?;
/// let api = ProjectApi::new(&client);
/// assert_eq!(api.create.endpoint().path().as_str(), "/projects");
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! endpoints {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : Endpoint<$params:ty, $success:ty, $error:ty> = $declaration:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name<C = $crate::HyperClient, B = $crate::Ignored> {
            $(
                $(#[$field_meta])*
                pub $field: $crate::Bound<$params, $success, $error, C, B>,
            )*
        }

        impl<C, B> $name<C, B> {
            /// Bind every endpoint to `client`.
            #[must_use]
            pub fn new(client: &$crate::ApiClient<C, B>) -> Self {
                Self {
                    $(
                        $field: client.bind::<$params, $success, $error>($declaration),
                    )*
                }
            }
        }
    };
}
