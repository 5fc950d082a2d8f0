//! Call state bound to a single endpoint.

use std::sync::Arc;

use tokio::sync::watch;

use crate::invoker::{CallOptions, CallResult, Failure, Success};
use crate::{AsyncCall, Bound, CallState, HttpClient, HyperClient, Ignored, IntoParams, Schema};

type EndpointState<B, S, E> = AsyncCall<
    Success<<B as Schema>::Output, <S as Schema>::Output>,
    Failure<<B as Schema>::Output, <E as Schema>::Output>,
>;

/// An [`AsyncCall`] specialised to one bound endpoint.
///
/// Each call forwards the abort signal of the state holder to the endpoint,
/// so superseding, aborting or dropping the holder cancels the request.
pub struct ApiCall<P, S, E, C = HyperClient, B = Ignored>
where
    S: Schema,
    E: Schema,
    B: Schema,
{
    endpoint: Arc<Bound<P, S, E, C, B>>,
    state: EndpointState<B, S, E>,
}

impl<P, S, E, C, B> std::fmt::Debug for ApiCall<P, S, E, C, B>
where
    S: Schema,
    E: Schema,
    B: Schema,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCall")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .finish()
    }
}

impl<P, S, E, C, B> ApiCall<P, S, E, C, B>
where
    P: IntoParams + Send + 'static,
    S: Schema + Send + Sync + 'static,
    E: Schema + Send + Sync + 'static,
    C: HttpClient + 'static,
    B: Schema + Send + Sync + 'static,
    S::Output: Clone + Send + Sync + 'static,
    E::Output: Clone + Send + Sync + 'static,
    B::Output: Clone + Send + Sync + 'static,
{
    /// Idle holder for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Bound<P, S, E, C, B>) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
            state: AsyncCall::new(),
        }
    }

    /// Holder that issues one call with `params` right away.
    ///
    /// The call runs on the current tokio runtime; its outcome shows up in
    /// [`ApiCall::state`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn on_mount(endpoint: Bound<P, S, E, C, B>, params: P) -> Self {
        let holder = Self::new(endpoint);
        tokio::spawn(holder.call(params));
        holder
    }

    /// Call the endpoint, superseding any call in flight.
    pub fn call(
        &self,
        params: P,
    ) -> impl Future<Output = CallResult<B::Output, S::Output, E::Output>> + Send + 'static {
        let endpoint = Arc::clone(&self.endpoint);
        self.state.call(move |signal| async move {
            endpoint
                .call(params, CallOptions::new().abort(signal))
                .await
        })
    }
}

impl<P, S, E, C, B> ApiCall<P, S, E, C, B>
where
    S: Schema,
    E: Schema,
    B: Schema,
{
    /// Abort the call in flight.
    pub fn abort(&self) {
        self.state.abort();
    }

    /// A call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Current state.
    #[must_use]
    pub fn state(
        &self,
    ) -> CallState<Success<B::Output, S::Output>, Failure<B::Output, E::Output>>
    where
        S::Output: Clone,
        E::Output: Clone,
        B::Output: Clone,
    {
        self.state.state()
    }

    /// Result of the latest finished call.
    #[must_use]
    pub fn result(&self) -> Option<CallResult<B::Output, S::Output, E::Output>>
    where
        S::Output: Clone,
        E::Output: Clone,
        B::Output: Clone,
    {
        self.state.result()
    }

    /// Watch state changes.
    #[must_use]
    pub fn subscribe(
        &self,
    ) -> watch::Receiver<CallState<Success<B::Output, S::Output>, Failure<B::Output, E::Output>>>
    {
        self.state.subscribe()
    }

    /// The bound endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Bound<P, S, E, C, B> {
        &self.endpoint
    }
}
