//! Cancellable async-call state.
//!
//! [`AsyncCall`] tracks one asynchronous operation at a time for its owner:
//! starting a call supersedes and aborts the previous one, and only the
//! latest call may publish its result. Each call captures a generation
//! number; a result whose generation is no longer current is dropped.
//! Dropping the owner aborts the current call and blocks any later commit.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use crate::{AbortHandle, AbortReason, AbortSignal};

/// Observable state of an [`AsyncCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum CallState<T, E> {
    /// No call made yet, or the latest call was dropped unfinished.
    Idle,
    /// A call is running; the previous result has been cleared.
    InFlight,
    /// The latest call finished.
    Settled(Result<T, E>),
}

impl<T, E> CallState<T, E> {
    /// A call is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Result of the latest finished call.
    #[must_use]
    pub const fn result(&self) -> Option<&Result<T, E>> {
        match self {
            Self::Settled(result) => Some(result),
            Self::Idle | Self::InFlight => None,
        }
    }
}

#[derive(Debug, Default)]
struct Control {
    generation: u64,
    handle: Option<AbortHandle>,
    torn_down: bool,
}

struct Shared<T, E> {
    control: Mutex<Control>,
    state: watch::Sender<CallState<T, E>>,
}

impl<T, E> Shared<T, E> {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, generation: u64, result: &Result<T, E>)
    where
        T: Clone,
        E: Clone,
    {
        let mut control = self.control();
        if control.torn_down || control.generation != generation {
            debug!(generation, "discarding stale result");
            return;
        }
        control.handle = None;
        self.state.send_replace(CallState::Settled(result.clone()));
    }

    fn release(&self, generation: u64) {
        let mut control = self.control();
        if control.torn_down || control.generation != generation {
            return;
        }
        debug!(generation, "call dropped before settling");
        control.handle = None;
        self.state.send_replace(CallState::Idle);
    }
}

/// Hands the holder back to idle when a call future is dropped before it
/// settles.
struct Pending<T, E> {
    shared: Arc<Shared<T, E>>,
    generation: u64,
    settled: bool,
}

impl<T, E> Pending<T, E> {
    fn settle(mut self, result: &Result<T, E>)
    where
        T: Clone,
        E: Clone,
    {
        self.settled = true;
        self.shared.commit(self.generation, result);
    }
}

impl<T, E> Drop for Pending<T, E> {
    fn drop(&mut self) {
        if !self.settled {
            self.shared.release(self.generation);
        }
    }
}

/// Holder of the state of one asynchronous operation at a time.
///
/// ```
/// use vetted::AsyncCall;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let state = AsyncCall::<u32, String>::new();
/// let result = state.call(|_signal| async { Ok(42) }).await;
///
/// assert_eq!(result, Ok(42));
/// assert_eq!(state.result(), Some(Ok(42)));
/// assert!(!state.is_loading());
/// # }
/// ```
pub struct AsyncCall<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Default for AsyncCall<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for AsyncCall<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncCall")
            .field("control", &*self.shared.control())
            .finish_non_exhaustive()
    }
}

impl<T, E> AsyncCall<T, E> {
    /// Idle holder.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(CallState::Idle);
        Self {
            shared: Arc::new(Shared {
                control: Mutex::new(Control::default()),
                state,
            }),
        }
    }

    /// Start a call, superseding the current one.
    ///
    /// The bookkeeping happens before this method returns: the previous call
    /// is aborted with [`AbortReason::Superseded`] and the state becomes
    /// [`CallState::InFlight`]. `f` receives the signal of the new call and
    /// must resolve promptly once it fires.
    ///
    /// The returned future resolves to the result of `f`. That result is
    /// published only if no newer call started and the holder still exists.
    /// Dropping the future before it resolves returns a still-current call
    /// to [`CallState::Idle`].
    pub fn call<F, Fut>(&self, f: F) -> impl Future<Output = Result<T, E>> + Send + 'static
    where
        F: FnOnce(AbortSignal) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Clone + Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        let handle = AbortHandle::new();
        let signal = handle.signal();
        let generation = {
            let mut control = self.shared.control();
            if let Some(previous) = control.handle.replace(handle) {
                debug!(generation = control.generation, "superseding call");
                previous.abort(AbortReason::Superseded);
            }
            control.generation += 1;
            self.shared.state.send_replace(CallState::InFlight);
            control.generation
        };

        let pending = Pending {
            shared: Arc::clone(&self.shared),
            generation,
            settled: false,
        };
        let operation = f(signal);
        async move {
            let result = operation.await;
            pending.settle(&result);
            result
        }
    }

    /// Abort the current call, if any, with [`AbortReason::Manual`].
    ///
    /// The call stays current: the failure it resolves with is published.
    pub fn abort(&self) {
        if let Some(handle) = &self.shared.control().handle {
            handle.abort(AbortReason::Manual);
        }
    }

    /// A call is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CallState<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.shared.state.borrow().clone()
    }

    /// Result of the latest finished call.
    #[must_use]
    pub fn result(&self) -> Option<Result<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.shared.state.borrow().result().cloned()
    }

    /// Watch state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CallState<T, E>> {
        self.shared.state.subscribe()
    }
}

impl<T, E> Drop for AsyncCall<T, E> {
    fn drop(&mut self) {
        let mut control = self.shared.control();
        control.torn_down = true;
        if let Some(handle) = control.handle.take() {
            debug!(generation = control.generation, "tearing down in-flight call");
            handle.abort(AbortReason::Teardown);
        }
    }
}
