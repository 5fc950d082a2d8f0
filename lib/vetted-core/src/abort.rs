//! Cooperative cancellation.
//!
//! An [`AbortHandle`] owns the right to cancel; every [`AbortSignal`] cloned
//! from it observes the cancellation and the [`AbortReason`] it was given.
//! Cancelling never interrupts running code: the operation holding the
//! signal has to await [`AbortSignal::aborted`] or poll
//! [`AbortSignal::is_aborted`].

use std::sync::{Arc, OnceLock};

use derive_more::Display;
use tokio_util::sync::CancellationToken;

/// Why an operation was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AbortReason {
    /// Explicit abort requested by the caller.
    #[display("manual")]
    Manual,
    /// A newer call replaced this one.
    #[display("superseded")]
    Superseded,
    /// The owner of the call went away.
    #[display("teardown")]
    Teardown,
}

#[derive(Debug, Default)]
struct Shared {
    token: CancellationToken,
    reason: OnceLock<AbortReason>,
}

/// The cancelling side of an abort pair.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    shared: Arc<Shared>,
}

impl AbortHandle {
    /// Create a fresh, not yet aborted handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a signal observing this handle.
    #[must_use]
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Abort with the given reason.
    ///
    /// The first reason wins; aborting twice keeps the original reason.
    pub fn abort(&self, reason: AbortReason) {
        let _ = self.shared.reason.set(reason);
        self.shared.token.cancel();
    }

    /// Returns `true` once [`AbortHandle::abort`] was called.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.shared.token.is_cancelled()
    }
}

/// The observing side of an abort pair.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    shared: Arc<Shared>,
}

impl AbortSignal {
    /// Returns `true` if the operation was aborted.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.shared.token.is_cancelled()
    }

    /// The abort reason, if aborted.
    #[must_use]
    pub fn reason(&self) -> Option<AbortReason> {
        self.shared.reason.get().copied()
    }

    /// Wait until the operation is aborted, yielding the reason.
    pub async fn aborted(&self) -> AbortReason {
        self.shared.token.cancelled().await;
        self.reason().unwrap_or(AbortReason::Manual)
    }
}
