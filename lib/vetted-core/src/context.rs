//! Shared per-client request context.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Headers sent with every call of the clients sharing this context.
///
/// Cloning yields another handle to the same map. Each call snapshots the
/// headers when it is dispatched, so a later `add_header` never alters a
/// request already in flight. Names are case-insensitive and stored
/// lowercase.
///
/// ```
/// use vetted_core::RequestContext;
///
/// let context = RequestContext::new();
/// let shared = context.clone();
/// context.add_header("Authorization", "Bearer abc");
/// assert_eq!(shared.header("Authorization").as_deref(), Some("Bearer abc"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: Arc<RwLock<HashMap<String, String>>>,
}

impl RequestContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header. Last write wins.
    pub fn add_header(&self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Removes a header. Removing an absent header is a no-op.
    pub fn remove_header(&self, name: &str) {
        self.headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name.to_ascii_lowercase());
    }

    /// Current value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    /// Copy of all headers at this instant, keyed by lowercase name.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn clones_share_headers() {
        let context = RequestContext::new();
        let other = context.clone();

        other.add_header("X-Tenant", "acme");
        check!(context.header("X-Tenant") == Some("acme".to_string()));
    }

    #[test]
    fn last_write_wins() {
        let context = RequestContext::new();
        context.add_header("Authorization", "Bearer one");
        context.add_header("Authorization", "Bearer two");
        check!(context.header("Authorization") == Some("Bearer two".to_string()));
    }

    #[test]
    fn remove_absent_header_is_noop() {
        let context = RequestContext::new();
        context.remove_header("Authorization");
        check!(context.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_detached() {
        let context = RequestContext::new();
        context.add_header("Authorization", "Bearer one");
        let snapshot = context.snapshot();

        context.remove_header("Authorization");
        check!(snapshot.get("authorization") == Some(&"Bearer one".to_string()));
        check!(context.header("Authorization") == None);
    }

    #[test]
    fn remove_ignores_case() {
        let context = RequestContext::new();
        context.add_header("Authorization", "Bearer one");
        context.remove_header("authorization");

        check!(context.header("Authorization") == None);
        check!(context.snapshot().is_empty());
    }

    #[test]
    fn rewrite_in_other_case_replaces_value() {
        let context = RequestContext::new();
        context.add_header("Authorization", "Bearer old");
        context.add_header("AUTHORIZATION", "Bearer new");

        let snapshot = context.snapshot();
        check!(snapshot.len() == 1);
        check!(snapshot.get("authorization") == Some(&"Bearer new".to_string()));
    }
}
