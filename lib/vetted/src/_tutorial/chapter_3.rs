//! # Chapter 3: Call State
//!
//! Track the call behind a screen, a widget or a job.
//!
//! ## `AsyncCall`
//!
//! [`AsyncCall`][crate::AsyncCall] holds the state of one call at a time:
//! `Idle`, `InFlight` or `Settled(result)`.
//!
//! ```ignore
//! let state = AsyncCall::<Vec<Project>, String>::new();
//! let result = state.call(|signal| load_projects(signal)).await;
//! assert!(!state.is_loading());
//! ```
//!
//! Starting a call while another is in flight aborts the previous one with
//! [`AbortReason::Superseded`][crate::AbortReason::Superseded]. Only the
//! latest call publishes its result, even if an older one finishes later.
//! [`AsyncCall::abort`][crate::AsyncCall::abort] cancels the current call,
//! and dropping the holder cancels it with `Teardown` and stops any further
//! update.
//!
//! Watch transitions with [`AsyncCall::subscribe`][crate::AsyncCall::subscribe],
//! a `tokio::sync::watch` receiver.
//!
//! ## `ApiCall`
//!
//! [`ApiCall`][crate::ApiCall] binds an `AsyncCall` to one endpoint and
//! passes the abort signal along, so cancelling really cancels the request:
//!
//! ```ignore
//! let projects = ApiCall::on_mount(api.list.clone(), ());
//! let mut updates = projects.subscribe();
//! while updates.changed().await.is_ok() {
//!     if let CallState::Settled(result) = &*updates.borrow() {
//!         render(result);
//!     }
//! }
//! ```
//!
//! ## Transport Options
//!
//! [`FetchOptions`][crate::FetchOptions] apply to every endpoint of a client:
//!
//! ```ignore
//! let client = ApiClient::builder(url)
//!     .fetch_options(
//!         FetchOptions::new()
//!             .credentials(Credentials::Omit)
//!             .timeout(Duration::from_secs(5)),
//!     )
//!     .build()?;
//! ```
//!
//! `Credentials::Omit` strips `Authorization` and `Cookie` from requests.
//!
//! ## Logging
//!
//! Calls run inside an `api_call` tracing span. Transport logging is a Tower
//! layer on the HTTP client:
//!
//! ```ignore
//! let http = HyperClient::builder().with_logging().build();
//! let client = ApiClient::builder(url).http_client(http).build()?;
//! ```
//!
//! Install a subscriber (for instance `tracing-subscriber`) in your binary
//! to see the output.
