//! Exception-free helpers around [`std::result::Result`].
//!
//! Rust already has a two-variant result type; this module adds the adapters
//! that turn panicking code into a `Result` and back:
//!
//! - [`ok`] / [`err`] build a result,
//! - [`wrap`] / [`wrap_async`] capture a panic payload as the error,
//! - [`unwrap`] re-raises the error as a panic.
//!
//! The panic payload is kept unchanged: whatever was passed to `panic!` or
//! [`std::panic::panic_any`] is what ends up in the `Err` branch.
//!
//! ```
//! use vetted_core::outcome;
//!
//! let value = outcome::wrap(|| 21 * 2);
//! assert_eq!(value.ok(), Some(42));
//!
//! let failed = outcome::wrap(|| -> u32 { std::panic::panic_any(404_u16) });
//! let payload = failed.expect_err("panicked");
//! assert_eq!(payload.downcast_ref::<u16>(), Some(&404));
//! ```

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;

/// A captured panic payload.
pub type Raised = Box<dyn Any + Send + 'static>;

/// Build a success.
#[must_use]
pub const fn ok<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Build a failure.
#[must_use]
pub const fn err<T, E>(error: E) -> Result<T, E> {
    Err(error)
}

/// Run `f`, capturing a panic as the error branch.
///
/// The panic hook still runs, so the panic message is printed as usual.
pub fn wrap<T, F>(f: F) -> Result<T, Raised>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f))
}

/// Await `future`, capturing a panic raised while polling it.
pub async fn wrap_async<T, Fut>(future: Fut) -> Result<T, Raised>
where
    Fut: Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await
}

/// Return the success value or re-raise the error as a panic.
///
/// A payload previously captured by [`wrap`] or [`wrap_async`] is resumed
/// as-is, so `unwrap(wrap(f))` behaves like calling `f` directly.
pub fn unwrap<T, E>(result: Result<T, E>) -> T
where
    E: Send + 'static,
{
    match result {
        Ok(value) => value,
        Err(error) => {
            let boxed: Raised = Box::new(error);
            match boxed.downcast::<Raised>() {
                Ok(captured) => panic::resume_unwind(*captured),
                Err(other) => panic::resume_unwind(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Boom {
        code: u32,
    }

    #[test]
    fn constructors() {
        let success: Result<u8, &str> = ok(1);
        let failure: Result<u8, &str> = err("nope");
        assert_eq!(success, Ok(1));
        assert_eq!(failure, Err("nope"));
    }

    #[test]
    fn wrap_returns_value() {
        let result = wrap(|| "done");
        assert!(matches!(result, Ok("done")));
    }

    #[test]
    fn wrap_keeps_payload_unchanged() {
        let result = wrap(|| -> u8 { panic::panic_any(Boom { code: 7 }) });
        let payload = result.expect_err("should capture");
        assert_eq!(payload.downcast_ref::<Boom>(), Some(&Boom { code: 7 }));
    }

    #[test]
    fn wrap_captures_panic_message() {
        let result = wrap(|| -> u8 { panic!("static message") });
        let payload = result.expect_err("should capture");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"static message"));
    }

    #[tokio::test]
    async fn wrap_async_returns_value() {
        let result = wrap_async(async { 40 + 2 }).await;
        assert!(matches!(result, Ok(42)));
    }

    #[tokio::test]
    async fn wrap_async_keeps_payload_unchanged() {
        let result: Result<(), Raised> = wrap_async(async {
            tokio::task::yield_now().await;
            panic::panic_any(Boom { code: 9 })
        })
        .await;
        let payload = result.expect_err("should capture");
        assert_eq!(payload.downcast_ref::<Boom>(), Some(&Boom { code: 9 }));
    }

    #[test]
    fn unwrap_returns_success() {
        assert_eq!(unwrap::<_, Boom>(Ok(5)), 5);
    }

    #[test]
    fn unwrap_reraises_typed_error() {
        let raised = panic::catch_unwind(|| unwrap::<u8, _>(Err(Boom { code: 1 })))
            .expect_err("should re-raise");
        assert_eq!(raised.downcast_ref::<Boom>(), Some(&Boom { code: 1 }));
    }

    #[test]
    fn unwrap_resumes_captured_payload() {
        let captured = wrap(|| -> u8 { panic::panic_any(Boom { code: 3 }) });
        let raised = panic::catch_unwind(AssertUnwindSafe(|| unwrap(captured)))
            .expect_err("should re-raise");
        assert_eq!(raised.downcast_ref::<Boom>(), Some(&Boom { code: 3 }));
    }
}
