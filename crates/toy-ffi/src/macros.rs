//! Boundary macros for `extern "C"` entry points.

/// Run an entry-point body that yields `Result<T, RuntimeError>`.
///
/// `Ok` values are returned to the caller. Errors, and panics caught
/// before they can unwind into C, go to [`fatal::terminate`](crate::fatal::terminate).
macro_rules! ffi_guard {
    ($body:block) => {{
        let result: ::std::thread::Result<::std::result::Result<_, $crate::error::RuntimeError>> =
            ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body));
        match result {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => $crate::fatal::terminate(&err),
            Err(payload) => {
                $crate::fatal::terminate(&$crate::error::RuntimeError::from_panic(payload))
            }
        }
    }};
}
