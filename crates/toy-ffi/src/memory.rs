//! Explicit memory management entry points.

use crate::context::with_runtime;

/// Release a string or array. Null is fatal; so is a double free.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_free(ptr: i64) {
    ffi_guard!({ with_runtime(|rt| rt.free(ptr)) })
}

/// Terminate with `FAIL_TEST` if `ptr` was already released. Only active
/// with `TOY_DEBUG=TRUE`; null is always accepted.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_check_use_after_free(ptr: i64) {
    ffi_guard!({ with_runtime(|rt| rt.check_use_after_free(ptr)) })
}
