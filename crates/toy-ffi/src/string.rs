//! String entry points.

use crate::context::with_runtime;

/// Copy a nul-terminated string (typically a literal) onto the heap.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_malloc(s: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.copy_string(s)) })
}

/// Concatenate two strings into a new heap string.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_concat(a: i64, b: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.concat(a, b)) })
}

/// 1 if the strings are byte-for-byte equal, else 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_strequal(a: i64, b: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.strequal(a, b)).map(i64::from) })
}

/// Length of a string in bytes.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_strlen(s: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.strlen(s)) })
}
