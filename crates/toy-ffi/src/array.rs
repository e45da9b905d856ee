//! Array entry points.

use crate::context::with_runtime;

/// Allocate an array of `len` default slots with element tag `tag`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_malloc_arr(len: i64, tag: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.new_array(len, tag)) })
}

/// Write `value` with tag `tag` at `idx`, growing the array if needed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_write_to_arr(arr: i64, value: i64, idx: i64, tag: i64) {
    ffi_guard!({ with_runtime(|rt| rt.array_write(arr, value, idx, tag)) })
}

/// Raw payload at `idx`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_read_from_arr(arr: i64, idx: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.array_read(arr, idx)) })
}

/// Logical length of an array.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_arrlen(arr: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.array_len(arr)) })
}
