//! Conversion entry points.
//!
//! `toy_type_to_*` take a payload and its raw tag. Floats cross the
//! boundary as their bit pattern in an `i64`, except for the three helpers
//! that move between that representation and a native `double`.

use crate::context::with_runtime;

/// Convert to a string handle. Strings are returned unchanged.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_type_to_str(value: i64, tag: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.type_to_str(value, tag)) })
}

/// Convert to a boolean payload.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_type_to_bool(value: i64, tag: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.type_to_bool(value, tag)) })
}

/// Convert to an integer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_type_to_int(value: i64, tag: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.type_to_int(value, tag)) })
}

/// Convert to float payload bits.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_type_to_float(value: i64, tag: i64) -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.type_to_float(value, tag)) })
}

/// Widen an integer to a native double.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_int_to_float(i: i64) -> f64 {
    i as f64
}

/// Reinterpret float payload bits as a native double.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_float_bits_to_double(bits: i64) -> f64 {
    f64::from_bits(bits as u64)
}

/// Reinterpret a native double as float payload bits.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_double_to_float_bits(d: f64) -> i64 {
    d.to_bits() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_bits_helpers_round_trip() {
        let bits = toy_double_to_float_bits(-1.25);
        assert_eq!(toy_float_bits_to_double(bits), -1.25);
        assert_eq!(toy_int_to_float(-3), -3.0);
    }
}
