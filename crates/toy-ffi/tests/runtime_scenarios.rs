//! End-to-end runtime scenarios over a deterministic allocator.

use toy_core::{DebugMode, TaggedValue, TypeTag};
use toy_ffi::entry::finish;
use toy_ffi::fatal::{write_diagnostic, FAIL_TEST_MARKER};
use toy_ffi::{Runtime, RuntimeConfig, RuntimeError};
use toy_heap::HeapError;
use toy_test_utils::RecyclingAllocator;

fn runtime(mode: DebugMode) -> Runtime<RecyclingAllocator> {
    Runtime::with_allocator(&RuntimeConfig::with_mode(mode), RecyclingAllocator::new()).unwrap()
}

#[test]
fn leak_report_lists_tombstones_and_live_blocks() {
    let mut rt = runtime(DebugMode::Tracking);
    let s = rt.alloc_string(b"hi").unwrap();
    let arr = rt.new_array(2, TypeTag::Int.raw()).unwrap();
    assert_eq!(s, 0x1000);
    assert_eq!(arr, 0x1010);
    rt.free(s).unwrap();

    let mut out = Vec::new();
    assert!(finish(rt, &mut out).unwrap());
    let expected = format!(
        "Tracked allocations:\n  0x1000: -1\n  0x1010: 32\nTotal Live entries remaining: 1\n{FAIL_TEST_MARKER}"
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn balanced_program_is_silent() {
    let mut rt = runtime(DebugMode::Tracking);
    let a = rt.alloc_string(b"foo").unwrap();
    let b = rt.alloc_string(b"bar").unwrap();
    let c = rt.concat(a, b).unwrap();
    assert_eq!(rt.format(c, TypeTag::Str.raw(), 0).unwrap(), "foobar");
    for h in [a, b, c] {
        rt.free(h).unwrap();
    }
    let mut out = Vec::new();
    assert!(!finish(rt, &mut out).unwrap());
    assert!(out.is_empty());
}

#[test]
fn use_after_free_fails_the_test() {
    let mut rt = runtime(DebugMode::Tracking);
    let arr = rt.new_array(1, TypeTag::Float.raw()).unwrap();
    rt.free(arr).unwrap();
    let err = rt.array_read(arr, 0).unwrap_err();
    assert!(err.fails_test());

    let (mut out, mut err_out) = (Vec::new(), Vec::new());
    write_diagnostic(&err, &mut out, &mut err_out).unwrap();
    assert_eq!(out, FAIL_TEST_MARKER.as_bytes());
    assert_eq!(
        String::from_utf8(err_out).unwrap(),
        "[ERROR] Use-after-free detected! Pointer 0x1000 was already freed\n"
    );
}

#[test]
fn double_free_is_a_memory_violation() {
    let mut rt = runtime(DebugMode::Tracking);
    let s = rt.alloc_string(b"x").unwrap();
    rt.free(s).unwrap();
    let err = rt.free(s).unwrap_err();
    assert!(matches!(err, RuntimeError::Heap(HeapError::DoubleFree { .. })));
    assert!(err.fails_test());
}

#[test]
fn reused_address_is_live_again() {
    let mut rt = runtime(DebugMode::Tracking);
    let first = rt.alloc_string(b"one").unwrap();
    rt.free(first).unwrap();
    let second = rt.alloc_string(b"two").unwrap();
    assert_eq!(first, second);
    rt.check_use_after_free(second).unwrap();
    assert_eq!(rt.format(second, TypeTag::Str.raw(), 0).unwrap(), "two");
    rt.free(second).unwrap();
    assert!(rt.shutdown().is_none());
}

#[test]
fn freed_array_header_becomes_a_string() {
    let mut rt = runtime(DebugMode::Tracking);
    let arr = rt.new_array(0, TypeTag::Int.raw()).unwrap();
    rt.free(arr).unwrap();
    assert_eq!(rt.live_arrays(), 0);
    let s = rt.alloc_string(b"fresh").unwrap();
    assert_eq!(s, arr);
    assert_eq!(rt.strlen(s).unwrap(), 5);
    assert!(matches!(
        rt.array_len(s),
        Err(RuntimeError::NotAnArray { .. })
    ));
}

#[test]
fn growth_fills_gaps_with_defaults() {
    let mut rt = runtime(DebugMode::Passthrough);
    let arr = rt.new_array(1, TypeTag::Int.raw()).unwrap();
    rt.array_write(arr, 7, 0, TypeTag::Int.raw()).unwrap();
    rt.array_write(arr, 9, 3, TypeTag::Int.raw()).unwrap();
    assert_eq!(rt.array_len(arr).unwrap(), 4);
    assert_eq!(rt.format(arr, TypeTag::IntArr.raw(), 1).unwrap(), "[7, 0, 0, 9]");
    assert_eq!(rt.array_read(arr, 2).unwrap(), 0);
}

#[test]
fn nested_arrays_format_to_their_degree() {
    let mut rt = runtime(DebugMode::Passthrough);
    let inner = rt.new_array(2, TypeTag::Float.raw()).unwrap();
    rt.array_write(inner, TaggedValue::float(0.5).bits, 0, TypeTag::Float.raw())
        .unwrap();
    rt.array_write(inner, TaggedValue::float(-2.0).bits, 1, TypeTag::Float.raw())
        .unwrap();
    let outer = rt.new_array(2, TypeTag::FloatArr.raw()).unwrap();
    rt.array_write(outer, inner, 0, TypeTag::FloatArr.raw()).unwrap();

    assert_eq!(
        rt.format(outer, TypeTag::FloatArr.raw(), 2).unwrap(),
        "[[0.500000, -2.000000], NULL_ARRAY]"
    );
    assert_eq!(
        rt.format(outer, TypeTag::FloatArr.raw(), 1).unwrap(),
        "[[...], NULL_ARRAY]"
    );
}

#[test]
fn allocation_failure_is_reported() {
    let mut rt = Runtime::with_allocator(
        &RuntimeConfig::with_mode(DebugMode::Tracking),
        RecyclingAllocator::failing_after(1),
    )
    .unwrap();
    rt.alloc_string(b"ok").unwrap();
    let err = rt.alloc_string(b"no room").unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Heap(HeapError::AllocationFailed { size: 8 })
    ));
    assert!(!err.fails_test());
}

#[test]
fn conversions_allocate_tracked_strings() {
    let mut rt = runtime(DebugMode::Tracking);
    let s = rt.type_to_str(42, TypeTag::Int.raw()).unwrap();
    assert_eq!(rt.format(s, TypeTag::Str.raw(), 0).unwrap(), "42");
    assert_eq!(rt.type_to_int(s, TypeTag::Str.raw()).unwrap(), 42);
    assert_eq!(rt.heap().live_allocations(), 1);
    let f = rt
        .type_to_str(TaggedValue::float(1e20).bits, TypeTag::Float.raw())
        .unwrap();
    assert_eq!(rt.format(f, TypeTag::Str.raw(), 0).unwrap(), "1e+20");
    rt.free(s).unwrap();
    rt.free(f).unwrap();
    assert!(rt.shutdown().is_none());
}
