//! Criterion micro-benchmarks for tagged arrays and value formatting.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use toy_bench::{filled_int_array, random_indices};
use toy_core::{DebugMode, TypeTag};
use toy_ffi::{Runtime, RuntimeConfig};
use toy_value::TaggedArray;

/// Benchmark: append 10K ints one past the end, forcing repeated growth.
fn bench_array_append_10k(c: &mut Criterion) {
    c.bench_function("array_append_10k", |b| {
        b.iter(|| {
            let mut array = TaggedArray::allocate(0, TypeTag::Int).unwrap();
            for i in 0..10_000 {
                array.write(i, i, TypeTag::Int).unwrap();
            }
            black_box(array.capacity());
        });
    });
}

/// Benchmark: 10K random reads from a 10K-element array.
fn bench_array_read_random_10k(c: &mut Criterion) {
    let array = filled_int_array(10_000).unwrap();
    let indices = random_indices(10_000, 10_000, 9);
    c.bench_function("array_read_random_10k", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &i in &indices {
                sum = sum.wrapping_add(array.read(i).unwrap());
            }
            black_box(sum);
        });
    });
}

/// Benchmark: format a 1K-element int array through the runtime.
fn bench_format_int_array_1k(c: &mut Criterion) {
    let mut rt = Runtime::new(&RuntimeConfig::with_mode(DebugMode::Tracking)).unwrap();
    let arr = rt.new_array(1_000, TypeTag::Int.raw()).unwrap();
    for i in 0..1_000 {
        rt.array_write(arr, i * 7, i, TypeTag::Int.raw()).unwrap();
    }
    c.bench_function("format_int_array_1k", |b| {
        b.iter(|| {
            let text = rt.format(arr, TypeTag::IntArr.raw(), 1).unwrap();
            black_box(text.len());
        });
    });
}

criterion_group!(
    benches,
    bench_array_append_10k,
    bench_array_read_random_10k,
    bench_format_int_array_1k
);
criterion_main!(benches);
