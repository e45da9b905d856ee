//! Workload generators for the Toy runtime benchmarks.
//!
//! - [`scattered_addresses`]: distinct, 8-byte aligned addresses in a
//!   seeded random order, for tracker benchmarks
//! - [`filled_int_array`]: an `int[]` of a given length
//! - [`random_indices`]: seeded write positions for growth benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use toy_core::{Address, TypeTag};
use toy_value::{ArrayError, TaggedArray};

/// Lowest address produced by [`scattered_addresses`].
pub const ADDRESS_BASE: usize = 0x10_0000;

/// `count` distinct aligned addresses, shuffled deterministically by `seed`.
pub fn scattered_addresses(count: usize, seed: u64) -> Vec<Address> {
    let mut addresses: Vec<Address> = (0..count).map(|i| Address(ADDRESS_BASE + i * 8)).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // Fisher-Yates.
    for i in (1..addresses.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        addresses.swap(i, j);
    }
    addresses
}

/// An `int[]` of `length` elements holding `0..length`.
pub fn filled_int_array(length: usize) -> Result<TaggedArray, ArrayError> {
    let mut array = TaggedArray::allocate(length as i64, TypeTag::Int)?;
    for i in 0..length as i64 {
        array.write(i, i, TypeTag::Int)?;
    }
    Ok(array)
}

/// `count` indices in `0..bound`, deterministic for `seed`.
pub fn random_indices(count: usize, bound: u64, seed: u64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| (rng.next_u64() % bound.max(1)) as i64).collect()
}
