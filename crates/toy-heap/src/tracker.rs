//! Fixed-bucket address tracker.
//!
//! An [`AddressTracker`] maps address identities to an [`EntryState`]: the
//! size of a live allocation or a tombstone. Entries are never removed, so
//! a freed address stays distinguishable from one the heap has never seen.
//!
//! The bucket array is sized once at construction and never resized.
//! Chains grow without bound as allocation count rises.

use smallvec::SmallVec;
use toy_core::Address;

/// Number of low address bits discarded before bucketing. Allocators return
/// aligned addresses, so these bits are (nearly) always zero and would
/// otherwise funnel everything into a handful of buckets.
pub const ADDRESS_SHIFT: u32 = 3;

/// Raw sentinel value of a tombstone in reports.
pub const TOMBSTONE: i64 = -1;

/// State recorded for one address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryState {
    /// A live allocation of `size` bytes.
    Live {
        /// Requested size in bytes.
        size: u64,
    },
    /// The address was released. Terminal until the allocator hands the
    /// same address out again.
    Tombstone,
}

impl EntryState {
    /// Raw value as printed in the leak report: the size, or `-1`.
    pub fn raw(self) -> i64 {
        match self {
            Self::Live { size } => size as i64,
            Self::Tombstone => TOMBSTONE,
        }
    }

    /// Decode a raw report value. Returns `None` for negative values other
    /// than the tombstone sentinel.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            TOMBSTONE => Some(Self::Tombstone),
            size if size >= 0 => Some(Self::Live { size: size as u64 }),
            _ => None,
        }
    }

    /// Whether this entry is a live allocation.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live { .. })
    }
}

/// One tracked address and its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerEntry {
    /// The tracked address.
    pub address: Address,
    /// Its current state.
    pub state: EntryState,
}

type Chain = SmallVec<[TrackerEntry; 4]>;

/// Hash table keyed by address identity with a fixed bucket count.
///
/// Addresses are compared by identity and never dereferenced.
pub struct AddressTracker {
    buckets: Box<[Chain]>,
    len: usize,
}

impl AddressTracker {
    /// Create an empty tracker with `bucket_count` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero. [`HeapConfig::validate`](crate::HeapConfig::validate)
    /// rejects that before a heap is built.
    pub fn new(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "tracker needs at least one bucket");
        Self {
            buckets: (0..bucket_count).map(|_| Chain::new()).collect(),
            len: 0,
        }
    }

    /// Bucket that `address` hashes to.
    ///
    /// The address is shifted arithmetically, then reduced with a Euclidean
    /// modulus so that addresses with the top bit set still land in range.
    pub fn bucket_index(&self, address: Address) -> usize {
        let shifted = (address.0 as i64) >> ADDRESS_SHIFT;
        shifted.rem_euclid(self.buckets.len() as i64) as usize
    }

    /// Insert or overwrite the entry for `address`, returning the previous
    /// state if there was one.
    pub fn put(&mut self, address: Address, state: EntryState) -> Option<EntryState> {
        let idx = self.bucket_index(address);
        let chain = &mut self.buckets[idx];
        if let Some(entry) = chain.iter_mut().find(|e| e.address == address) {
            return Some(std::mem::replace(&mut entry.state, state));
        }
        chain.push(TrackerEntry { address, state });
        self.len += 1;
        None
    }

    /// Look up the state recorded for `address`.
    pub fn get(&self, address: Address) -> Option<EntryState> {
        self.buckets[self.bucket_index(address)]
            .iter()
            .find(|e| e.address == address)
            .map(|e| e.state)
    }

    /// Number of addresses ever tracked (live and tombstoned).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no address has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries currently holding a live size.
    pub fn live_count(&self) -> usize {
        self.iter().filter(|e| e.state.is_live()).count()
    }

    /// Fixed number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the chain in bucket `bucket`, or 0 if out of range.
    pub fn chain_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, |c| c.len())
    }

    /// All entries, bucket by bucket, in insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = &TrackerEntry> + '_ {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }
}

impl Default for AddressTracker {
    fn default() -> Self {
        Self::new(crate::HeapConfig::DEFAULT_BUCKET_COUNT)
    }
}
