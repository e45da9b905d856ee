//! The debug heap.

use toy_core::{Address, DebugMode};
use tracing::{trace, warn};

use crate::config::HeapConfig;
use crate::error::HeapError;
use crate::raw::{RawAllocator, SystemAllocator};
use crate::report::LeakReport;
use crate::tracker::{AddressTracker, EntryState};

/// Allocator wrapper that tracks live addresses and tombstones freed ones.
///
/// In [`DebugMode::Passthrough`] there is no tracker at all and the heap
/// simply forwards to its [`RawAllocator`]. In [`DebugMode::Tracking`] the
/// live counter always equals the number of tracker entries holding a size.
pub struct DebugHeap<A: RawAllocator = SystemAllocator> {
    allocator: A,
    tracker: Option<AddressTracker>,
    live: u64,
    mode: DebugMode,
}

impl DebugHeap<SystemAllocator> {
    /// Create a heap over the system allocator.
    pub fn new(config: &HeapConfig) -> Result<Self, HeapError> {
        Self::with_allocator(config, SystemAllocator::new())
    }
}

impl<A: RawAllocator> DebugHeap<A> {
    /// Create a heap over a caller-supplied allocator.
    pub fn with_allocator(config: &HeapConfig, allocator: A) -> Result<Self, HeapError> {
        config.validate()?;
        let tracker = config
            .mode
            .is_tracking()
            .then(|| AddressTracker::new(config.bucket_count));
        Ok(Self {
            allocator,
            tracker,
            live: 0,
            mode: config.mode,
        })
    }

    /// Allocate `size` zeroed bytes and, when tracking, record the address
    /// as live.
    pub fn allocate(&mut self, size: usize) -> Result<Address, HeapError> {
        let address = self
            .allocator
            .alloc(size)
            .ok_or(HeapError::AllocationFailed { size })?;
        if let Some(tracker) = self.tracker.as_mut() {
            let prev = tracker.put(address, EntryState::Live { size: size as u64 });
            if !prev.is_some_and(EntryState::is_live) {
                self.live += 1;
            }
            trace!(%address, size, reused = prev.is_some(), "allocate");
        }
        Ok(address)
    }

    /// Release an allocation.
    ///
    /// When tracking, the address becomes a tombstone. Releasing an address
    /// that is already a tombstone is a [`HeapError::DoubleFree`] and leaves
    /// the allocator untouched.
    pub fn release(&mut self, address: Address) -> Result<(), HeapError> {
        if address.is_null() {
            return Err(HeapError::NullRelease);
        }
        if let Some(tracker) = self.tracker.as_mut() {
            match tracker.put(address, EntryState::Tombstone) {
                Some(EntryState::Tombstone) => {
                    warn!(%address, "double free");
                    return Err(HeapError::DoubleFree { address });
                }
                Some(EntryState::Live { size }) => {
                    self.live -= 1;
                    trace!(%address, size, "release");
                }
                None => trace!(%address, "release of untracked address"),
            }
        }
        if !self.allocator.dealloc(address) {
            return Err(HeapError::UnknownAddress { address });
        }
        Ok(())
    }

    /// Fail if `address` has been released. Null is exempt, and so is
    /// everything in passthrough mode.
    pub fn check_use_after_free(&self, address: Address) -> Result<(), HeapError> {
        if address.is_null() {
            return Ok(());
        }
        match self.tracker.as_ref().and_then(|t| t.get(address)) {
            Some(EntryState::Tombstone) => {
                warn!(%address, "use after free");
                Err(HeapError::UseAfterFree { address })
            }
            _ => Ok(()),
        }
    }

    /// State recorded for `address`, if tracking.
    pub fn state(&self, address: Address) -> Option<EntryState> {
        self.tracker.as_ref().and_then(|t| t.get(address))
    }

    /// Snapshot of every tracked entry and the live counter.
    pub fn report(&self) -> LeakReport {
        LeakReport {
            entries: self
                .tracker
                .iter()
                .flat_map(|t| t.iter().copied())
                .collect(),
            live_allocations: self.live,
        }
    }

    /// Tear the heap down. Returns a report only when tracking and at least
    /// one allocation is still live.
    pub fn shutdown(self) -> Option<LeakReport> {
        if !self.is_tracking() || self.live == 0 {
            return None;
        }
        warn!(live = self.live, "allocations leaked at shutdown");
        Some(self.report())
    }

    /// Bytes of a block the allocator still owns.
    pub fn block(&self, address: Address) -> Option<&[u8]> {
        self.allocator.block(address)
    }

    /// Mutable bytes of a block the allocator still owns.
    pub fn block_mut(&mut self, address: Address) -> Option<&mut [u8]> {
        self.allocator.block_mut(address)
    }

    /// Live allocation counter. Always zero in passthrough mode.
    pub fn live_allocations(&self) -> u64 {
        self.live
    }

    /// Whether allocations are tracked.
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_some()
    }

    /// The heap's debug mode.
    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    /// The tracker, present only in tracking mode.
    pub fn tracker(&self) -> Option<&AddressTracker> {
        self.tracker.as_ref()
    }

    /// The underlying allocator.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracking() -> DebugHeap {
        DebugHeap::new(&HeapConfig::new(DebugMode::Tracking)).unwrap()
    }

    fn passthrough() -> DebugHeap {
        DebugHeap::new(&HeapConfig::new(DebugMode::Passthrough)).unwrap()
    }

    #[test]
    fn zero_bucket_config_is_rejected() {
        let config = HeapConfig {
            mode: DebugMode::Tracking,
            bucket_count: 0,
        };
        assert!(DebugHeap::new(&config).is_err());
    }

    #[test]
    fn allocate_then_release_balances_the_counter() {
        let mut heap = tracking();
        let a = heap.allocate(24).unwrap();
        assert_eq!(heap.live_allocations(), 1);
        assert_eq!(heap.state(a), Some(EntryState::Live { size: 24 }));
        heap.release(a).unwrap();
        assert_eq!(heap.live_allocations(), 0);
        assert_eq!(heap.state(a), Some(EntryState::Tombstone));
        assert!(heap.shutdown().is_none());
    }

    #[test]
    fn leak_is_reported_at_shutdown() {
        let mut heap = tracking();
        let a = heap.allocate(24).unwrap();
        let b = heap.allocate(8).unwrap();
        heap.release(b).unwrap();
        let report = heap.shutdown().unwrap();
        assert_eq!(report.live_allocations, 1);
        assert_eq!(report.entries.len(), 2);
        let text = report.to_string();
        assert!(text.contains(&format!("{a}: 24")));
        assert!(text.contains(&format!("{b}: -1")));
        assert!(text.ends_with("Total Live entries remaining: 1"));
    }

    #[test]
    fn use_after_free_is_detected() {
        let mut heap = tracking();
        let a = heap.allocate(8).unwrap();
        assert!(heap.check_use_after_free(a).is_ok());
        heap.release(a).unwrap();
        assert_eq!(
            heap.check_use_after_free(a),
            Err(HeapError::UseAfterFree { address: a })
        );
    }

    #[test]
    fn null_is_exempt_from_uaf_but_not_release() {
        let mut heap = tracking();
        assert!(heap.check_use_after_free(Address::NULL).is_ok());
        assert_eq!(heap.release(Address::NULL), Err(HeapError::NullRelease));
    }

    #[test]
    fn double_free_is_a_memory_violation() {
        let mut heap = tracking();
        let a = heap.allocate(8).unwrap();
        heap.release(a).unwrap();
        let err = heap.release(a).unwrap_err();
        assert_eq!(err, HeapError::DoubleFree { address: a });
        assert!(err.is_memory_violation());
        assert_eq!(heap.live_allocations(), 0);
    }

    #[test]
    fn unknown_address_release_fails() {
        let mut heap = tracking();
        let err = heap.release(Address(0x8)).unwrap_err();
        assert_eq!(err, HeapError::UnknownAddress { address: Address(0x8) });
    }

    #[test]
    fn passthrough_tracks_nothing() {
        let mut heap = passthrough();
        let a = heap.allocate(16).unwrap();
        assert!(heap.tracker().is_none());
        assert_eq!(heap.live_allocations(), 0);
        heap.release(a).unwrap();
        assert!(heap.check_use_after_free(a).is_ok());
        assert!(heap.report().entries.is_empty());
        let _leak = heap.allocate(4).unwrap();
        assert!(heap.shutdown().is_none());
    }

    #[test]
    fn blocks_are_readable_until_released() {
        let mut heap = tracking();
        let a = heap.allocate(5).unwrap();
        heap.block_mut(a).unwrap().copy_from_slice(b"hello");
        assert_eq!(heap.block(a).unwrap(), b"hello");
        heap.release(a).unwrap();
        assert!(heap.block(a).is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_counter_matches_tracker(
                ops in proptest::collection::vec((any::<bool>(), 0usize..64, 0usize..32), 1..150),
            ) {
                let mut heap = tracking();
                let mut live: Vec<Address> = Vec::new();
                for (alloc, size, pick) in ops {
                    if alloc || live.is_empty() {
                        live.push(heap.allocate(size).unwrap());
                    } else {
                        let a = live.swap_remove(pick % live.len());
                        heap.release(a).unwrap();
                        prop_assert_eq!(heap.state(a), Some(EntryState::Tombstone));
                    }
                    let tracked = heap.tracker().unwrap().live_count() as u64;
                    prop_assert_eq!(heap.live_allocations(), tracked);
                    prop_assert_eq!(heap.live_allocations(), live.len() as u64);
                }
            }
        }
    }
}
