//! Debug heap for the Toy language runtime.
//!
//! Every allocation made on behalf of generated code goes through a
//! [`DebugHeap`]. With tracking enabled (`TOY_DEBUG=TRUE`) the heap records
//! each live address and its size in an [`AddressTracker`], turns released
//! addresses into permanent tombstones, and can therefore recognise a
//! use-after-free or double free even after the allocator has reused nothing.
//! At teardown a nonzero live count yields a [`LeakReport`].
//!
//! # Architecture
//!
//! ```text
//! DebugHeap (live counter, mode)
//! ├── RawAllocator (SystemAllocator: Box<[u8]> blocks keyed by address)
//! └── Option<AddressTracker> (tracking mode only)
//!     └── fixed bucket array → chain of (Address, EntryState)
//! ```
//!
//! # Per-address state machine
//!
//! `untracked → live(size) → tombstone`. A tombstone is never removed; a
//! later allocation that happens to return the same address makes it live
//! again as a new allocation.
//!
//! The tracker never resizes its bucket array, so lookup cost grows with
//! the number of distinct addresses ever seen.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod heap;
pub mod raw;
pub mod report;
pub mod tracker;

pub use config::HeapConfig;
pub use error::HeapError;
pub use heap::DebugHeap;
pub use raw::{RawAllocator, SystemAllocator};
pub use report::LeakReport;
pub use tracker::{AddressTracker, EntryState, TrackerEntry};
