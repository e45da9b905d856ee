//! Toy: runtime support for programs compiled from the Toy language.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Toy runtime sub-crates. Compiled programs link `toy-ffi` directly as
//! a static library; this crate is for Rust code that drives the runtime,
//! such as test harnesses and tools.
//!
//! # Quick start
//!
//! ```rust
//! use toy_runtime::prelude::*;
//!
//! let mut rt = Runtime::new(&RuntimeConfig::with_mode(DebugMode::Tracking)).unwrap();
//! let arr = rt.new_array(2, TypeTag::Int.raw()).unwrap();
//! rt.array_write(arr, 7, 0, TypeTag::Int.raw()).unwrap();
//! rt.array_write(arr, 9, 3, TypeTag::Int.raw()).unwrap();
//! assert_eq!(rt.format(arr, TypeTag::IntArr.raw(), 1).unwrap(), "[7, 0, 0, 9]");
//!
//! rt.free(arr).unwrap();
//! assert!(rt.shutdown().is_none());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `toy-core` | Type tags, tagged values, addresses, debug mode |
//! | [`heap`] | `toy-heap` | Address tracker, debug heap, leak report |
//! | [`value`] | `toy-value` | Tagged arrays, formatting, coercions |
//! | [`ffi`] | `toy-ffi` | The runtime context and `toy_*` C entry points |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Type tags, tagged values, addresses and debug mode (`toy-core`).
pub use toy_core as types;

/// Allocation tracking and the debug heap (`toy-heap`).
///
/// [`heap::DebugHeap`] is generic over [`heap::RawAllocator`], so it can be
/// driven without touching the system allocator.
pub use toy_heap as heap;

/// Growable tagged arrays, value formatting and coercions (`toy-value`).
pub use toy_value as value;

/// The runtime context and C entry points (`toy-ffi`).
pub use toy_ffi as ffi;

/// Common imports for driving the runtime from Rust.
///
/// ```rust
/// use toy_runtime::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use toy_core::{Address, CoreError, DebugMode, TaggedValue, TypeTag};

    // Heap
    pub use toy_heap::{DebugHeap, HeapConfig, HeapError, LeakReport, RawAllocator};

    // Values
    pub use toy_value::{format_value, ArrayError, TaggedArray, ValueError, ValueResolver};

    // Runtime
    pub use toy_ffi::{Runtime, RuntimeConfig, RuntimeError};
}
