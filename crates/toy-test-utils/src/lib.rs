//! Test utilities and mock types for Toy runtime development.
//!
//! - [`RecyclingAllocator`]: a [`RawAllocator`](toy_heap::RawAllocator) with
//!   deterministic addresses that hands freed addresses straight back out.
//! - [`MockValueStore`]: an in-memory [`ValueResolver`] for formatter and
//!   coercion tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;

pub use alloc::RecyclingAllocator;

use std::borrow::Cow;
use std::collections::HashMap;

use toy_core::{TaggedValue, TypeTag};
use toy_value::{TaggedArray, ValueError, ValueResolver};

/// Mock implementation of [`ValueResolver`].
///
/// Strings and arrays are stored under handles handed out from a counter
/// starting at 0x10 with a stride of 0x10, so a handle is never null.
pub struct MockValueStore {
    strings: HashMap<i64, String>,
    arrays: HashMap<i64, TaggedArray>,
    next: i64,
}

impl MockValueStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            strings: HashMap::new(),
            arrays: HashMap::new(),
            next: 0x10,
        }
    }

    fn next_handle(&mut self) -> i64 {
        let h = self.next;
        self.next += 0x10;
        h
    }

    /// Store a string and return its tagged handle.
    pub fn string(&mut self, text: impl Into<String>) -> TaggedValue {
        let h = self.next_handle();
        self.strings.insert(h, text.into());
        TaggedValue::new(h, TypeTag::Str)
    }

    /// Store an array and return its tagged handle.
    pub fn array(&mut self, array: TaggedArray) -> TaggedValue {
        let h = self.next_handle();
        let tag = array.element_tag().array_of();
        self.arrays.insert(h, array);
        TaggedValue::new(h, tag)
    }

    /// Build and store an array from element values of one type.
    pub fn array_of(&mut self, element: TypeTag, values: &[i64]) -> TaggedValue {
        let mut array = TaggedArray::allocate(values.len() as i64, element)
            .expect("nonnegative length");
        for (i, &v) in values.iter().enumerate() {
            array.write(v, i as i64, element).expect("matching element type");
        }
        self.array(array)
    }

    /// Mutable access to a stored array.
    pub fn array_mut(&mut self, handle: TaggedValue) -> Option<&mut TaggedArray> {
        self.arrays.get_mut(&handle.bits)
    }
}

impl Default for MockValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueResolver for MockValueStore {
    type Error = ValueError;

    fn resolve_str(&self, bits: i64) -> Result<Cow<'_, str>, ValueError> {
        self.strings
            .get(&bits)
            .map(|s| Cow::Borrowed(s.as_str()))
            .ok_or(ValueError::InvalidHandle {
                bits,
                tag: TypeTag::Str,
            })
    }

    fn resolve_array(&self, bits: i64) -> Result<&TaggedArray, ValueError> {
        self.arrays.get(&bits).ok_or(ValueError::InvalidHandle {
            bits,
            tag: TypeTag::IntArr,
        })
    }
}
