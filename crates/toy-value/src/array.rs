//! The growable tagged-value array.
//!
//! Capacity follows a fixed 1.4x rule, computed in integer arithmetic as
//! `n * 14 / 10`:
//!
//! - at allocation, `capacity = length * 14 / 10`;
//! - when a write lands at `index >= capacity`, the new capacity is the
//!   largest of `capacity * 14 / 10`, `index * 14 / 10` and `index + 1`.
//!
//! A growing write first repositions `length` to `index` and then, like
//! every write, raises it to `index + 1`. Slots between the old length and
//! the written index hold the default value (integer zero).
//!
//! Arrays never shrink.

use toy_core::{TaggedValue, TypeTag};
use tracing::debug;

use crate::error::ArrayError;

/// Apply the 1.4x growth factor in exact integer arithmetic.
fn grow_factor(n: usize) -> usize {
    n.saturating_mul(14) / 10
}

/// Zero-filled slot buffer of exactly `capacity` elements.
fn slot_buffer(capacity: usize) -> Result<Vec<TaggedValue>, ArrayError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| ArrayError::AllocationFailed { capacity })?;
    slots.resize(capacity, TaggedValue::default());
    Ok(slots)
}

/// Homogeneously typed sequence of tagged values.
///
/// Invariant: `capacity >= length`, and `slots.len() == capacity`.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedArray {
    element: TypeTag,
    length: usize,
    slots: Vec<TaggedValue>,
}

impl TaggedArray {
    /// Create an array of logical size `length` whose slots all hold the
    /// default value.
    pub fn allocate(length: i64, element: TypeTag) -> Result<Self, ArrayError> {
        if length < 0 {
            return Err(ArrayError::NegativeLength { length });
        }
        let length = length as usize;
        Ok(Self {
            element,
            length,
            slots: slot_buffer(grow_factor(length))?,
        })
    }

    /// Store `value` at `index`, growing the array if `index` is beyond
    /// capacity. `declared` must equal the element type.
    pub fn write(&mut self, value: i64, index: i64, declared: TypeTag) -> Result<(), ArrayError> {
        if index < 0 {
            return Err(ArrayError::NegativeIndex { index });
        }
        if declared != self.element {
            return Err(ArrayError::TypeMismatch {
                expected: self.element,
                got: declared,
            });
        }
        let index = index as usize;
        if index >= self.capacity() {
            let new_capacity = grow_factor(self.capacity())
                .max(grow_factor(index))
                .max(index.saturating_add(1));
            let mut slots = slot_buffer(new_capacity)?;
            slots[..self.length].copy_from_slice(&self.slots[..self.length]);
            debug!(
                old_capacity = self.capacity(),
                new_capacity,
                index,
                "array grown"
            );
            self.slots = slots;
            self.length = index;
        }
        self.slots[index] = TaggedValue::new(value, declared);
        self.length = self.length.max(index + 1);
        Ok(())
    }

    /// Raw payload at `index`.
    ///
    /// Reading at exactly `length` is allowed while a backing slot exists
    /// there and yields whatever that slot holds.
    pub fn read(&self, index: i64) -> Result<i64, ArrayError> {
        if index < 0 {
            return Err(ArrayError::NegativeIndex { index });
        }
        let out_of_bounds = ArrayError::OutOfBounds {
            index,
            length: self.length,
        };
        if index as u64 > self.length as u64 {
            return Err(out_of_bounds);
        }
        self.slots
            .get(index as usize)
            .map(|slot| slot.bits)
            .ok_or(out_of_bounds)
    }

    /// Logical length.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Physical slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Declared element type.
    pub fn element_tag(&self) -> TypeTag {
        self.element
    }

    /// Slot at `index`, if within the logical length.
    pub fn get(&self, index: usize) -> Option<TaggedValue> {
        self.as_slice().get(index).copied()
    }

    /// The logically present slots.
    pub fn as_slice(&self) -> &[TaggedValue] {
        &self.slots[..self.length]
    }

    /// Iterate over the logically present slots.
    pub fn iter(&self) -> impl Iterator<Item = &TaggedValue> + '_ {
        self.as_slice().iter()
    }
}
