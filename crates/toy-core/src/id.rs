//! Address identities.

use std::fmt;

/// Opaque address-sized identity of a runtime allocation.
///
/// Produced by the allocator and used purely as a key: nothing in the
/// tracking layer ever dereferences it. `Address(0)` is the null address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub usize);

impl Address {
    /// The null address.
    pub const NULL: Address = Address(0);

    /// Reinterpret a 64-bit payload from generated code as an address.
    pub fn from_bits(bits: i64) -> Self {
        Self(bits as usize)
    }

    /// The 64-bit payload handed back to generated code.
    pub fn to_bits(self) -> i64 {
        self.0 as i64
    }

    /// Whether this is the null address.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for Address {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
