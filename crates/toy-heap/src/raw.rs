//! The underlying allocator seam.
//!
//! [`DebugHeap`](crate::DebugHeap) never talks to the system allocator
//! directly; it goes through a [`RawAllocator`]. Production uses
//! [`SystemAllocator`], tests substitute an allocator that hands out
//! deterministic (and recycled) addresses.

use indexmap::IndexMap;
use toy_core::Address;

/// Source of raw byte blocks identified by [`Address`].
pub trait RawAllocator {
    /// Allocate a zero-filled block of `size` bytes. Returns `None` when the
    /// request cannot be satisfied. Never returns [`Address::NULL`].
    fn alloc(&mut self, size: usize) -> Option<Address>;

    /// Return a block. Returns `false` if `address` is not a block this
    /// allocator currently owns.
    fn dealloc(&mut self, address: Address) -> bool;

    /// Byte view of a block currently handed out.
    fn block(&self, address: Address) -> Option<&[u8]>;

    /// Mutable byte view of a block currently handed out.
    fn block_mut(&mut self, address: Address) -> Option<&mut [u8]>;

    /// Number of blocks currently handed out.
    fn outstanding(&self) -> usize;
}

/// Allocator backed by the global allocator.
///
/// Each block is a `Box<[u8]>` whose data pointer is its address. Zero-size
/// requests are rounded up to one byte so that distinct live blocks always
/// have distinct addresses.
#[derive(Default)]
pub struct SystemAllocator {
    blocks: IndexMap<Address, Box<[u8]>>,
}

impl SystemAllocator {
    /// Create an allocator owning no blocks.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawAllocator for SystemAllocator {
    fn alloc(&mut self, size: usize) -> Option<Address> {
        let len = size.max(1);
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).ok()?;
        buf.resize(len, 0u8);
        let block = buf.into_boxed_slice();
        let address = Address(block.as_ptr() as usize);
        self.blocks.insert(address, block);
        Some(address)
    }

    fn dealloc(&mut self, address: Address) -> bool {
        self.blocks.swap_remove(&address).is_some()
    }

    fn block(&self, address: Address) -> Option<&[u8]> {
        self.blocks.get(&address).map(|b| &b[..])
    }

    fn block_mut(&mut self, address: Address) -> Option<&mut [u8]> {
        self.blocks.get_mut(&address).map(|b| &mut b[..])
    }

    fn outstanding(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_zeroed_and_distinct() {
        let mut a = SystemAllocator::new();
        let x = a.alloc(16).unwrap();
        let y = a.alloc(16).unwrap();
        assert_ne!(x, y);
        assert!(!x.is_null());
        assert_eq!(a.block(x).unwrap(), &[0u8; 16]);
        assert_eq!(a.outstanding(), 2);
    }

    #[test]
    fn zero_size_still_gets_an_address() {
        let mut a = SystemAllocator::new();
        let x = a.alloc(0).unwrap();
        let y = a.alloc(0).unwrap();
        assert_ne!(x, y);
        assert_eq!(a.block(x).unwrap().len(), 1);
    }

    #[test]
    fn dealloc_reports_unknown_addresses() {
        let mut a = SystemAllocator::new();
        let x = a.alloc(4).unwrap();
        assert!(a.dealloc(x));
        assert!(!a.dealloc(x));
        assert!(a.block(x).is_none());
        assert!(!a.dealloc(Address(0x10)));
    }

    #[test]
    fn block_mut_writes_are_visible() {
        let mut a = SystemAllocator::new();
        let x = a.alloc(3).unwrap();
        a.block_mut(x).unwrap().copy_from_slice(b"abc");
        assert_eq!(a.block(x).unwrap(), b"abc");
    }
}
