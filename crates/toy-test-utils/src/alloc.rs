//! Deterministic allocator fixture.

use std::collections::HashMap;

use toy_core::Address;
use toy_heap::RawAllocator;

/// First address handed out.
pub const BASE_ADDRESS: usize = 0x1000;

/// Distance between consecutive fresh addresses.
pub const STRIDE: usize = 0x10;

/// Allocator with predictable addresses.
///
/// Fresh addresses start at [`BASE_ADDRESS`] and advance by [`STRIDE`].
/// Freed addresses are reused last-in first-out before any fresh address,
/// which makes address-reuse scenarios easy to set up. Blocks of any size
/// share the address space, so addresses are identities only.
pub struct RecyclingAllocator {
    blocks: HashMap<Address, Vec<u8>>,
    free: Vec<Address>,
    next: usize,
    fail_after: Option<usize>,
}

impl RecyclingAllocator {
    /// An allocator whose first block lands at [`BASE_ADDRESS`].
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            free: Vec::new(),
            next: BASE_ADDRESS,
            fail_after: None,
        }
    }

    /// Make every allocation after the first `n` fail.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new()
        }
    }

    /// The address the next allocation will return.
    pub fn peek_next(&self) -> Address {
        self.free.last().copied().unwrap_or(Address(self.next))
    }
}

impl Default for RecyclingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RawAllocator for RecyclingAllocator {
    fn alloc(&mut self, size: usize) -> Option<Address> {
        if let Some(n) = self.fail_after.as_mut() {
            if *n == 0 {
                return None;
            }
            *n -= 1;
        }
        let address = match self.free.pop() {
            Some(a) => a,
            None => {
                let a = Address(self.next);
                self.next += STRIDE;
                a
            }
        };
        self.blocks.insert(address, vec![0; size]);
        Some(address)
    }

    fn dealloc(&mut self, address: Address) -> bool {
        if self.blocks.remove(&address).is_some() {
            self.free.push(address);
            true
        } else {
            false
        }
    }

    fn block(&self, address: Address) -> Option<&[u8]> {
        self.blocks.get(&address).map(|b| b.as_slice())
    }

    fn block_mut(&mut self, address: Address) -> Option<&mut [u8]> {
        self.blocks.get_mut(&address).map(|b| b.as_mut_slice())
    }

    fn outstanding(&self) -> usize {
        self.blocks.len()
    }
}
