//! The runtime context.
//!
//! A [`Runtime`] owns everything generated code allocates: the
//! [`DebugHeap`], the table of live arrays and the program's argument
//! vector. Every `toy_*` entry point is a thin wrapper over one method here.
//!
//! # Handles
//!
//! - A string handle is either the address of a heap block holding
//!   nul-terminated bytes, or a foreign pointer (a literal in the program
//!   image, an argv entry) to nul-terminated bytes.
//! - An array handle is the address of a small header block allocated from
//!   the heap. The [`TaggedArray`] itself lives in the array table under
//!   that address, so arrays are leak-tracked and tombstoned exactly like
//!   strings.

use std::borrow::Cow;
use std::ffi::{c_char, CStr, CString};
use std::io::BufRead;

use indexmap::IndexMap;
use toy_core::{Address, DebugMode, TaggedValue, TypeTag};
use toy_heap::{DebugHeap, HeapError, LeakReport, RawAllocator, SystemAllocator};
use toy_value::{coerce, format_value, TaggedArray, ValueError, ValueResolver};
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

/// Bytes reserved on the heap for each array header.
pub const ARRAY_HEADER_SIZE: usize = 32;

/// Bytes of a nul-terminated string starting at a foreign pointer.
#[allow(unsafe_code)]
fn foreign_bytes<'a>(address: Address) -> &'a [u8] {
    // SAFETY: non-null string handles that are not heap blocks come from
    // generated code, which only passes pointers to nul-terminated data it
    // keeps alive for the duration of the call (program literals, argv).
    unsafe { CStr::from_ptr(address.0 as *const c_char) }.to_bytes()
}

/// Runtime state shared by all entry points on one thread.
pub struct Runtime<A: RawAllocator = SystemAllocator> {
    heap: DebugHeap<A>,
    arrays: IndexMap<Address, TaggedArray>,
    args: Vec<CString>,
}

impl Runtime<SystemAllocator> {
    /// Create a runtime over the system allocator.
    pub fn new(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        Self::with_allocator(config, SystemAllocator::new())
    }
}

impl<A: RawAllocator> Runtime<A> {
    /// Create a runtime over a caller-supplied allocator.
    pub fn with_allocator(config: &RuntimeConfig, allocator: A) -> Result<Self, RuntimeError> {
        let heap = DebugHeap::with_allocator(&config.heap, allocator)?;
        debug!(mode = ?config.heap.mode, "runtime created");
        Ok(Self {
            heap,
            arrays: IndexMap::new(),
            args: Vec::new(),
        })
    }

    /// Replace the program's argument vector.
    pub fn set_args(&mut self, args: Vec<CString>) {
        self.args = args;
    }

    /// The program's arguments.
    pub fn args(&self) -> &[CString] {
        &self.args
    }

    /// The debug heap.
    pub fn heap(&self) -> &DebugHeap<A> {
        &self.heap
    }

    /// The heap's debug mode.
    pub fn mode(&self) -> DebugMode {
        self.heap.mode()
    }

    /// Number of arrays currently live.
    pub fn live_arrays(&self) -> usize {
        self.arrays.len()
    }

    // ── strings ────────────────────────────────────────────────

    /// Copy `bytes` into a fresh nul-terminated heap block.
    pub fn alloc_string(&mut self, bytes: &[u8]) -> Result<i64, RuntimeError> {
        let address = self.heap.allocate(bytes.len() + 1)?;
        let block = self
            .heap
            .block_mut(address)
            .ok_or(HeapError::UnknownAddress { address })?;
        block[..bytes.len()].copy_from_slice(bytes);
        block[bytes.len()] = 0;
        Ok(address.to_bits())
    }

    /// The bytes of a string handle, without the terminator.
    ///
    /// In tracking mode a released string is a use-after-free.
    pub fn string_bytes(&self, bits: i64, operation: &'static str) -> Result<&[u8], RuntimeError> {
        let address = Address::from_bits(bits);
        if address.is_null() {
            return Err(RuntimeError::NullHandle { operation });
        }
        self.heap.check_use_after_free(address)?;
        if self.arrays.contains_key(&address) {
            return Err(ValueError::InvalidHandle {
                bits,
                tag: TypeTag::Str,
            }
            .into());
        }
        match self.heap.block(address) {
            Some(block) => {
                let end = block.iter().position(|&b| b == 0).unwrap_or(block.len());
                Ok(&block[..end])
            }
            None => Ok(foreign_bytes(address)),
        }
    }

    /// Copy a string (usually a literal) onto the heap.
    pub fn copy_string(&mut self, bits: i64) -> Result<i64, RuntimeError> {
        let bytes = self.string_bytes(bits, "toy_malloc")?.to_vec();
        self.alloc_string(&bytes)
    }

    /// Concatenate two strings into a new heap string.
    pub fn concat(&mut self, a: i64, b: i64) -> Result<i64, RuntimeError> {
        let mut bytes = self.string_bytes(a, "toy_concat")?.to_vec();
        bytes.extend_from_slice(self.string_bytes(b, "toy_concat")?);
        self.alloc_string(&bytes)
    }

    /// Byte-wise string equality.
    pub fn strequal(&self, a: i64, b: i64) -> Result<bool, RuntimeError> {
        Ok(self.string_bytes(a, "toy_strequal")? == self.string_bytes(b, "toy_strequal")?)
    }

    /// Length of a string in bytes.
    pub fn strlen(&self, s: i64) -> Result<i64, RuntimeError> {
        Ok(self.string_bytes(s, "toy_strlen")?.len() as i64)
    }

    /// Print `prompt` (if non-null) via `emit`, then read one line from
    /// `input` into a new heap string, without its line terminator. End of
    /// input yields the empty string.
    pub fn read_line<R, F>(&mut self, prompt: i64, input: &mut R, emit: F) -> Result<i64, RuntimeError>
    where
        R: BufRead + ?Sized,
        F: FnOnce(&[u8]) -> std::io::Result<()>,
    {
        if prompt != 0 {
            emit(self.string_bytes(prompt, "toy_input")?)?;
        }
        let mut line = Vec::new();
        input.read_until(b'\n', &mut line)?;
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        self.alloc_string(&line)
    }

    // ── arrays ─────────────────────────────────────────────────

    /// Allocate an array of `length` default slots whose elements carry
    /// the raw tag `element`.
    pub fn new_array(&mut self, length: i64, element: i64) -> Result<i64, RuntimeError> {
        let element = TypeTag::from_raw(element)?;
        let array = TaggedArray::allocate(length, element)?;
        let header = self.heap.allocate(ARRAY_HEADER_SIZE)?;
        self.arrays.insert(header, array);
        Ok(header.to_bits())
    }

    /// The array behind a handle.
    pub fn array(&self, bits: i64, operation: &'static str) -> Result<&TaggedArray, RuntimeError> {
        let address = Address::from_bits(bits);
        if address.is_null() {
            return Err(RuntimeError::NullHandle { operation });
        }
        self.heap.check_use_after_free(address)?;
        self.arrays
            .get(&address)
            .ok_or(RuntimeError::NotAnArray { bits })
    }

    fn array_mut(&mut self, bits: i64, operation: &'static str) -> Result<&mut TaggedArray, RuntimeError> {
        let address = Address::from_bits(bits);
        if address.is_null() {
            return Err(RuntimeError::NullHandle { operation });
        }
        self.heap.check_use_after_free(address)?;
        self.arrays
            .get_mut(&address)
            .ok_or(RuntimeError::NotAnArray { bits })
    }

    /// Write one slot; see [`TaggedArray::write`].
    pub fn array_write(&mut self, arr: i64, value: i64, index: i64, tag: i64) -> Result<(), RuntimeError> {
        let tag = TypeTag::from_raw(tag)?;
        self.array_mut(arr, "toy_write_to_arr")?
            .write(value, index, tag)?;
        Ok(())
    }

    /// Read one slot's raw payload; see [`TaggedArray::read`].
    pub fn array_read(&self, arr: i64, index: i64) -> Result<i64, RuntimeError> {
        Ok(self.array(arr, "toy_read_from_arr")?.read(index)?)
    }

    /// Logical length of an array.
    pub fn array_len(&self, arr: i64) -> Result<i64, RuntimeError> {
        Ok(self.array(arr, "toy_arrlen")?.len() as i64)
    }

    /// A `str[]` holding the program's arguments.
    ///
    /// The elements point at runtime-owned copies of the arguments, so they
    /// are foreign strings: readable, but not to be freed.
    pub fn argv_array(&mut self) -> Result<i64, RuntimeError> {
        let handle = self.new_array(self.args.len() as i64, TypeTag::Str.raw())?;
        let pointers: Vec<i64> = self.args.iter().map(|a| a.as_ptr() as i64).collect();
        for (i, ptr) in pointers.into_iter().enumerate() {
            self.array_write(handle, ptr, i as i64, TypeTag::Str.raw())?;
        }
        Ok(handle)
    }

    // ── memory ─────────────────────────────────────────────────

    /// Release a string or array.
    pub fn free(&mut self, bits: i64) -> Result<(), RuntimeError> {
        let address = Address::from_bits(bits);
        self.heap.release(address)?;
        self.arrays.swap_remove(&address);
        Ok(())
    }

    /// Fail if the handle has been released (tracking mode only).
    pub fn check_use_after_free(&self, bits: i64) -> Result<(), RuntimeError> {
        Ok(self.heap.check_use_after_free(Address::from_bits(bits))?)
    }

    // ── values ─────────────────────────────────────────────────

    /// Render a tagged value; see [`format_value`].
    pub fn format(&self, value: i64, tag: i64, degree: i64) -> Result<String, RuntimeError> {
        let value = TaggedValue::new(value, TypeTag::from_raw(tag)?);
        format_value(self, value, degree)
    }

    /// Convert to a string handle. A string is returned unchanged; any
    /// other scalar becomes a new heap string.
    pub fn type_to_str(&mut self, value: i64, tag: i64) -> Result<i64, RuntimeError> {
        let tag = TypeTag::from_raw(tag)?;
        if tag == TypeTag::Str {
            return Ok(value);
        }
        let text = coerce::to_str(&*self, TaggedValue::new(value, tag))?.into_owned();
        self.alloc_string(text.as_bytes())
    }

    /// Convert to a boolean payload (0 or 1).
    pub fn type_to_bool(&self, value: i64, tag: i64) -> Result<i64, RuntimeError> {
        let value = TaggedValue::new(value, TypeTag::from_raw(tag)?);
        Ok(coerce::to_bool(self, value)? as i64)
    }

    /// Convert to an integer.
    pub fn type_to_int(&self, value: i64, tag: i64) -> Result<i64, RuntimeError> {
        coerce::to_int(self, TaggedValue::new(value, TypeTag::from_raw(tag)?))
    }

    /// Convert to float payload bits.
    pub fn type_to_float(&self, value: i64, tag: i64) -> Result<i64, RuntimeError> {
        coerce::to_float_bits(self, TaggedValue::new(value, TypeTag::from_raw(tag)?))
    }

    /// Tear down, yielding a leak report if tracking found live
    /// allocations.
    pub fn shutdown(self) -> Option<LeakReport> {
        self.heap.shutdown()
    }
}

impl<A: RawAllocator> ValueResolver for Runtime<A> {
    type Error = RuntimeError;

    fn resolve_str(&self, bits: i64) -> Result<Cow<'_, str>, RuntimeError> {
        Ok(String::from_utf8_lossy(self.string_bytes(bits, "toy_print")?))
    }

    fn resolve_array(&self, bits: i64) -> Result<&TaggedArray, RuntimeError> {
        self.array(bits, "toy_print")
    }
}
