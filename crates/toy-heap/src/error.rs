//! Heap-specific error types.

use std::error::Error;
use std::fmt;

use toy_core::Address;

/// Errors that can occur during heap operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// The underlying allocator could not satisfy the request.
    AllocationFailed {
        /// Number of bytes requested.
        size: usize,
    },
    /// `release` was called with the null address.
    NullRelease,
    /// An address was used after it had been released.
    UseAfterFree {
        /// The tombstoned address.
        address: Address,
    },
    /// An address was released a second time.
    DoubleFree {
        /// The tombstoned address.
        address: Address,
    },
    /// The allocator never handed out this address (or already took it back
    /// while tracking was off).
    UnknownAddress {
        /// The unrecognised address.
        address: Address,
    },
    /// The heap configuration failed validation.
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },
}

impl HeapError {
    /// Whether this error is a detected memory-safety violation, which the
    /// runtime signals to test harnesses with the `FAIL_TEST` marker.
    pub fn is_memory_violation(&self) -> bool {
        matches!(self, Self::UseAfterFree { .. } | Self::DoubleFree { .. })
    }
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { size } => {
                write!(f, "allocation of {size} bytes failed")
            }
            Self::NullRelease => write!(f, "Tried to free a null buffer"),
            Self::UseAfterFree { address } => {
                write!(
                    f,
                    "Use-after-free detected! Pointer {address} was already freed"
                )
            }
            Self::DoubleFree { address } => {
                write!(f, "Double free detected! Pointer {address} was already freed")
            }
            Self::UnknownAddress { address } => {
                write!(f, "Tried to free {address}, which was never allocated")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid heap config: {reason}"),
        }
    }
}

impl Error for HeapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_uaf_and_double_free_are_violations() {
        let a = Address(0x40);
        assert!(HeapError::UseAfterFree { address: a }.is_memory_violation());
        assert!(HeapError::DoubleFree { address: a }.is_memory_violation());
        assert!(!HeapError::NullRelease.is_memory_violation());
        assert!(!HeapError::UnknownAddress { address: a }.is_memory_violation());
        assert!(!HeapError::AllocationFailed { size: 8 }.is_memory_violation());
    }

    #[test]
    fn uaf_message_names_the_pointer() {
        let msg = HeapError::UseAfterFree {
            address: Address(0x1f0),
        }
        .to_string();
        assert!(msg.contains("Use-after-free"));
        assert!(msg.contains("0x1f0"));
    }
}
