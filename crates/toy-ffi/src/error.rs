//! Runtime error type.
//!
//! Every fallible runtime operation returns a [`RuntimeError`]. Only
//! [`fatal`](crate::fatal) turns one into process termination.

use std::any::Any;
use std::error::Error;
use std::fmt;

use toy_core::CoreError;
use toy_heap::HeapError;
use toy_value::{ArrayError, ValueError};

/// Errors raised while servicing a call from generated code.
#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeError {
    /// A debug-heap failure, including detected memory violations.
    Heap(HeapError),
    /// A formatting, array or coercion failure.
    Value(ValueError),
    /// A null handle passed where a string or array was required.
    NullHandle {
        /// The entry point that received it.
        operation: &'static str,
    },
    /// A non-null handle that is not a live array.
    NotAnArray {
        /// The raw payload.
        bits: i64,
    },
    /// Reading stdin or writing stdout failed.
    Io {
        /// The underlying I/O error, rendered.
        reason: String,
    },
    /// A runtime entry point was called while another one was still
    /// borrowing the runtime on this thread.
    Reentrant,
    /// A panic was caught at the C boundary.
    Panicked {
        /// The panic payload, if it was a string.
        message: String,
    },
}

impl RuntimeError {
    /// Whether termination should also print the `FAIL_TEST` marker.
    pub fn fails_test(&self) -> bool {
        matches!(self, Self::Heap(e) if e.is_memory_violation())
    }

    /// Build a [`RuntimeError::Panicked`] from a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::Panicked { message }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heap(e) => write!(f, "{e}"),
            Self::Value(e) => write!(f, "{e}"),
            Self::NullHandle { operation } => write!(f, "{operation} received a null pointer"),
            Self::NotAnArray { bits } => write!(f, "{bits:#x} is not a live array"),
            Self::Io { reason } => write!(f, "I/O failed: {reason}"),
            Self::Reentrant => write!(f, "runtime re-entered while already in use"),
            Self::Panicked { message } => write!(f, "runtime panicked: {message}"),
        }
    }
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Heap(e) => Some(e),
            Self::Value(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HeapError> for RuntimeError {
    fn from(e: HeapError) -> Self {
        Self::Heap(e)
    }
}

impl From<ValueError> for RuntimeError {
    fn from(e: ValueError) -> Self {
        Self::Value(e)
    }
}

impl From<ArrayError> for RuntimeError {
    fn from(e: ArrayError) -> Self {
        Self::Value(e.into())
    }
}

impl From<CoreError> for RuntimeError {
    fn from(e: CoreError) -> Self {
        Self::Value(e.into())
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            reason: e.to_string(),
        }
    }
}
