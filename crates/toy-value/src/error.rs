//! Error types for array access, formatting and coercion.

use std::error::Error;
use std::fmt;

use toy_core::{CoreError, TypeTag};

/// Errors from [`TaggedArray`](crate::TaggedArray) operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An array was allocated with a negative length.
    NegativeLength {
        /// The requested length.
        length: i64,
    },
    /// A read or write used a negative index.
    NegativeIndex {
        /// The offending index.
        index: i64,
    },
    /// A write's declared type differs from the array's element type.
    TypeMismatch {
        /// The array's element type.
        expected: TypeTag,
        /// The type the write declared.
        got: TypeTag,
    },
    /// The backing buffer for `capacity` slots could not be allocated.
    AllocationFailed {
        /// Requested slot count.
        capacity: usize,
    },
    /// A read past the end of the array.
    OutOfBounds {
        /// The requested index.
        index: i64,
        /// The array's logical length.
        length: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLength { length } => {
                write!(f, "Array length must not be negative, got {length}")
            }
            Self::NegativeIndex { index } => {
                write!(f, "Index must not be negative, got {index}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "Was expecting type of {expected}, got {got}")
            }
            Self::AllocationFailed { capacity } => {
                write!(f, "Failed to allocate array buffer of {capacity} elements")
            }
            Self::OutOfBounds { index, length } => write!(
                f,
                "Tried to read from index {index} but array is only {length} elements long"
            ),
        }
    }
}

impl Error for ArrayError {}

/// Errors from formatting, handle resolution and coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueError {
    /// A tag or boolean payload violated the calling convention.
    Core(CoreError),
    /// An array operation failed.
    Array(ArrayError),
    /// A null handle where a string or array was required.
    NullHandle {
        /// The operation that received it.
        operation: &'static str,
    },
    /// A handle that does not refer to a live string or array.
    InvalidHandle {
        /// The raw payload.
        bits: i64,
        /// The type the handle was expected to carry.
        tag: TypeTag,
    },
    /// A string that does not parse as the requested number type.
    InvalidNumber {
        /// The input text.
        text: String,
        /// The target type.
        target: TypeTag,
    },
    /// A conversion the language does not support.
    UnsupportedConversion {
        /// Source type.
        from: TypeTag,
        /// Target type.
        to: TypeTag,
    },
    /// A string was not `"true"` or `"false"` in a conversion to bool.
    InvalidBoolText {
        /// The input text.
        text: String,
    },
    /// An integer other than 0 or 1 in a conversion to bool.
    InvalidBoolInt {
        /// The input integer.
        value: i64,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{e}"),
            Self::Array(e) => write!(f, "{e}"),
            Self::NullHandle { operation } => write!(f, "{operation} received a null pointer"),
            Self::InvalidHandle { bits, tag } => {
                write!(f, "{bits:#x} is not a live {tag} handle")
            }
            Self::InvalidNumber { text, target } => {
                write!(f, "String is not a valid {target}: '{text}'")
            }
            Self::UnsupportedConversion { from, to } => {
                write!(f, "Tried to convert type {from} to {to}, that is not supported")
            }
            Self::InvalidBoolText { text } => write!(
                f,
                "tried to convert string to bool that was not \"true\" or \"false\": '{text}'"
            ),
            Self::InvalidBoolInt { value } => {
                write!(f, "Tried to convert int (that was not 1 or 0) to bool: {value}")
            }
        }
    }
}

impl Error for ValueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Core(e) => Some(e),
            Self::Array(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for ValueError {
    fn from(e: CoreError) -> Self {
        Self::Core(e)
    }
}

impl From<ArrayError> for ValueError {
    fn from(e: ArrayError) -> Self {
        Self::Array(e)
    }
}
