//! Core error type.

use std::error::Error;
use std::fmt;

/// Contract violations detectable from a tag or payload alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// A type tag outside `0..=7`.
    UnknownTag {
        /// The raw tag received.
        raw: i64,
    },
    /// A boolean payload other than 0 or 1.
    InvalidBool {
        /// The raw payload received.
        value: i64,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag { raw } => write!(f, "Unknown datatype: {raw}"),
            Self::InvalidBool { value } => {
                write!(f, "Expected boolean but value was {value}")
            }
        }
    }
}

impl Error for CoreError {}
