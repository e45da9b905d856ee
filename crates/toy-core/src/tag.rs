//! Type tags of the 64-bit calling convention.
//!
//! Generated code passes every value as an `i64` payload together with an
//! integer tag naming the runtime type carried by that payload.

use std::fmt;

use crate::error::CoreError;

/// Runtime type carried by a 64-bit payload.
///
/// The discriminants are ABI-stable: generated code emits them as integer
/// constants.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// Pointer to a nul-terminated byte string (0 = null string).
    Str = 0,
    /// Boolean, encoded as exactly 0 or 1.
    Bool = 1,
    /// Signed 64-bit integer.
    Int = 2,
    /// `f64` passed bit-reinterpreted through the 64-bit channel.
    Float = 3,
    /// Array handle whose elements are strings.
    StrArr = 4,
    /// Array handle whose elements are booleans.
    BoolArr = 5,
    /// Array handle whose elements are integers.
    IntArr = 6,
    /// Array handle whose elements are floats.
    FloatArr = 7,
}

impl TypeTag {
    /// All tags in discriminant order.
    pub const ALL: [TypeTag; 8] = [
        Self::Str,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::StrArr,
        Self::BoolArr,
        Self::IntArr,
        Self::FloatArr,
    ];

    /// Decode a tag received over the calling convention.
    pub fn from_raw(raw: i64) -> Result<Self, CoreError> {
        match raw {
            0 => Ok(Self::Str),
            1 => Ok(Self::Bool),
            2 => Ok(Self::Int),
            3 => Ok(Self::Float),
            4 => Ok(Self::StrArr),
            5 => Ok(Self::BoolArr),
            6 => Ok(Self::IntArr),
            7 => Ok(Self::FloatArr),
            _ => Err(CoreError::UnknownTag { raw }),
        }
    }

    /// The integer emitted by generated code for this tag.
    pub fn raw(self) -> i64 {
        self as u8 as i64
    }

    /// Whether payloads with this tag are array handles.
    pub fn is_array(self) -> bool {
        (self as u8) >= 4
    }

    /// For an array tag, the tag of a one-dimensional array's elements.
    /// Scalar tags return themselves.
    pub fn scalar(self) -> Self {
        match self {
            Self::StrArr => Self::Str,
            Self::BoolArr => Self::Bool,
            Self::IntArr => Self::Int,
            Self::FloatArr => Self::Float,
            scalar => scalar,
        }
    }

    /// The array tag whose elements carry this scalar tag.
    /// Array tags return themselves.
    pub fn array_of(self) -> Self {
        match self {
            Self::Str => Self::StrArr,
            Self::Bool => Self::BoolArr,
            Self::Int => Self::IntArr,
            Self::Float => Self::FloatArr,
            array => array,
        }
    }

    /// Source-level spelling of the type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::StrArr => "str[]",
            Self::BoolArr => "bool[]",
            Self::IntArr => "int[]",
            Self::FloatArr => "float[]",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for TypeTag {
    type Error = CoreError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}
