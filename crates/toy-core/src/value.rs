//! Tagged values: a 64-bit payload plus its type tag.

use crate::error::CoreError;
use crate::tag::TypeTag;

/// A 64-bit payload paired with the tag describing how to interpret it.
///
/// The default value is integer zero, which is also what freshly allocated
/// array slots hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaggedValue {
    /// Raw payload as passed through the calling convention.
    pub bits: i64,
    /// How `bits` is to be interpreted.
    pub tag: TypeTag,
}

impl TaggedValue {
    /// Pair a raw payload with a tag.
    pub const fn new(bits: i64, tag: TypeTag) -> Self {
        Self { bits, tag }
    }

    /// An integer value.
    pub const fn int(v: i64) -> Self {
        Self::new(v, TypeTag::Int)
    }

    /// A boolean value, encoded as 0 or 1.
    pub const fn bool(v: bool) -> Self {
        Self::new(v as i64, TypeTag::Bool)
    }

    /// A float value, bit-reinterpreted into the payload.
    pub fn float(v: f64) -> Self {
        Self::new(v.to_bits() as i64, TypeTag::Float)
    }

    /// Decode a boolean payload. Anything other than 0 or 1 is a contract
    /// violation.
    pub fn decode_bool(bits: i64) -> Result<bool, CoreError> {
        match bits {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(CoreError::InvalidBool { value }),
        }
    }

    /// Reinterpret a payload as an `f64`.
    pub fn decode_float(bits: i64) -> f64 {
        f64::from_bits(bits as u64)
    }

    /// Whether the payload is a null pointer for a pointer-carrying tag.
    pub fn is_null_pointer(&self) -> bool {
        (self.tag == TypeTag::Str || self.tag.is_array()) && self.bits == 0
    }
}

impl Default for TaggedValue {
    fn default() -> Self {
        Self::int(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_integer_zero() {
        let v = TaggedValue::default();
        assert_eq!(v.bits, 0);
        assert_eq!(v.tag, TypeTag::Int);
    }

    #[test]
    fn float_bits_survive_the_channel() {
        let v = TaggedValue::float(-2.5);
        assert_eq!(TaggedValue::decode_float(v.bits), -2.5);
    }

    #[test]
    fn bool_decoding_rejects_out_of_range() {
        assert_eq!(TaggedValue::decode_bool(0), Ok(false));
        assert_eq!(TaggedValue::decode_bool(1), Ok(true));
        assert_eq!(
            TaggedValue::decode_bool(2),
            Err(CoreError::InvalidBool { value: 2 })
        );
    }

    #[test]
    fn null_pointer_only_for_pointer_tags() {
        assert!(TaggedValue::new(0, TypeTag::Str).is_null_pointer());
        assert!(TaggedValue::new(0, TypeTag::IntArr).is_null_pointer());
        assert!(!TaggedValue::int(0).is_null_pointer());
    }
}
