//! Handle resolution seam.

use std::borrow::Cow;

use crate::array::TaggedArray;
use crate::error::ValueError;

/// Looks up the string or array behind a 64-bit handle.
///
/// The runtime implements this over its heap; tests use an in-memory
/// store. Implementations receive only non-null handles.
///
/// `Error` lets an implementation surface its own failures (a heap
/// use-after-free, say) through [`format_value`](crate::format_value) and
/// the [`coerce`](crate::coerce) functions unchanged.
pub trait ValueResolver {
    /// Error produced by resolution, and by formatting or coercion over
    /// this resolver.
    type Error: From<ValueError>;

    /// The text of a string handle.
    fn resolve_str(&self, bits: i64) -> Result<Cow<'_, str>, Self::Error>;

    /// The array behind an array handle.
    fn resolve_array(&self, bits: i64) -> Result<&TaggedArray, Self::Error>;
}
