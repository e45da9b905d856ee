//! Values of the Toy language runtime.
//!
//! - [`TaggedArray`]: the growable, homogeneously typed array that backs
//!   every array value in the language.
//! - [`format_value`]: depth-bounded text rendering of a tagged scalar or
//!   array, as used by `print` / `println`.
//! - [`coerce`]: the scalar conversion table behind the language's casts.
//!
//! Strings and arrays travel as 64-bit handles. This crate never
//! dereferences a handle itself; it asks a [`ValueResolver`] for the string
//! or array behind it.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod coerce;
pub mod error;
pub mod format;
pub mod resolve;

pub use array::TaggedArray;
pub use error::{ArrayError, ValueError};
pub use format::{format_value, NULL_ARRAY, NULL_STRING, TRUNCATED_ARRAY};
pub use resolve::ValueResolver;
