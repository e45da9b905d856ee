//! Core types for the Toy language runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other runtime crate: the 64-bit calling
//! convention's type tags, tagged values, address identities, the debug-mode
//! toggle, and the core error type.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod mode;
pub mod tag;
pub mod value;

pub use error::CoreError;
pub use id::Address;
pub use mode::DebugMode;
pub use tag::TypeTag;
pub use value::TaggedValue;
