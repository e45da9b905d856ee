//! C runtime library for programs compiled from the Toy language.
//!
//! Generated code links this crate as a static library and calls the
//! `toy_*` entry points. Every value crosses the boundary as an `i64`
//! payload, usually paired with an `i64` type tag; see
//! [`toy_core::TypeTag`] for the numbering.
//!
//! # Architecture
//!
//! - [`runtime::Runtime`] owns the debug heap and the array table and
//!   implements every operation as a safe, fallible method.
//! - [`context`] keeps one runtime per thread. The generated `main` calls
//!   [`entry::toy_runtime_start`], which installs it, runs the program and
//!   prints the leak report.
//! - The entry-point modules ([`string`], [`array`], [`convert`], [`io`],
//!   [`memory`], [`sys`], [`time`]) are thin `extern "C"` wrappers. Each one
//!   catches errors and panics at the boundary and hands them to
//!   [`fatal::terminate`].
//!
//! # Environment
//!
//! - `TOY_DEBUG=TRUE` turns on allocation tracking, use-after-free checks
//!   and the leak report.
//! - `TOY_LOG` takes a `tracing` filter (for example `toy_heap=trace`).
//!   Logging is off by default.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod array;
pub mod config;
pub mod context;
pub mod convert;
pub mod entry;
pub mod error;
pub mod fatal;
pub mod io;
pub mod logging;
pub mod memory;
pub mod runtime;
pub mod string;
pub mod sys;
pub mod time;

pub use config::RuntimeConfig;
pub use error::RuntimeError;
pub use runtime::Runtime;
