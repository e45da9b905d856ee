//! The per-thread runtime slot.
//!
//! Entry points reach the [`Runtime`] through [`with_runtime`]. The slot is
//! filled by [`toy_runtime_start`](crate::entry::toy_runtime_start) or, for
//! code that calls entry points without going through it, lazily from the
//! environment on first use.

use std::cell::RefCell;

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::logging;
use crate::runtime::Runtime;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

fn create_from_env() -> Result<Runtime, RuntimeError> {
    let config = RuntimeConfig::from_env();
    logging::init(&config.log_filter);
    Runtime::new(&config)
}

/// Run `f` against this thread's runtime, creating it if needed.
///
/// Fails with [`RuntimeError::Reentrant`] if called from inside another
/// `with_runtime` on the same thread.
pub fn with_runtime<T, F>(f: F) -> Result<T, RuntimeError>
where
    F: FnOnce(&mut Runtime) -> Result<T, RuntimeError>,
{
    RUNTIME.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| RuntimeError::Reentrant)?;
        let mut rt = match slot.take() {
            Some(rt) => rt,
            None => create_from_env()?,
        };
        let result = f(&mut rt);
        *slot = Some(rt);
        result
    })
}

/// Install `rt` as this thread's runtime, returning any previous one.
pub fn install(rt: Runtime) -> Result<Option<Runtime>, RuntimeError> {
    RUNTIME.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| RuntimeError::Reentrant)?;
        Ok(slot.replace(rt))
    })
}

/// Remove this thread's runtime.
pub fn take() -> Result<Option<Runtime>, RuntimeError> {
    RUNTIME.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| RuntimeError::Reentrant)?;
        Ok(slot.take())
    })
}
