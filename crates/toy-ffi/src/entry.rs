//! Process entry: wraps the program's compiled `main`.
//!
//! The generated C `main` hands its arguments and the user's entry function
//! to [`toy_runtime_start`]. The runtime is installed for the duration of
//! the call; afterwards, in tracking mode, any allocation still live is
//! listed on stdout followed by the `FAIL_TEST` marker. The exit status is
//! the user function's return value either way.

use std::ffi::{c_char, CStr, CString};
use std::io::{self, Write};

use toy_heap::{LeakReport, RawAllocator};
use tracing::info;

use crate::config::RuntimeConfig;
use crate::context;
use crate::fatal::FAIL_TEST_MARKER;
use crate::logging;
use crate::runtime::Runtime;

/// Signature of the compiled program's entry function.
pub type UserMain = extern "C" fn() -> i64;

/// Write a leak report followed by the `FAIL_TEST` marker.
pub fn write_leak_report<W: Write + ?Sized>(report: &LeakReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "{report}")?;
    out.write_all(FAIL_TEST_MARKER.as_bytes())
}

/// Shut `rt` down, writing a leak report to `out` if one is due.
///
/// Returns whether anything was reported.
pub fn finish<A, W>(rt: Runtime<A>, out: &mut W) -> io::Result<bool>
where
    A: RawAllocator,
    W: Write + ?Sized,
{
    let reported = match rt.shutdown() {
        Some(report) => {
            write_leak_report(&report, out)?;
            true
        }
        None => false,
    };
    out.flush()?;
    Ok(reported)
}

#[allow(unsafe_code)]
fn collect_args(argc: i32, argv: *const *const c_char) -> Vec<CString> {
    if argv.is_null() || argc <= 0 {
        return Vec::new();
    }
    (0..argc as usize)
        .filter_map(|i| {
            // SAFETY: the C `main` contract guarantees `argv` holds `argc`
            // readable pointers.
            let arg = unsafe { *argv.add(i) };
            if arg.is_null() {
                return None;
            }
            // SAFETY: each non-null `argv` entry is a nul-terminated string
            // that outlives this call.
            Some(unsafe { CStr::from_ptr(arg) }.to_owned())
        })
        .collect()
}

/// Run `user_main` under a freshly configured runtime.
///
/// Returns the user function's result truncated to `int`. A missing
/// `user_main` runs nothing and returns 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_runtime_start(
    argc: i32,
    argv: *const *const c_char,
    user_main: Option<UserMain>,
) -> i32 {
    ffi_guard!({
        let config = RuntimeConfig::from_env();
        logging::init(&config.log_filter);
        let mut rt = Runtime::new(&config)?;
        rt.set_args(collect_args(argc, argv));
        info!(mode = ?rt.mode(), args = rt.args().len(), "runtime started");
        context::install(rt)?;

        let result = user_main.map_or(0, |main| main());

        if let Some(rt) = context::take()? {
            finish(rt, &mut io::stdout().lock())?;
        }
        Ok(result as i32)
    })
}
