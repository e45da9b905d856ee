//! Process and host queries.

use std::io::{self, Write};

use crate::context::with_runtime;

/// Name reported to programs for the host OS.
pub fn os_name() -> &'static str {
    if cfg!(windows) {
        "windows"
    } else {
        std::env::consts::OS
    }
}

/// Flush stdout and exit with `code`. No leak report is printed.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_sys_exit(code: i64) {
    let _ = io::stdout().flush();
    std::process::exit(code as i32)
}

/// Process id.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_sys_get_pid() -> i64 {
    i64::from(std::process::id())
}

/// Number of program arguments, including the program name.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_sys_get_argc() -> i64 {
    ffi_guard!({ with_runtime(|rt| Ok(rt.args().len() as i64)) })
}

/// The program arguments as a new `str[]`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_sys_get_argv() -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.argv_array()) })
}

/// The host OS name as a new heap string.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_sys_get_os_name() -> i64 {
    ffi_guard!({ with_runtime(|rt| rt.alloc_string(os_name().as_bytes())) })
}

/// Number of CPUs available to the process (at least 1).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_sys_get_core_count() -> i64 {
    std::thread::available_parallelism().map_or(1, |n| n.get() as i64)
}
