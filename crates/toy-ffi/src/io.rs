//! Console entry points: `print`, `println` and `input`.

use std::io::{self, Write};

use crate::context::with_runtime;

fn print_impl(value: i64, tag: i64, degree: i64, newline: bool) -> Result<(), crate::RuntimeError> {
    let text = with_runtime(|rt| rt.format(value, tag, degree))?;
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    if newline {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Print a tagged value to stdout. `degree` is the array nesting depth to
/// expand.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_print(value: i64, tag: i64, degree: i64) {
    ffi_guard!({ print_impl(value, tag, degree, false) })
}

/// Print a tagged value and a newline to stdout.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_println(value: i64, tag: i64, degree: i64) {
    ffi_guard!({ print_impl(value, tag, degree, true) })
}

/// Print the string `prompt` (unless null), then read one line from stdin
/// into a new heap string. End of input yields the empty string.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_input(prompt: i64) -> i64 {
    ffi_guard!({
        with_runtime(|rt| {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            rt.read_line(prompt, &mut input, |p| {
                let mut out = io::stdout().lock();
                out.write_all(p)?;
                out.flush()
            })
        })
    })
}
