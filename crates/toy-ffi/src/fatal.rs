//! The fatal-termination path.
//!
//! Diagnostics go to stderr as `[ERROR] <message>`. Memory violations add
//! the `FAIL_TEST` marker line on stdout, which test harnesses look for.
//! Both streams are flushed before the process aborts.

use std::io::{self, Write};

use tracing::error;

use crate::error::RuntimeError;

/// Marker line printed on stdout when a run must count as a failed test.
pub const FAIL_TEST_MARKER: &str = "\nFAIL_TEST\n";

/// Write the diagnostic for `err` to the given streams and flush both.
pub fn write_diagnostic<O, E>(err: &RuntimeError, out: &mut O, err_out: &mut E) -> io::Result<()>
where
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    out.flush()?;
    writeln!(err_out, "[ERROR] {err}")?;
    if err.fails_test() {
        out.write_all(FAIL_TEST_MARKER.as_bytes())?;
    }
    out.flush()?;
    err_out.flush()
}

/// Report `err` on the process's stdout/stderr and abort.
pub fn terminate(err: &RuntimeError) -> ! {
    error!(%err, "fatal runtime error");
    let _ = write_diagnostic(err, &mut io::stdout().lock(), &mut io::stderr().lock());
    std::process::abort()
}
