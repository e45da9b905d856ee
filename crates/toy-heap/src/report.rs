//! Teardown leak report.

use std::fmt;

use crate::tracker::TrackerEntry;

/// Snapshot of the tracker taken at teardown (or on demand).
///
/// Rendered with [`Display`](fmt::Display) in the format the test harness
/// greps for:
///
/// ```text
/// Tracked allocations:
///   0x55d0c1a2b2c0: 24
///   0x55d0c1a2b300: -1
/// Total Live entries remaining: 1
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeakReport {
    /// Every tracked entry, live and tombstoned.
    pub entries: Vec<TrackerEntry>,
    /// Live counter at the time of the report.
    pub live_allocations: u64,
}

impl LeakReport {
    /// Whether any allocation is still live.
    pub fn has_leaks(&self) -> bool {
        self.live_allocations != 0
    }

    /// Entries that are still live.
    pub fn leaked(&self) -> impl Iterator<Item = &TrackerEntry> + '_ {
        self.entries.iter().filter(|e| e.state.is_live())
    }
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tracked allocations:")?;
        for entry in &self.entries {
            writeln!(f, "  {}: {}", entry.address, entry.state.raw())?;
        }
        write!(f, "Total Live entries remaining: {}", self.live_allocations)
    }
}
