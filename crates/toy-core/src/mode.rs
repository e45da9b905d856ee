//! The debug-mode toggle.

/// Environment variable that enables allocation tracking.
pub const DEBUG_ENV_VAR: &str = "TOY_DEBUG";

/// The only value of [`DEBUG_ENV_VAR`] that enables tracking.
pub const DEBUG_ENV_ENABLED: &str = "TRUE";

/// Whether the heap tracks allocations or passes straight through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// Record every allocation, tombstone every release, detect
    /// use-after-free and report leaks at teardown.
    Tracking,
    /// Plain allocation with no tracker at all.
    #[default]
    Passthrough,
}

impl DebugMode {
    /// Interpret the value of `TOY_DEBUG`. Only the exact string `"TRUE"`
    /// enables tracking; absence or any other value is passthrough.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(DEBUG_ENV_ENABLED) => Self::Tracking,
            _ => Self::Passthrough,
        }
    }

    /// Read the toggle from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DEBUG_ENV_VAR).ok().as_deref())
    }

    /// Whether tracking is enabled.
    pub fn is_tracking(self) -> bool {
        self == Self::Tracking
    }
}
