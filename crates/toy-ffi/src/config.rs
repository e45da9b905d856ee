//! Runtime configuration, read from the environment at startup.

use toy_core::mode::DEBUG_ENV_VAR;
use toy_core::DebugMode;
use toy_heap::HeapConfig;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "TOY_LOG";

/// Configuration for a [`Runtime`](crate::Runtime).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Debug heap settings, including whether tracking is on.
    pub heap: HeapConfig,

    /// `tracing` filter directive for internal events.
    ///
    /// Default: `"off"`, so that the program's own stdout and stderr are
    /// all that appears unless logging is asked for.
    pub log_filter: String,
}

impl RuntimeConfig {
    /// Default log filter.
    pub const DEFAULT_LOG_FILTER: &'static str = "off";

    /// Read `TOY_DEBUG` and `TOY_LOG` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = DebugMode::from_env_value(lookup(DEBUG_ENV_VAR).as_deref());
        Self {
            heap: HeapConfig::new(mode),
            log_filter: lookup(LOG_ENV_VAR)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_owned()),
        }
    }

    /// Config with the given debug mode and default everything else.
    pub fn with_mode(mode: DebugMode) -> Self {
        Self {
            heap: HeapConfig::new(mode),
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            heap: HeapConfig::default(),
            log_filter: Self::DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}
