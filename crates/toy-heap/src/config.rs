//! Heap configuration parameters.

use toy_core::DebugMode;

use crate::error::HeapError;

/// Configuration for a [`DebugHeap`](crate::DebugHeap).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Whether allocations are tracked.
    pub mode: DebugMode,

    /// Number of buckets in the address tracker.
    ///
    /// Default: 16. Fixed for the heap's lifetime; chains grow without
    /// bound as more distinct addresses are seen. Must be nonzero.
    pub bucket_count: usize,
}

impl HeapConfig {
    /// Default tracker bucket count.
    pub const DEFAULT_BUCKET_COUNT: usize = 16;

    /// Create a config for the given mode with the default bucket count.
    pub fn new(mode: DebugMode) -> Self {
        Self {
            mode,
            bucket_count: Self::DEFAULT_BUCKET_COUNT,
        }
    }

    /// Create a config whose mode comes from the `TOY_DEBUG` variable.
    pub fn from_env() -> Self {
        Self::new(DebugMode::from_env())
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), HeapError> {
        if self.bucket_count == 0 {
            return Err(HeapError::InvalidConfig {
                reason: "bucket_count must be nonzero".into(),
            });
        }
        Ok(())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new(DebugMode::Passthrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bucket_count_is_16() {
        let config = HeapConfig::new(DebugMode::Tracking);
        assert_eq!(config.bucket_count, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_buckets_rejected() {
        let config = HeapConfig {
            mode: DebugMode::Tracking,
            bucket_count: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(HeapError::InvalidConfig { .. })
        ));
    }
}
