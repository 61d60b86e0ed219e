//! Configuration for label aggregation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorError};

/// Number of classes assumed when no configuration is given.
pub const DEFAULT_NUM_CLASSES: usize = 10;

/// Configuration shared by label extraction and both aggregators.
///
/// Use the builder methods to adjust individual values.
///
/// # Example
///
/// ```rust
/// use pate_core::AggregationConfig;
///
/// let config = AggregationConfig::new()
///     .with_num_classes(100)
///     .with_parallel_threshold(4096);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Length of every vote count vector. Labels must lie in `[0, num_classes)`.
    pub num_classes: usize,
    /// Allow the per-sample map to run on the rayon pool.
    pub parallel: bool,
    /// Minimum number of samples before work is spread across threads.
    pub parallel_threshold: usize,
}

impl AggregationConfig {
    /// Creates a config with default values.
    ///
    /// Defaults:
    /// - Classes: 10
    /// - Parallel: enabled
    /// - Parallel threshold: 1,024 samples
    #[must_use]
    pub const fn new() -> Self {
        Self {
            num_classes: DEFAULT_NUM_CLASSES,
            parallel: true,
            parallel_threshold: 1024,
        }
    }

    /// Sets the number of classes.
    #[must_use]
    pub const fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    /// Enables or disables parallel aggregation.
    #[must_use]
    pub const fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the sample count at which parallel aggregation kicks in.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, samples: usize) -> Self {
        self.parallel_threshold = samples;
        self
    }

    /// Checks that the configuration can drive an aggregation.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidConfig`] if `num_classes` is zero or
    /// too large to be addressed by a `u32` label.
    pub fn validate(&self) -> Result<()> {
        if self.num_classes == 0 {
            return Err(TensorError::InvalidConfig(
                "num_classes must be at least 1".to_string(),
            ));
        }
        if u32::try_from(self.num_classes).is_err() {
            return Err(TensorError::InvalidConfig(format!(
                "num_classes {} does not fit a u32 label",
                self.num_classes
            )));
        }
        Ok(())
    }

    /// Returns true if `samples` is large enough to aggregate in parallel.
    #[inline]
    #[must_use]
    pub const fn runs_parallel(&self, samples: usize) -> bool {
        self.parallel && samples >= self.parallel_threshold
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self::new()
    }
}
