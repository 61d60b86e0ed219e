//! Error types for label aggregation.
//!
//! Wraps the component crates' errors so callers handle one type. All
//! errors are local validation failures; a call either fully succeeds or
//! fails without a partial result.

use pate_core::TensorError;
use pate_noise::NoiseError;
use thiserror::Error;

/// Errors that can occur during aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    /// Shape, label range, overflow or config violation.
    #[error("contract violation: {0}")]
    Tensor(#[from] TensorError),

    /// Invalid noise scale or failed entropy source.
    #[error("noise error: {0}")]
    Noise(#[from] NoiseError),

    /// No teachers voted, so no sample has a plurality.
    ///
    /// Tallying zero teachers would give all-zero counts, labelling every
    /// sample class 0 in plurality mode and by noise alone in noisy-max
    /// mode. Such a batch is rejected instead. Zero samples with at least
    /// one teacher is not an error and yields an empty result.
    #[error("ensemble has no teachers for {samples} samples")]
    EmptyEnsemble {
        /// Number of samples in the input.
        samples: usize,
    },
}

impl AggregationError {
    /// Returns true for parameter errors (bad noise scale).
    #[must_use]
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::Noise(NoiseError::InvalidScale(_)))
    }

    /// Returns true for shape and input-contract errors.
    #[must_use]
    pub fn is_contract_error(&self) -> bool {
        matches!(self, Self::Tensor(_) | Self::EmptyEnsemble { .. })
    }
}
