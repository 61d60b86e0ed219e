//! Error types for noise generation.

use thiserror::Error;

/// Result type alias for noise operations.
pub type Result<T> = std::result::Result<T, NoiseError>;

/// Errors raised before or while drawing noise.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    /// The Laplace scale is negative, NaN or infinite.
    ///
    /// Raised before any random draw takes place.
    #[error("Laplace scale must be finite and non-negative, got {0}")]
    InvalidScale(f64),

    /// The injected random source could not seed a noise stream.
    #[error("entropy source failed: {0}")]
    Entropy(String),
}
