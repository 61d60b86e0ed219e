//! Validated Laplace scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result};

/// Scale `b` of a zero-centred Laplace distribution.
///
/// Always finite and non-negative. In the noisy-max analysis the scale is
/// proportional to the inverse of the per-query privacy budget, so a
/// larger scale means more noise and a stronger guarantee. A scale of 0
/// yields zero noise and reduces noisy max to plain plurality voting.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LaplaceScale(f64);

impl LaplaceScale {
    /// Zero noise.
    pub const ZERO: Self = Self(0.0);

    /// Validates a scale.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidScale`] for negative, NaN or infinite
    /// values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pate_noise::LaplaceScale;
    ///
    /// assert!(LaplaceScale::new(20.0).is_ok());
    /// assert!(LaplaceScale::new(0.0).is_ok());
    /// assert!(LaplaceScale::new(-1.0).is_err());
    /// assert!(LaplaceScale::new(f64::NAN).is_err());
    /// ```
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(NoiseError::InvalidScale(scale));
        }
        Ok(Self(scale))
    }

    /// Returns the scale.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns true if this scale adds no noise.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for LaplaceScale {
    type Error = NoiseError;

    fn try_from(scale: f64) -> Result<Self> {
        Self::new(scale)
    }
}

impl From<LaplaceScale> for f64 {
    fn from(scale: LaplaceScale) -> Self {
        scale.0
    }
}

impl fmt::Display for LaplaceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b={}", self.0)
    }
}
