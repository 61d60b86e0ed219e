//! # Laplace Mechanism
//!
//! Zero-centred Laplace noise for vote counts.
//!
//! ## Sampling
//!
//! Inverse-CDF sampling from one uniform draw `U` on the open interval
//! `(0, 1)`:
//!
//! | Branch | Sample |
//! |--------|--------|
//! | `U >= 0.5` | `-b * ln(2 - 2U)` |
//! | `U < 0.5` | `b * ln(2U)` |
//!
//! Both logarithm arguments stay inside `(0, 1]`, so every sample is
//! finite. Each sample consumes exactly one uniform draw, including when
//! `b = 0` (the sample is then zero).
//!
//! ## Privacy Notes
//!
//! - The accounting that consumes clean vote counts is calibrated to this
//!   distribution. Do not substitute Gaussian or uniform noise.
//! - Each class of each sample needs its own draw. Reusing a draw across
//!   classes or samples breaks the guarantee.
//!
//! ## References
//!
//! - Dwork, C., Roth, A. (2014). "The Algorithmic Foundations of
//!   Differential Privacy", Section 3.3: The Laplace Mechanism.
//! - Papernot, N. et al. (2017). "Semi-supervised Knowledge Transfer for
//!   Deep Learning from Private Training Data", ICLR.

use rand::distributions::{Distribution, Open01};
use rand::Rng;

use crate::error::Result;
use crate::scale::LaplaceScale;

/// Laplace distribution with location 0 and a validated scale.
///
/// # Example
///
/// ```rust
/// use pate_noise::Laplace;
/// use rand::distributions::Distribution;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let laplace = Laplace::new(1.0)?;
/// let mut rng = StdRng::seed_from_u64(7);
/// let noise: f64 = laplace.sample(&mut rng);
/// assert!(noise.is_finite());
/// # Ok::<(), pate_noise::NoiseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laplace {
    scale: LaplaceScale,
}

impl Laplace {
    /// Creates the distribution from a raw scale.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidScale`](crate::NoiseError::InvalidScale)
    /// for negative, NaN or infinite scales.
    pub fn new(scale: f64) -> Result<Self> {
        Ok(Self::with_scale(LaplaceScale::new(scale)?))
    }

    /// Creates the distribution from an already validated scale.
    #[must_use]
    pub const fn with_scale(scale: LaplaceScale) -> Self {
        Self { scale }
    }

    /// Returns the scale.
    #[must_use]
    pub const fn scale(&self) -> LaplaceScale {
        self.scale
    }

    /// Adds one independent sample to every element of `counts`.
    pub fn perturb<R: Rng + ?Sized>(&self, counts: &mut [f64], rng: &mut R) {
        for count in counts.iter_mut() {
            *count += self.sample(rng);
        }
    }
}

impl Distribution<f64> for Laplace {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = Open01.sample(rng);
        let b = self.scale.value();
        if u >= 0.5 {
            -b * (2.0 - 2.0 * u).ln()
        } else {
            b * (2.0 * u).ln()
        }
    }
}
