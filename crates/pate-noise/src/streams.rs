//! Random sources for noise injection.
//!
//! The caller owns the random source and passes it in; nothing here
//! touches a global generator. [`NoiseStreams`] partitions that source
//! into one independent stream per sample so the per-sample work can run
//! in any order, on any thread, and still reproduce for a fixed seed.
//! [`CountingRng`] records how much entropy a call consumed.

use rand::rngs::StdRng;
use rand::{Error as RandError, RngCore, SeedableRng};

use crate::error::{NoiseError, Result};

/// One independently seeded generator per sample.
///
/// Seeds are drawn from the parent in sample order before any per-sample
/// work starts, so stream `i` depends only on the parent's state and `i`.
#[derive(Debug, Clone)]
pub struct NoiseStreams {
    streams: Vec<StdRng>,
}

impl NoiseStreams {
    /// Seeds `count` streams from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::Entropy`] if the parent cannot supply a seed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pate_noise::NoiseStreams;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let streams = NoiseStreams::fork(&mut rng, 3)?;
    /// assert_eq!(streams.len(), 3);
    /// # Ok::<(), pate_noise::NoiseError>(())
    /// ```
    pub fn fork<R: RngCore + ?Sized>(rng: &mut R, count: usize) -> Result<Self> {
        let streams = (0..count)
            .map(|_| StdRng::from_rng(&mut *rng).map_err(|e| NoiseError::Entropy(e.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { streams })
    }

    /// Number of streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Returns true if there are no streams.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Releases the streams, in sample order.
    #[must_use]
    pub fn into_vec(self) -> Vec<StdRng> {
        self.streams
    }
}

impl IntoIterator for NoiseStreams {
    type Item = StdRng;
    type IntoIter = std::vec::IntoIter<StdRng>;

    fn into_iter(self) -> Self::IntoIter {
        self.streams.into_iter()
    }
}

/// Wraps a generator and counts the draws made from it.
///
/// Every call to `next_u32`, `next_u64`, `fill_bytes` or `try_fill_bytes`
/// counts as one draw.
///
/// # Example
///
/// ```rust
/// use pate_noise::CountingRng;
/// use rand::rngs::StdRng;
/// use rand::{Rng, SeedableRng};
///
/// let mut rng = CountingRng::new(StdRng::seed_from_u64(0));
/// let _: u64 = rng.gen();
/// assert_eq!(rng.draws(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    inner: R,
    draws: u64,
}

impl<R: RngCore> CountingRng<R> {
    /// Wraps `inner` with a zeroed counter.
    pub fn new(inner: R) -> Self {
        Self { inner, draws: 0 }
    }

    /// Number of draws so far.
    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Unwraps the inner generator.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws += 1;
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), RandError> {
        self.draws += 1;
        self.inner.try_fill_bytes(dest)
    }
}
