//! Vote tallying.
//!
//! A [`VoteCounts`] is the per-sample histogram of teacher labels, always
//! exactly `num_classes` bins long. A label outside `[0, num_classes)` is
//! a contract violation and fails the tally; it is never dropped, clamped
//! or wrapped into another bin.

use serde::Serialize;

use crate::error::{Result, TensorError};
use crate::labels::{argmax_first, LabelMatrix};

/// Clean vote counts for a single sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VoteCounts(Vec<u32>);

impl VoteCounts {
    /// Tallies one sample's votes into `num_classes` bins.
    ///
    /// `sample` only labels errors.
    ///
    /// # Errors
    ///
    /// - [`TensorError::LabelOutOfRange`] if a vote is `>= num_classes`
    /// - [`TensorError::CountOverflow`] if a bin would exceed `u32::MAX`
    ///
    /// # Example
    ///
    /// ```rust
    /// use pate_core::VoteCounts;
    ///
    /// let counts = VoteCounts::tally([0, 0, 0, 1, 2], 10, 0)?;
    /// assert_eq!(counts.as_slice(), &[3, 1, 1, 0, 0, 0, 0, 0, 0, 0]);
    /// assert_eq!(counts.winner(), 0);
    /// # Ok::<(), pate_core::TensorError>(())
    /// ```
    pub fn tally(
        votes: impl IntoIterator<Item = u32>,
        num_classes: usize,
        sample: usize,
    ) -> Result<Self> {
        let mut bins = vec![0u32; num_classes];
        for (teacher, label) in votes.into_iter().enumerate() {
            let class = label as usize;
            let bin = bins.get_mut(class).ok_or(TensorError::LabelOutOfRange {
                label,
                num_classes,
                teacher,
                sample,
            })?;
            *bin = bin
                .checked_add(1)
                .ok_or(TensorError::CountOverflow { class })?;
        }
        Ok(Self(bins))
    }

    /// Tallies the votes every teacher in `labels` cast for `sample`.
    ///
    /// # Errors
    ///
    /// - [`TensorError::SampleOutOfRange`] if `sample` is past the last sample
    /// - the errors of [`tally`](Self::tally)
    pub fn for_sample(labels: &LabelMatrix, sample: usize, num_classes: usize) -> Result<Self> {
        let votes = labels
            .sample_votes(sample)
            .ok_or(TensorError::SampleOutOfRange {
                sample,
                samples: labels.samples(),
            })?;
        Self::tally(votes, num_classes, sample)
    }

    /// Number of bins (the configured class count).
    #[inline]
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.0.len()
    }

    /// Total number of votes cast.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&count| u64::from(count)).sum()
    }

    /// Returns the count for `class`, or 0 if it is out of range.
    #[must_use]
    pub fn get(&self, class: usize) -> u32 {
        self.0.get(class).copied().unwrap_or(0)
    }

    /// Plurality class; ties go to the lowest class index.
    ///
    /// A tally with no votes picks class 0.
    #[must_use]
    pub fn winner(&self) -> u32 {
        argmax_first(&self.0).unwrap_or(0) as u32
    }

    /// Counts as floating point, ready for noise injection.
    #[must_use]
    pub fn to_f64(&self) -> Vec<f64> {
        self.0.iter().map(|&count| f64::from(count)).collect()
    }

    /// Returns the bins.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Clean vote counts for every sample of a call, shaped `[sample, class]`.
///
/// This is the artefact handed to privacy accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteMatrix {
    num_classes: usize,
    samples: Vec<VoteCounts>,
}

impl VoteMatrix {
    /// Tallies every sample of `labels`.
    ///
    /// # Errors
    ///
    /// Propagates the first tally error, scanning samples in order.
    pub fn tally(labels: &LabelMatrix, num_classes: usize) -> Result<Self> {
        let samples = (0..labels.samples())
            .map(|sample| VoteCounts::for_sample(labels, sample, num_classes))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_counts(num_classes, samples))
    }

    /// Assembles a matrix from already tallied samples.
    #[must_use]
    pub fn from_counts(num_classes: usize, samples: Vec<VoteCounts>) -> Self {
        debug_assert!(samples.iter().all(|c| c.num_classes() == num_classes));
        Self {
            num_classes,
            samples,
        }
    }

    /// Number of classes per sample.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples were tallied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the counts for one sample.
    #[must_use]
    pub fn sample(&self, sample: usize) -> Option<&VoteCounts> {
        self.samples.get(sample)
    }

    /// Returns the per-sample counts in sample order.
    #[must_use]
    pub fn as_slice(&self) -> &[VoteCounts] {
        &self.samples
    }

    /// Iterates over per-sample counts.
    pub fn iter(&self) -> std::slice::Iter<'_, VoteCounts> {
        self.samples.iter()
    }

    /// Plurality winner of every sample.
    #[must_use]
    pub fn winners(&self) -> Vec<u32> {
        self.samples.iter().map(VoteCounts::winner).collect()
    }
}

impl<'a> IntoIterator for &'a VoteMatrix {
    type Item = &'a VoteCounts;
    type IntoIter = std::slice::Iter<'a, VoteCounts>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
