//! Aggregation results.

use pate_core::{LabelMatrix, VoteMatrix};
use serde::Serialize;

/// Consensus labels plus, on request, the clean votes behind them.
///
/// `labels[i]` is the consensus label for sample `i`. The clean votes and
/// the teacher labels they were tallied from are what a privacy
/// accountant needs; they are only attached when asked for and are never
/// perturbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationOutcome {
    /// One consensus label per sample.
    pub labels: Vec<u32>,
    /// Clean (pre-noise) vote counts, shaped `[sample, class]`.
    pub clean_votes: Option<VoteMatrix>,
    /// The teacher labels that were tallied, shaped `[teacher, sample]`.
    pub teacher_labels: Option<LabelMatrix>,
}

impl AggregationOutcome {
    /// An outcome carrying labels only.
    #[must_use]
    pub fn labels_only(labels: Vec<u32>) -> Self {
        Self {
            labels,
            clean_votes: None,
            teacher_labels: None,
        }
    }

    /// An outcome carrying labels and the clean votes behind them.
    #[must_use]
    pub fn with_votes(labels: Vec<u32>, clean_votes: VoteMatrix, teacher_labels: LabelMatrix) -> Self {
        Self {
            labels,
            clean_votes: Some(clean_votes),
            teacher_labels: Some(teacher_labels),
        }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the call covered no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Drops the auxiliary data and returns the labels.
    #[must_use]
    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }
}
