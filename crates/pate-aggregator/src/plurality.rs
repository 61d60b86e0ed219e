//! Deterministic plurality ("most frequent") aggregation.
//!
//! Each sample's label is the class with the most teacher votes. Ties go
//! to the lowest class index. No randomness is involved, so identical
//! input always yields identical output.

use pate_core::{AggregationConfig, LabelMatrix, VoteCounts, VoteMatrix};
use rayon::prelude::*;

use crate::Result;

/// Tallies every sample's votes, in parallel for large batches.
///
/// When parallel, which failing sample is reported is unspecified; the
/// call fails either way.
pub(crate) fn tally(labels: &LabelMatrix, config: &AggregationConfig) -> Result<VoteMatrix> {
    let num_classes = config.num_classes;
    let tally_sample = |sample: usize| VoteCounts::for_sample(labels, sample, num_classes);

    let counts = if config.runs_parallel(labels.samples()) {
        (0..labels.samples())
            .into_par_iter()
            .map(tally_sample)
            .collect::<pate_core::Result<Vec<_>>>()?
    } else {
        (0..labels.samples())
            .map(tally_sample)
            .collect::<pate_core::Result<Vec<_>>>()?
    };

    Ok(VoteMatrix::from_counts(num_classes, counts))
}
