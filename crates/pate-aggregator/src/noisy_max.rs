//! Noisy-max aggregation.
//!
//! Clean vote counts are perturbed with independent Laplace noise, one
//! draw per class per sample, and the label with the highest noisy count
//! wins (lowest index on ties).
//!
//! ## Randomness
//!
//! The caller's generator seeds one stream per sample, in sample order,
//! before any noise is drawn. Each sample then draws `num_classes`
//! values from its own stream. A fixed seed therefore gives the same
//! labels whether the batch runs sequentially or on the rayon pool.
//!
//! ## Privacy Notes
//!
//! - Noisy counts stay local to this module; they are neither returned
//!   nor logged
//! - Only the clean counts are exposed, for privacy accounting

use pate_core::{argmax_first, AggregationConfig, VoteCounts, VoteMatrix};
use pate_noise::{Laplace, NoiseStreams};
use rand::RngCore;
use rayon::prelude::*;

use crate::Result;

/// Picks each sample's noisy-max label.
pub(crate) fn winners<R: RngCore + ?Sized>(
    votes: &VoteMatrix,
    laplace: &Laplace,
    rng: &mut R,
    config: &AggregationConfig,
) -> Result<Vec<u32>> {
    let streams = NoiseStreams::fork(rng, votes.len())?.into_vec();

    let labels = if config.runs_parallel(votes.len()) {
        votes
            .as_slice()
            .par_iter()
            .zip(streams)
            .map(|(counts, mut stream)| noisy_winner(counts, laplace, &mut stream))
            .collect()
    } else {
        votes
            .iter()
            .zip(streams)
            .map(|(counts, mut stream)| noisy_winner(counts, laplace, &mut stream))
            .collect()
    };
    Ok(labels)
}

/// Draws exactly `counts.num_classes()` values from `stream`.
fn noisy_winner<R: RngCore + ?Sized>(
    counts: &VoteCounts,
    laplace: &Laplace,
    stream: &mut R,
) -> u32 {
    let mut noisy = counts.to_f64();
    laplace.perturb(&mut noisy, stream);
    // Bins are never empty after config validation.
    argmax_first(&noisy).unwrap_or(0) as u32
}
