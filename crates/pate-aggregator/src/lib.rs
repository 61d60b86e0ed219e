//! # PATE Aggregator
//!
//! Consensus labelling for a teacher ensemble, with an optional
//! differentially private noisy-max mode.
//!
//! ## Overview
//!
//! Many teachers, each trained on a disjoint slice of private data, score
//! the same public samples. The aggregator turns their scores into one
//! label per sample. Two mutually exclusive modes exist:
//!
//! - **Most frequent**: the plurality label, deterministic.
//! - **Noisy max**: every class count is perturbed with independent
//!   Laplace noise before the plurality is taken. This is the mechanism
//!   whose privacy cost the accountant measures; the accountant consumes
//!   the clean counts, which can be returned alongside the labels.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  ScoreTensor   │──▶│   argmax     │──▶│ LabelMatrix  │
//! │  [T, N, C]     │   │ (low index)  │   │   [T, N]     │
//! └────────────────┘   └──────────────┘   └──────┬───────┘
//!                                                ▼
//!                                         ┌──────────────┐
//!                                         │ tally votes  │
//!                                         │   [N, C]     │
//!                                         └──────┬───────┘
//!                           ┌────────────────────┴────────────────┐
//!                           ▼                                     ▼
//!                   ┌──────────────┐                     ┌────────────────┐
//!                   │ most frequent│                     │ + Laplace(b)   │
//!                   │              │                     │ per class, per │
//!                   │              │                     │ sample; argmax │
//!                   └──────────────┘                     └────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pate_aggregator::{aggregate_deterministic, aggregate_noisy};
//! use pate_core::{AggregationConfig, ScoreTensor};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // 3 teachers, 1 sample, 3 classes
//! let scores = ScoreTensor::from_nested(vec![
//!     vec![vec![0.1, 0.7, 0.2]],
//!     vec![vec![0.2, 0.5, 0.3]],
//!     vec![vec![0.6, 0.3, 0.1]],
//! ])?;
//! let config = AggregationConfig::new().with_num_classes(3);
//!
//! assert_eq!(aggregate_deterministic(&scores, &config)?, vec![1]);
//!
//! let mut rng = StdRng::seed_from_u64(2017);
//! let outcome = aggregate_noisy(&scores, 20.0, &mut rng, &config, true)?;
//! assert_eq!(outcome.labels.len(), 1);
//! assert!(outcome.clean_votes.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Privacy Notes
//!
//! - One independent Laplace draw per class per sample; never shared
//! - The noise scale is validated before any randomness is consumed
//! - The generator is injected by the caller; there is no global source
//! - Noisy counts are never returned or logged
//!
//! ## References
//!
//! - Papernot, N., Abadi, M., Erlingsson, Ú., Goodfellow, I., Talwar, K.
//!   (2017). "Semi-supervised Knowledge Transfer for Deep Learning from
//!   Private Training Data", ICLR.
//! - Dwork, C., Roth, A. (2014). "The Algorithmic Foundations of
//!   Differential Privacy", Section 3.3.

mod aggregator;
mod error;
mod input;
mod noisy_max;
mod outcome;
mod plurality;

pub use aggregator::{aggregate_deterministic, aggregate_noisy, Aggregator};
pub use error::AggregationError;
pub use input::VoteInput;
pub use outcome::AggregationOutcome;

pub use pate_core::{extract_labels, AggregationConfig, LabelMatrix, ScoreTensor, VoteMatrix};

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregationError>;
