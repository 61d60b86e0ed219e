//! # PATE Core
//!
//! Data model for teacher-ensemble label aggregation: score tensors,
//! label extraction and vote tallying.
//!
//! ## Overview
//!
//! Many independently trained teacher models score the same samples.
//! Their per-class scores form a [`ScoreTensor`] indexed as
//! `[teacher, sample, class]`. Each teacher's vote for a sample is the
//! argmax of its class scores ([`extract_labels`]), giving a
//! [`LabelMatrix`]. Votes for a sample are tallied into a fixed-length
//! [`VoteCounts`] histogram, from which an aggregator picks the
//! consensus label.
//!
//! ```text
//! ScoreTensor [T, N, C] ──argmax──▶ LabelMatrix [T, N] ──tally──▶ VoteMatrix [N, C]
//! ```
//!
//! ## Contract
//!
//! | Rule | Enforced by |
//! |------|-------------|
//! | Score tensors have at least 2 axes, none empty | [`ScoreTensor::new`] |
//! | Ties in argmax go to the lowest class | [`argmax_first`] |
//! | Labels lie in `[0, num_classes)` | [`VoteCounts::tally`] |
//! | Bins never overflow silently | [`VoteCounts::tally`] |
//!
//! The class count is configuration ([`AggregationConfig::num_classes`],
//! default 10), not inferred from data.

mod config;
mod error;
mod labels;
mod tensor;
mod votes;

pub use config::{AggregationConfig, DEFAULT_NUM_CLASSES};
pub use error::{Result, TensorError};
pub use labels::{argmax_first, extract_labels, LabelArray, LabelMatrix};
pub use tensor::ScoreTensor;
pub use votes::{VoteCounts, VoteMatrix};
