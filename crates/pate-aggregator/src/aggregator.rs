//! The aggregation facade.
//!
//! [`Aggregator`] owns the configuration and routes a batch through label
//! extraction, tallying and either plurality or noisy-max selection. The
//! free functions [`aggregate_deterministic`] and [`aggregate_noisy`] are
//! one-shot wrappers around it.

use std::borrow::Cow;

use pate_core::{AggregationConfig, LabelArray, LabelMatrix, ScoreTensor, VoteMatrix};
use pate_noise::{Laplace, LaplaceScale};
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::AggregationError;
use crate::input::VoteInput;
use crate::outcome::AggregationOutcome;
use crate::{noisy_max, plurality, Result};

/// Stateless label aggregator for a teacher ensemble.
///
/// Holds only configuration; every call is independent and shares no
/// mutable state with other calls. Randomness comes exclusively from the
/// generator passed to the noisy methods.
///
/// # Example
///
/// ```rust
/// use pate_aggregator::Aggregator;
/// use pate_core::{AggregationConfig, LabelMatrix};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let aggregator = Aggregator::new(AggregationConfig::default())?;
/// let labels = LabelMatrix::from_nested(vec![vec![0, 5], vec![0, 5], vec![1, 5]])?;
///
/// assert_eq!(aggregator.most_frequent(&labels)?, vec![0, 5]);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let noisy = aggregator.noisy_max(&labels, 0.0, &mut rng)?;
/// assert_eq!(noisy, vec![0, 5]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    /// Creates an aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid (zero classes).
    pub fn new(config: AggregationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Extracts argmax labels from class scores.
    ///
    /// # Errors
    ///
    /// Fails if any score is NaN.
    pub fn extract_labels(&self, scores: &ScoreTensor) -> Result<LabelArray> {
        Ok(pate_core::extract_labels(scores)?)
    }

    /// Deterministic plurality label for every sample.
    ///
    /// # Errors
    ///
    /// Fails on shape violations, labels outside `[0, num_classes)`, count
    /// overflow, or an ensemble with no teachers.
    pub fn most_frequent<'a>(&self, input: impl Into<VoteInput<'a>>) -> Result<Vec<u32>> {
        let (_, votes) = self.tally(input.into())?;
        Ok(votes.winners())
    }

    /// Like [`most_frequent`](Self::most_frequent), also returning the
    /// clean votes and teacher labels.
    ///
    /// # Errors
    ///
    /// Same as [`most_frequent`](Self::most_frequent).
    pub fn most_frequent_with_votes<'a>(
        &self,
        input: impl Into<VoteInput<'a>>,
    ) -> Result<AggregationOutcome> {
        let (labels, votes) = self.tally(input.into())?;
        let winners = votes.winners();
        Ok(AggregationOutcome::with_votes(winners, votes, labels.into_owned()))
    }

    /// Noisy-max label for every sample.
    ///
    /// Adds independent Laplace noise of scale `lap_scale` to each class
    /// count of each sample and picks the highest noisy count.
    ///
    /// # Errors
    ///
    /// Fails with a parameter error before drawing any randomness if
    /// `lap_scale` is negative, NaN or infinite, and with the same
    /// contract errors as [`most_frequent`](Self::most_frequent).
    pub fn noisy_max<'a, R: RngCore + ?Sized>(
        &self,
        input: impl Into<VoteInput<'a>>,
        lap_scale: f64,
        rng: &mut R,
    ) -> Result<Vec<u32>> {
        self.noisy(input.into(), lap_scale, rng, false)
            .map(AggregationOutcome::into_labels)
    }

    /// Like [`noisy_max`](Self::noisy_max), also returning the clean
    /// (pre-noise) votes and teacher labels for privacy accounting.
    ///
    /// # Errors
    ///
    /// Same as [`noisy_max`](Self::noisy_max).
    pub fn noisy_max_with_votes<'a, R: RngCore + ?Sized>(
        &self,
        input: impl Into<VoteInput<'a>>,
        lap_scale: f64,
        rng: &mut R,
    ) -> Result<AggregationOutcome> {
        self.noisy(input.into(), lap_scale, rng, true)
    }

    fn noisy<R: RngCore + ?Sized>(
        &self,
        input: VoteInput<'_>,
        lap_scale: f64,
        rng: &mut R,
        return_counts: bool,
    ) -> Result<AggregationOutcome> {
        let scale = LaplaceScale::new(lap_scale).map_err(|e| {
            warn!("Rejected Laplace scale {}", lap_scale);
            AggregationError::from(e)
        })?;
        let laplace = Laplace::with_scale(scale);

        let (labels, votes) = self.tally(input)?;
        debug!(
            "Noisy max over {} samples from {} teachers ({})",
            labels.samples(),
            labels.teachers(),
            scale
        );

        let winners = noisy_max::winners(&votes, &laplace, rng, &self.config)?;
        if return_counts {
            Ok(AggregationOutcome::with_votes(winners, votes, labels.into_owned()))
        } else {
            Ok(AggregationOutcome::labels_only(winners))
        }
    }

    fn tally<'a>(&self, input: VoteInput<'a>) -> Result<(Cow<'a, LabelMatrix>, VoteMatrix)> {
        let labels = input.resolve()?;
        if labels.teachers() == 0 {
            warn!("Rejected ensemble with no teachers");
            return Err(AggregationError::EmptyEnsemble {
                samples: labels.samples(),
            });
        }

        debug!(
            "Tallying {} samples from {} teachers into {} classes",
            labels.samples(),
            labels.teachers(),
            self.config.num_classes
        );
        let votes = plurality::tally(&labels, &self.config).map_err(|e| {
            warn!("Vote tally failed: {}", e);
            e
        })?;
        Ok((labels, votes))
    }
}

/// Most-frequent label per sample.
///
/// One-shot form of [`Aggregator::most_frequent`].
///
/// # Errors
///
/// See [`Aggregator::most_frequent`].
pub fn aggregate_deterministic<'a>(
    input: impl Into<VoteInput<'a>>,
    config: &AggregationConfig,
) -> Result<Vec<u32>> {
    Aggregator::new(*config)?.most_frequent(input)
}

/// Noisy-max label per sample, optionally with the clean votes.
///
/// One-shot form of [`Aggregator::noisy_max`] and
/// [`Aggregator::noisy_max_with_votes`]; `return_counts` selects between
/// them. The labels are the same either way for the same generator state.
///
/// # Errors
///
/// See [`Aggregator::noisy_max`].
///
/// # Example
///
/// ```rust
/// use pate_aggregator::aggregate_noisy;
/// use pate_core::{AggregationConfig, LabelMatrix};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let labels = LabelMatrix::from_nested(vec![vec![3], vec![3], vec![3], vec![1]])?;
/// let mut rng = StdRng::seed_from_u64(0);
///
/// let outcome = aggregate_noisy(&labels, 0.5, &mut rng, &AggregationConfig::default(), true)?;
/// assert_eq!(outcome.labels.len(), 1);
/// assert_eq!(outcome.clean_votes.unwrap().sample(0).unwrap().get(3), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate_noisy<'a, R: RngCore + ?Sized>(
    input: impl Into<VoteInput<'a>>,
    lap_scale: f64,
    rng: &mut R,
    config: &AggregationConfig,
    return_counts: bool,
) -> Result<AggregationOutcome> {
    Aggregator::new(*config)?.noisy(input.into(), lap_scale, rng, return_counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pate_noise::CountingRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario() -> LabelMatrix {
        // Per-sample votes: [0,0,0,1,2], [5,5,5,5,5], [0,1,2,3,4]
        LabelMatrix::from_nested(vec![
            vec![0, 5, 0],
            vec![0, 5, 1],
            vec![0, 5, 2],
            vec![1, 5, 3],
            vec![2, 5, 4],
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = Aggregator::new(AggregationConfig::new().with_num_classes(0)).unwrap_err();
        assert!(err.is_contract_error());
    }

    #[test]
    fn test_most_frequent_scenario() {
        let aggregator = Aggregator::default();
        assert_eq!(aggregator.most_frequent(&scenario()).unwrap(), vec![0, 5, 0]);
    }

    #[test]
    fn test_most_frequent_with_votes() {
        let outcome = Aggregator::default()
            .most_frequent_with_votes(&scenario())
            .unwrap();
        assert_eq!(outcome.labels, vec![0, 5, 0]);
        let votes = outcome.clean_votes.unwrap();
        assert_eq!(votes.sample(1).unwrap().get(5), 5);
        assert_eq!(outcome.teacher_labels.unwrap(), scenario());
    }

    #[test]
    fn test_noisy_max_labels_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let labels = Aggregator::default()
            .noisy_max(&scenario(), 1.0, &mut rng)
            .unwrap();
        assert_eq!(labels.len(), 3);
        assert!(labels.iter().all(|&l| l < 10));
    }

    #[test]
    fn test_return_counts_does_not_change_labels() {
        let config = AggregationConfig::default();
        let plain = aggregate_noisy(&scenario(), 3.0, &mut StdRng::seed_from_u64(2), &config, false).unwrap();
        let full = aggregate_noisy(&scenario(), 3.0, &mut StdRng::seed_from_u64(2), &config, true).unwrap();
        assert_eq!(plain.labels, full.labels);
        assert!(plain.clean_votes.is_none());
        assert!(plain.teacher_labels.is_none());
        assert_eq!(full.clean_votes.unwrap().winners(), vec![0, 5, 0]);
    }

    #[test]
    fn test_invalid_scale_draws_nothing() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut rng = CountingRng::new(StdRng::seed_from_u64(3));
            let err = Aggregator::default()
                .noisy_max(&scenario(), bad, &mut rng)
                .unwrap_err();
            assert!(err.is_parameter_error());
            assert_eq!(rng.draws(), 0);
        }
    }

    #[test]
    fn test_contract_error_draws_nothing() {
        let labels = LabelMatrix::from_nested(vec![vec![0, 10]]).unwrap();
        let mut rng = CountingRng::new(StdRng::seed_from_u64(4));
        let err = Aggregator::default()
            .noisy_max(&labels, 1.0, &mut rng)
            .unwrap_err();
        assert!(err.is_contract_error());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        let labels = LabelMatrix::new(0, 0, vec![]).unwrap();
        let err = Aggregator::default().most_frequent(&labels).unwrap_err();
        assert_eq!(err, AggregationError::EmptyEnsemble { samples: 0 });
    }

    #[test]
    fn test_zero_samples_is_empty_result() {
        let labels = LabelMatrix::new(3, 0, vec![]).unwrap();
        let mut rng = CountingRng::new(StdRng::seed_from_u64(5));
        assert!(Aggregator::default().most_frequent(&labels).unwrap().is_empty());
        assert!(Aggregator::default()
            .noisy_max(&labels, 1.0, &mut rng)
            .unwrap()
            .is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_zero_sample_scores_match_labels() {
        let scores = ScoreTensor::new(vec![3, 0, 10], vec![]).unwrap();
        let labels = LabelMatrix::new(3, 0, vec![]).unwrap();
        let aggregator = Aggregator::default();
        assert_eq!(
            aggregator.most_frequent(&scores).unwrap(),
            aggregator.most_frequent(&labels).unwrap()
        );

        let mut rng = CountingRng::new(StdRng::seed_from_u64(6));
        assert!(aggregator.noisy_max(&scores, 1.0, &mut rng).unwrap().is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_custom_class_count() {
        let labels = LabelMatrix::from_nested(vec![vec![42], vec![42], vec![7]]).unwrap();
        let config = AggregationConfig::new().with_num_classes(100);
        assert_eq!(aggregate_deterministic(&labels, &config).unwrap(), vec![42]);
        assert!(aggregate_deterministic(&labels, &AggregationConfig::default()).is_err());
    }

    #[test]
    fn test_extract_labels_passthrough() {
        let scores = ScoreTensor::new(vec![1, 1, 3], vec![0.2, 0.2, 0.6]).unwrap();
        let labels = Aggregator::default().extract_labels(&scores).unwrap();
        assert_eq!(labels.as_slice(), &[2]);
    }
}
