//! Aggregator inputs: raw scores or already extracted labels.

use std::borrow::Cow;

use pate_core::{extract_labels, LabelMatrix, ScoreTensor};

use crate::Result;

/// What the ensemble produced for a batch of samples.
///
/// Scores are reduced to labels with [`extract_labels`] before tallying;
/// labels are used as given.
#[derive(Debug, Clone, Copy)]
pub enum VoteInput<'a> {
    /// Class scores shaped `[teacher, sample, class]`.
    Scores(&'a ScoreTensor),
    /// Teacher labels shaped `[teacher, sample]`.
    Labels(&'a LabelMatrix),
}

impl<'a> VoteInput<'a> {
    /// Resolves the input to a label matrix, extracting labels if needed.
    ///
    /// # Errors
    ///
    /// Fails if scores contain NaN or do not reshape to `[teacher, sample]`.
    pub fn resolve(self) -> Result<Cow<'a, LabelMatrix>> {
        match self {
            VoteInput::Scores(scores) => {
                let labels = extract_labels(scores)?.into_matrix()?;
                Ok(Cow::Owned(labels))
            }
            VoteInput::Labels(labels) => Ok(Cow::Borrowed(labels)),
        }
    }
}

impl<'a> From<&'a ScoreTensor> for VoteInput<'a> {
    fn from(scores: &'a ScoreTensor) -> Self {
        VoteInput::Scores(scores)
    }
}

impl<'a> From<&'a LabelMatrix> for VoteInput<'a> {
    fn from(labels: &'a LabelMatrix) -> Self {
        VoteInput::Labels(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AggregationError;
    use pate_core::TensorError;

    #[test]
    fn test_labels_are_borrowed() {
        let labels = LabelMatrix::from_nested(vec![vec![1, 2]]).unwrap();
        let resolved = VoteInput::from(&labels).resolve().unwrap();
        assert!(matches!(resolved, Cow::Borrowed(_)));
    }

    #[test]
    fn test_scores_are_extracted() {
        let scores = ScoreTensor::new(vec![2, 1, 2], vec![0.2, 0.8, 0.9, 0.1]).unwrap();
        let resolved = VoteInput::from(&scores).resolve().unwrap();
        assert_eq!(resolved.as_slice(), &[1, 0]);
    }

    #[test]
    fn test_rank_two_scores_rejected() {
        let scores = ScoreTensor::new(vec![2, 3], vec![0.0; 6]).unwrap();
        let err = VoteInput::from(&scores).resolve().unwrap_err();
        assert!(matches!(
            err,
            AggregationError::Tensor(TensorError::InvalidShape { .. })
        ));
    }
}
