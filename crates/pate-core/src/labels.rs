//! Label extraction: turns class scores into discrete teacher votes.
//!
//! The label for a row of class scores is the index of its maximum. When
//! several classes share the maximum, the lowest index wins. This policy
//! decides downstream vote counts, so it must never vary.

use serde::Serialize;

use crate::error::{Result, TensorError};
use crate::tensor::ScoreTensor;

/// Returns the index of the first maximum in `values`.
///
/// Later elements only replace the current best when strictly greater,
/// so ties resolve to the lowest index. Returns `None` for an empty slice.
///
/// # Example
///
/// ```rust
/// use pate_core::argmax_first;
///
/// assert_eq!(argmax_first(&[0.5, 0.5, 0.1]), Some(0));
/// assert_eq!(argmax_first(&[1u32, 3, 3]), Some(1));
/// assert_eq!(argmax_first::<f64>(&[]), None);
/// ```
pub fn argmax_first<T: PartialOrd>(values: &[T]) -> Option<usize> {
    let mut iter = values.iter().enumerate();
    let (mut best_index, mut best) = iter.next()?;
    for (index, value) in iter {
        if value > best {
            best_index = index;
            best = value;
        }
    }
    Some(best_index)
}

/// Labels with the class axis removed from a [`ScoreTensor`].
///
/// Shape is the score shape minus its last axis, so rank is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelArray {
    shape: Vec<usize>,
    data: Vec<u32>,
}

impl LabelArray {
    /// Returns the shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the labels in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Reshapes into a `[teacher, sample]` matrix.
    ///
    /// Axes after the second must all have extent 1.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidShape`] if there are fewer than two
    /// axes or a trailing axis is wider than 1.
    pub fn into_matrix(self) -> Result<LabelMatrix> {
        if self.shape.len() < 2 {
            return Err(TensorError::shape(
                &self.shape,
                "labels need [teacher, sample] axes; scores must be at least [T, N, C]",
            ));
        }
        if self.shape[2..].iter().any(|&extent| extent != 1) {
            return Err(TensorError::shape(
                &self.shape,
                "axes after [teacher, sample] must have extent 1",
            ));
        }
        Ok(LabelMatrix {
            teachers: self.shape[0],
            samples: self.shape[1],
            data: self.data,
        })
    }
}

/// Teacher votes indexed as `[teacher, sample]`.
///
/// Values are not range-checked here; the class count belongs to the
/// aggregation config and is enforced while tallying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMatrix {
    teachers: usize,
    samples: usize,
    data: Vec<u32>,
}

impl LabelMatrix {
    /// Creates a matrix from a row-major `[teacher, sample]` buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ElementCount`] if the buffer length is not
    /// `teachers * samples`.
    pub fn new(teachers: usize, samples: usize, data: Vec<u32>) -> Result<Self> {
        let expected = teachers
            .checked_mul(samples)
            .ok_or_else(|| TensorError::shape(&[teachers, samples], "element count overflows usize"))?;
        if expected != data.len() {
            return Err(TensorError::ElementCount {
                shape: vec![teachers, samples],
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            teachers,
            samples,
            data,
        })
    }

    /// Builds a matrix from one label vector per teacher.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::RaggedInput`] if teachers labelled
    /// different numbers of samples.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pate_core::LabelMatrix;
    ///
    /// let labels = LabelMatrix::from_nested(vec![vec![0, 5], vec![1, 5], vec![0, 5]])?;
    /// assert_eq!(labels.teachers(), 3);
    /// assert_eq!(labels.sample_votes(1).map(|votes| votes.collect::<Vec<_>>()), Some(vec![5, 5, 5]));
    /// # Ok::<(), pate_core::TensorError>(())
    /// ```
    pub fn from_nested(labels: Vec<Vec<u32>>) -> Result<Self> {
        let teachers = labels.len();
        let samples = labels.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(teachers * samples);
        for (t, row) in labels.into_iter().enumerate() {
            if row.len() != samples {
                return Err(TensorError::RaggedInput {
                    location: format!("teacher {t}"),
                    expected: samples,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Self::new(teachers, samples, data)
    }

    /// Number of teachers (rows).
    #[inline]
    #[must_use]
    pub fn teachers(&self) -> usize {
        self.teachers
    }

    /// Number of samples (columns).
    #[inline]
    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the label teacher `teacher` gave sample `sample`, or `None`
    /// if either index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, teacher: usize, sample: usize) -> Option<u32> {
        if teacher < self.teachers && sample < self.samples {
            self.data.get(teacher * self.samples + sample).copied()
        } else {
            None
        }
    }

    /// Iterates over every teacher's label for one sample, or returns
    /// `None` if `sample` is out of bounds.
    pub fn sample_votes(&self, sample: usize) -> Option<impl Iterator<Item = u32> + '_> {
        if sample >= self.samples {
            return None;
        }
        Some(
            self.data
                .iter()
                .skip(sample)
                .step_by(self.samples)
                .copied(),
        )
    }

    /// Returns the labels in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }
}

impl TryFrom<LabelArray> for LabelMatrix {
    type Error = TensorError;

    fn try_from(labels: LabelArray) -> Result<Self> {
        labels.into_matrix()
    }
}

/// Extracts the argmax label of every class row.
///
/// Output shape is the input shape without the class axis. Ties go to the
/// lowest class index. Infinite scores order normally.
///
/// # Errors
///
/// Returns [`TensorError::NonFiniteScore`] if any score is NaN, and
/// [`TensorError::InvalidConfig`] if the class axis is too wide for a
/// `u32` label.
///
/// # Example
///
/// ```rust
/// use pate_core::{extract_labels, ScoreTensor};
///
/// let scores = ScoreTensor::new(vec![2, 1, 3], vec![0.5, 0.5, 0.1, 0.0, 0.2, 0.9])?;
/// let labels = extract_labels(&scores)?;
/// assert_eq!(labels.shape(), &[2, 1]);
/// assert_eq!(labels.as_slice(), &[0, 2]);
/// # Ok::<(), pate_core::TensorError>(())
/// ```
pub fn extract_labels(scores: &ScoreTensor) -> Result<LabelArray> {
    if u32::try_from(scores.num_classes()).is_err() {
        return Err(TensorError::InvalidConfig(format!(
            "{} classes do not fit a u32 label",
            scores.num_classes()
        )));
    }
    if let Some(index) = scores.as_slice().iter().position(|score| score.is_nan()) {
        return Err(TensorError::NonFiniteScore { index });
    }

    let data = scores
        .class_rows()
        // Rows are never empty and the class count fits a u32.
        .map(|row| argmax_first(row).unwrap_or(0) as u32)
        .collect();

    let shape = scores.shape()[..scores.rank() - 1].to_vec();
    Ok(LabelArray { shape, data })
}
