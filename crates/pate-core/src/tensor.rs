//! Score tensors produced by the teacher ensemble.
//!
//! A [`ScoreTensor`] is a row-major `f32` buffer with an explicit shape.
//! The last axis always holds per-class scores (logits or probabilities;
//! only their ordering matters). For the aggregators the leading axes are
//! `[teacher, sample]`.

use crate::error::{Result, TensorError};

/// Class scores indexed as `[teacher, sample, ..., class]`.
///
/// # Invariants
///
/// - Rank is at least 2.
/// - The class axis has extent of at least 1. Leading axes may be
///   empty; a `[T, 0, C]` batch has no rows.
/// - `data.len()` equals the product of the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl ScoreTensor {
    /// Creates a tensor from a shape and a row-major buffer.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidShape`] if the rank is below 2 or the class axis is empty
    /// - [`TensorError::ElementCount`] if the buffer length does not match
    ///
    /// # Example
    ///
    /// ```rust
    /// use pate_core::ScoreTensor;
    ///
    /// // 1 teacher, 2 samples, 3 classes
    /// let scores = ScoreTensor::new(vec![1, 2, 3], vec![0.1, 0.7, 0.2, 0.5, 0.4, 0.1])?;
    /// assert_eq!(scores.num_classes(), 3);
    /// # Ok::<(), pate_core::TensorError>(())
    /// ```
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        if shape.len() < 2 {
            return Err(TensorError::shape(
                &shape,
                "score tensors need at least 2 axes",
            ));
        }
        if shape[shape.len() - 1] == 0 {
            return Err(TensorError::shape(&shape, "class axis is empty"));
        }

        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
            .ok_or_else(|| TensorError::shape(&shape, "element count overflows usize"))?;
        if expected != data.len() {
            return Err(TensorError::ElementCount {
                shape,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self { shape, data })
    }

    /// Builds a `[teacher, sample, class]` tensor from nested vectors.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::RaggedInput`] if rows differ in length, or
    /// [`TensorError::InvalidShape`] if the class count cannot be taken
    /// from the first row (no teachers, samples or classes).
    pub fn from_nested(scores: Vec<Vec<Vec<f32>>>) -> Result<Self> {
        let teachers = scores.len();
        let samples = scores.first().map_or(0, Vec::len);
        let classes = scores
            .first()
            .and_then(|per_teacher| per_teacher.first())
            .map_or(0, Vec::len);

        let mut data = Vec::with_capacity(teachers * samples * classes);
        for (t, per_teacher) in scores.into_iter().enumerate() {
            if per_teacher.len() != samples {
                return Err(TensorError::RaggedInput {
                    location: format!("teacher {t}"),
                    expected: samples,
                    actual: per_teacher.len(),
                });
            }
            for (s, row) in per_teacher.into_iter().enumerate() {
                if row.len() != classes {
                    return Err(TensorError::RaggedInput {
                        location: format!("teacher {t}, sample {s}"),
                        expected: classes,
                        actual: row.len(),
                    });
                }
                data.extend(row);
            }
        }

        Self::new(vec![teachers, samples, classes], data)
    }

    /// Returns the shape.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of axes.
    #[inline]
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the extent of the class axis (the last one).
    #[inline]
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.shape[self.shape.len() - 1]
    }

    /// Returns the row-major buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Iterates over class-score rows in row-major order.
    pub fn class_rows(&self) -> std::slice::Chunks<'_, f32> {
        self.data.chunks(self.num_classes())
    }
}
