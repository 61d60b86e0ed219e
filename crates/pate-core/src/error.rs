//! Error types for tensor handling and vote tallying.
//!
//! Every variant is an input-contract violation detected at function
//! entry or while tallying. Nothing is clamped, wrapped or recovered.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, TensorError>;

/// Errors raised by score tensors, label arrays and vote counts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorError {
    /// The shape does not describe a usable array.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        /// The offending shape.
        shape: Vec<usize>,
        /// Why it was rejected.
        reason: String,
    },

    /// The flat buffer length disagrees with the shape.
    #[error("shape {shape:?} needs {expected} elements, got {actual}")]
    ElementCount {
        /// Declared shape.
        shape: Vec<usize>,
        /// Product of the shape's extents.
        expected: usize,
        /// Length of the buffer supplied.
        actual: usize,
    },

    /// Nested input rows have differing lengths.
    #[error("ragged input at {location}: expected length {expected}, got {actual}")]
    RaggedInput {
        /// Human-readable position of the short or long row.
        location: String,
        /// Length of the first row at this depth.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// A score was NaN, so no maximum is defined for its row.
    #[error("score at flat index {index} is NaN")]
    NonFiniteScore {
        /// Flat row-major index of the NaN.
        index: usize,
    },

    /// A label does not name one of the configured classes.
    #[error("label {label} from teacher {teacher} on sample {sample} is outside [0, {num_classes})")]
    LabelOutOfRange {
        /// The label value.
        label: u32,
        /// Configured number of classes.
        num_classes: usize,
        /// Teacher index.
        teacher: usize,
        /// Sample index.
        sample: usize,
    },

    /// A sample index is past the end of the label matrix.
    #[error("sample {sample} is out of range for {samples} samples")]
    SampleOutOfRange {
        /// The requested sample.
        sample: usize,
        /// Number of samples in the matrix.
        samples: usize,
    },

    /// A class count would exceed `u32::MAX`.
    #[error("vote count for class {class} overflowed")]
    CountOverflow {
        /// The class whose bin overflowed.
        class: usize,
    },

    /// Configuration values are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TensorError {
    pub(crate) fn shape(shape: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_out_of_range_display() {
        let err = TensorError::LabelOutOfRange {
            label: 12,
            num_classes: 10,
            teacher: 3,
            sample: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("[0, 10)"));
        assert!(msg.contains("teacher 3"));
    }

    #[test]
    fn test_sample_out_of_range_display() {
        let err = TensorError::SampleOutOfRange { sample: 4, samples: 3 };
        assert_eq!(err.to_string(), "sample 4 is out of range for 3 samples");
    }

    #[test]
    fn test_element_count_display() {
        let err = TensorError::ElementCount {
            shape: vec![2, 3, 10],
            expected: 60,
            actual: 59,
        };
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("59"));
    }

    #[test]
    fn test_count_overflow_display() {
        let err = TensorError::CountOverflow { class: 4 };
        assert!(err.to_string().contains("class 4"));
    }
}
