//! User-facing dataset abstraction.
//!
//! This is the canonical entry point for training APIs: raw inputs plus
//! aligned targets, validated once at construction.

use crate::data::RowMatrix;

/// Dataset validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DatasetError {
    #[error("number of targets ({targets}) does not match number of rows ({rows})")]
    TargetLenMismatch { rows: usize, targets: usize },
}

/// Raw observations and their targets.
///
/// Inputs are row-major (one observation per contiguous row) and are only
/// ever read; the feature map derives the design matrix from them without
/// mutating the dataset.
///
/// # Example
///
/// ```
/// use basisfit::data::{Dataset, RowMatrix};
///
/// let inputs = RowMatrix::<f64>::from_vec(vec![0.0; 10], 2, 5);
/// let ds = Dataset::new(inputs, vec![1.0, 2.0]).unwrap();
/// assert_eq!(ds.n_rows(), 2);
/// assert_eq!(ds.input_dim(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    inputs: RowMatrix<f64>,
    targets: Vec<f64>,
}

impl Dataset {
    /// Create a dataset from an input matrix and a target vector.
    ///
    /// Row i of `inputs` and `targets[i]` describe the same observation.
    pub fn new(inputs: RowMatrix<f64>, targets: Vec<f64>) -> Result<Self, DatasetError> {
        if targets.len() != inputs.num_rows() {
            return Err(DatasetError::TargetLenMismatch {
                rows: inputs.num_rows(),
                targets: targets.len(),
            });
        }
        Ok(Self { inputs, targets })
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.inputs.num_rows()
    }

    /// Dimension of one raw input vector.
    pub fn input_dim(&self) -> usize {
        self.inputs.num_cols()
    }

    /// Raw inputs (n_rows x input_dim, row-major).
    pub fn inputs(&self) -> &RowMatrix<f64> {
        &self.inputs
    }

    /// Targets (length = n_rows).
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}
