//! Linear model data structure and prediction.

use crate::data::{ColMatrix, RowMatrix};
use crate::training::predict_into;

/// Linear model over design-matrix features.
///
/// Stores one coefficient per feature column. There is no separate bias
/// slot: feature maps that want an intercept emit a constant column, so the
/// bias rides along as an ordinary weight.
///
/// # Example
///
/// ```
/// use basisfit::model::LinearModel;
///
/// let model = LinearModel::new(vec![0.5, 0.3, 0.1]);
///
/// // 0.5·2 + 0.3·3 + 0.1·1
/// let y = model.predict_row(&[2.0, 3.0, 1.0]);
/// assert!((y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearModel {
    /// One coefficient per design-matrix column.
    weights: Box<[f64]>,
}

impl LinearModel {
    /// Create a linear model from fitted weights.
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights: weights.into_boxed_slice(),
        }
    }

    /// Create a zero-initialized linear model.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: vec![0.0; n_features].into_boxed_slice(),
        }
    }

    /// Number of feature columns this model was fitted over.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Raw access to the weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Predict for a single feature row.
    ///
    /// The row must already be in feature space (one value per weight).
    #[inline]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(
            features.len(),
            self.weights.len(),
            "Feature count {} does not match weight count {}",
            features.len(),
            self.weights.len()
        );

        self.weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum()
    }

    /// Predict for a batch of feature rows.
    ///
    /// # Panics
    ///
    /// Panics if `data.num_cols() != self.n_features()`.
    pub fn predict(&self, data: &RowMatrix<f64>) -> Vec<f64> {
        assert_eq!(
            data.num_cols(),
            self.n_features(),
            "Design width {} does not match weight count {}",
            data.num_cols(),
            self.n_features()
        );

        (0..data.num_rows())
            .map(|row| self.predict_row(data.row_slice(row)))
            .collect()
    }

    /// Predict into a pre-allocated buffer from a column-major design matrix.
    ///
    /// This is the layout the trainer uses; columns are accumulated in
    /// order, so results match [`Self::predict`] bitwise.
    pub fn predict_design_into(&self, design: &ColMatrix<f64>, out: &mut [f64]) {
        predict_into(design, &self.weights, out);
    }

    /// Predict from a column-major design matrix.
    pub fn predict_design(&self, design: &ColMatrix<f64>) -> Vec<f64> {
        let mut out = vec![0.0; design.num_rows()];
        self.predict_design_into(design, &mut out);
        out
    }
}
