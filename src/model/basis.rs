//! End-to-end model: a feature map plus fitted linear weights.

use std::path::Path;

use crate::data::{ColMatrix, Dataset, RowMatrix};
use crate::features::FeatureMap;
use crate::io::{self, WeightsIoError};
use crate::training::{Metric, MomentumParams, MomentumTrainer};
use crate::utils::{run_with_threads, Parallelism};

use super::linear::LinearModel;

// =============================================================================
// Errors
// =============================================================================

/// Dimension errors raised when assembling a model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FitError {
    #[error("dataset input dimension ({dataset}) does not match feature map input dimension ({map})")]
    InputDimMismatch { dataset: usize, map: usize },

    #[error("weight count ({weights}) does not match feature map output dimension ({outputs})")]
    WeightLenMismatch { weights: usize, outputs: usize },
}

/// Errors raised when loading a model from a weights file.
#[derive(Debug, thiserror::Error)]
pub enum ModelIoError {
    #[error("weights file error: {0}")]
    Weights(#[from] WeightsIoError),

    #[error("model assembly error: {0}")]
    Fit(#[from] FitError),
}

// =============================================================================
// BasisModel
// =============================================================================

/// A feature map paired with linear weights fitted over its output.
///
/// This is the type most callers want: it accepts raw inputs, runs them
/// through the basis expansion, and applies the linear model, so feature
/// space never leaks into calling code.
///
/// # Example
///
/// ```
/// use basisfit::data::{Dataset, RowMatrix};
/// use basisfit::features::FeatureMap;
/// use basisfit::model::BasisModel;
/// use basisfit::training::{MomentumParams, Rmse, Verbosity};
///
/// let inputs = RowMatrix::from_vec(vec![0.0; 15], 3, 5);
/// let dataset = Dataset::new(inputs, vec![1.0, 1.0, 1.0]).unwrap();
///
/// let params = MomentumParams {
///     verbosity: Verbosity::Silent,
///     ..Default::default()
/// };
/// let model = BasisModel::fit(&dataset, FeatureMap::reference(), params).unwrap();
///
/// let rmse = model.evaluate(&dataset, &Rmse);
/// assert!(rmse < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct BasisModel {
    map: FeatureMap,
    model: LinearModel,
}

impl BasisModel {
    /// Fit a model to a dataset by momentum gradient descent.
    ///
    /// Builds the design matrix with the given map, trains linear weights
    /// over it, and wraps both. `params.n_threads` governs both the design
    /// matrix build and the gradient computation.
    pub fn fit(
        dataset: &Dataset,
        map: FeatureMap,
        params: MomentumParams,
    ) -> Result<Self, FitError> {
        if dataset.input_dim() != map.input_dim() {
            return Err(FitError::InputDimMismatch {
                dataset: dataset.input_dim(),
                map: map.input_dim(),
            });
        }

        let design_rows = run_with_threads(params.n_threads, |parallelism| {
            map.design_matrix(dataset.inputs(), parallelism)
        });
        let design: ColMatrix<f64> = design_rows.to_layout();

        let model = MomentumTrainer::new(params).train(&design, dataset.targets());
        Ok(Self { map, model })
    }

    /// Reassemble a model from a map and previously fitted weights.
    pub fn from_parts(map: FeatureMap, weights: Vec<f64>) -> Result<Self, FitError> {
        if weights.len() != map.output_dim() {
            return Err(FitError::WeightLenMismatch {
                weights: weights.len(),
                outputs: map.output_dim(),
            });
        }

        Ok(Self {
            map,
            model: LinearModel::new(weights),
        })
    }

    /// The feature map this model was fitted with.
    #[inline]
    pub fn map(&self) -> &FeatureMap {
        &self.map
    }

    /// The fitted weights, one per feature-map term.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        self.model.weights()
    }

    /// The underlying linear model.
    #[inline]
    pub fn linear(&self) -> &LinearModel {
        &self.model
    }

    /// Predict for a single raw input row.
    pub fn predict_row(&self, input: &[f64]) -> f64 {
        let features = self.map.transform(input);
        self.model.predict_row(&features)
    }

    /// Predict for a batch of raw input rows.
    pub fn predict(&self, inputs: &RowMatrix<f64>) -> Vec<f64> {
        let design = self.map.design_matrix(inputs, Parallelism::Sequential);
        self.model.predict(&design)
    }

    /// Score this model on a dataset with the given metric.
    pub fn evaluate(&self, dataset: &Dataset, metric: &impl Metric) -> f64 {
        let predictions = self.predict(dataset.inputs());
        metric.evaluate(&predictions, dataset.targets())
    }

    /// Write the fitted weights to a text file, one per line.
    pub fn save_weights(&self, path: impl AsRef<Path>) -> Result<(), WeightsIoError> {
        io::write_weights(path, self.model.weights())
    }

    /// Load weights from a text file and pair them with a feature map.
    pub fn load_weights(map: FeatureMap, path: impl AsRef<Path>) -> Result<Self, ModelIoError> {
        let weights = io::read_weights(path)?;
        Ok(Self::from_parts(map, weights)?)
    }
}

// =============================================================================
// Tests
// =============================================================================
