//! Momentum gradient descent trainer for linear least squares.
//!
//! The trainer owns the fixed-horizon optimization loop: it repeatedly
//! predicts with the current weights, forms the mean-squared-error
//! gradient, and advances a [`MomentumState`]. There is no early stopping
//! and no convergence check: the loop always runs for exactly `n_rounds`
//! rounds, and degenerate systems surface as non-finite weights rather
//! than errors.
//!
//! # Example
//!
//! ```
//! use basisfit::data::{ColMatrix, RowMatrix};
//! use basisfit::training::{MomentumParams, MomentumTrainer, Verbosity};
//!
//! let design: ColMatrix<f64> =
//!     RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).to_layout();
//! let targets = vec![1.0, 1.0];
//!
//! let params = MomentumParams {
//!     n_rounds: 10,
//!     verbosity: Verbosity::Silent,
//!     ..Default::default()
//! };
//! let model = MomentumTrainer::new(params).train(&design, &targets);
//! assert_eq!(model.n_features(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::data::ColMatrix;
use crate::model::LinearModel;
use crate::utils::run_with_threads;

use super::logger::{TrainingLogger, Verbosity};
use super::metric::{Metric, Rmse};
use super::optimizer::{gradient_into, predict_into, MomentumState};

// =============================================================================
// MomentumParams
// =============================================================================

/// Parameters for the momentum trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumParams {
    /// Step size applied to the gradient.
    pub learning_rate: f64,
    /// Weight on the previous update direction.
    pub momentum: f64,
    /// Number of optimization rounds. The loop always runs to this horizon.
    pub n_rounds: usize,
    /// Verbosity level for training output.
    pub verbosity: Verbosity,
    /// Number of threads for gradient computation.
    /// `0` uses all available cores, `1` forces sequential execution.
    pub n_threads: usize,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            momentum: 0.9,
            n_rounds: 100,
            verbosity: Verbosity::Info,
            n_threads: 0,
        }
    }
}

// =============================================================================
// MomentumTrainer
// =============================================================================

/// Momentum gradient descent trainer for linear models.
///
/// Coordinates the full optimization loop:
/// 1. Predict with the current weights
/// 2. Form the residual ŷ − y and the mean-squared-error gradient
/// 3. Advance the momentum state
///
/// Per-round quality is reporting only; no round's result feeds back into
/// the loop.
pub struct MomentumTrainer {
    /// Training parameters
    params: MomentumParams,
    /// Training logger
    logger: TrainingLogger,
}

impl MomentumTrainer {
    /// Create a new trainer.
    pub fn new(params: MomentumParams) -> Self {
        let logger = TrainingLogger::new(params.verbosity);
        Self { params, logger }
    }

    /// Parameters this trainer was configured with.
    pub fn params(&self) -> &MomentumParams {
        &self.params
    }

    /// Fit linear weights to a column-major design matrix.
    ///
    /// Runs exactly `n_rounds` update rounds from a zero initialization and
    /// returns the final weights. Diverging or rank-deficient systems are
    /// not intercepted; they produce non-finite weights.
    ///
    /// # Panics
    ///
    /// Panics if `targets.len() != design.num_rows()`.
    pub fn train(&mut self, design: &ColMatrix<f64>, targets: &[f64]) -> LinearModel {
        assert_eq!(
            targets.len(),
            design.num_rows(),
            "Target length {} does not match design rows {}",
            targets.len(),
            design.num_rows()
        );

        run_with_threads(self.params.n_threads, |parallelism| {
            let n_rows = design.num_rows();
            let n_features = design.num_cols();

            let mut state = MomentumState::zeros(n_features);
            let mut predictions = vec![0.0; n_rows];
            let mut residual = vec![0.0; n_rows];
            let mut gradient = vec![0.0; n_features];

            self.logger.start_training(self.params.n_rounds);

            // Kept in lockstep with the state: predictions always hold
            // design * current weights.
            predict_into(design, state.weights(), &mut predictions);

            for round in 0..self.params.n_rounds {
                for ((r, &pred), &target) in residual
                    .iter_mut()
                    .zip(predictions.iter())
                    .zip(targets.iter())
                {
                    *r = pred - target;
                }
                gradient_into(design, &residual, &mut gradient, parallelism);

                if self.params.verbosity >= Verbosity::Debug {
                    let norm = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();
                    self.logger.debug(&format!("[{}] grad-norm:{:.6}", round, norm));
                }

                state.apply_step(&gradient, self.params.learning_rate, self.params.momentum);
                predict_into(design, state.weights(), &mut predictions);

                if self.params.verbosity >= Verbosity::Info {
                    let rmse = Rmse.evaluate(&predictions, targets);
                    self.logger
                        .log_round(round, &[("train-rmse".to_string(), rmse)]);
                }
            }

            self.logger.finish_training();

            LinearModel::new(state.into_weights())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RowMatrix;
    use approx::assert_abs_diff_eq;

    fn silent(n_rounds: usize) -> MomentumParams {
        MomentumParams {
            n_rounds,
            verbosity: Verbosity::Silent,
            ..Default::default()
        }
    }

    #[test]
    fn default_params() {
        let params = MomentumParams::default();
        assert_eq!(params.learning_rate, 0.1);
        assert_eq!(params.momentum, 0.9);
        assert_eq!(params.n_rounds, 100);
        assert_eq!(params.n_threads, 0);
    }

    #[test]
    fn zero_rounds_returns_zero_weights() {
        let design: ColMatrix<f64> =
            RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).to_layout();

        let model = MomentumTrainer::new(silent(0)).train(&design, &[1.0, 1.0]);
        assert_eq!(model.weights(), &[0.0, 0.0]);
    }

    #[test]
    fn first_round_is_plain_gradient_step() {
        // At w = 0 the gradient is -(1/n)·Xᵀy, so round one lands on
        // α·(1/n)·Xᵀy = 0.1 · [2, 3].
        let design: ColMatrix<f64> =
            RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).to_layout();

        let model = MomentumTrainer::new(silent(1)).train(&design, &[1.0, 1.0]);
        assert_abs_diff_eq!(model.weights()[0], 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(model.weights()[1], 0.3, epsilon = 1e-15);
    }

    #[test]
    fn momentum_term_shapes_second_round() {
        // X = [1; 1], y = [2, 2]: w₁ = 0.2, then
        // w₂ = w₁ + 0.9·(w₁ - 0) - 0.1·(-1.8) = 0.56.
        let design = ColMatrix::from_vec(vec![1.0, 1.0], 2, 1);

        let model = MomentumTrainer::new(silent(2)).train(&design, &[2.0, 2.0]);
        assert_abs_diff_eq!(model.weights()[0], 0.56, epsilon = 1e-15);
    }

    #[test]
    fn longer_horizon_reduces_training_error() {
        let rows = 8;
        let data: Vec<f64> = (0..rows).map(|i| i as f64 / 8.0).collect();
        let targets: Vec<f64> = data.iter().map(|x| 2.0 * x).collect();
        let design = ColMatrix::from_vec(data, rows, 1);

        let rmse_at = |n_rounds: usize| {
            let model = MomentumTrainer::new(silent(n_rounds)).train(&design, &targets);
            let mut preds = vec![0.0; rows];
            predict_into(&design, model.weights(), &mut preds);
            Rmse.evaluate(&preds, &targets)
        };

        let short = rmse_at(5);
        let long = rmse_at(100);
        assert!(
            long < short,
            "rmse after 100 rounds ({}) should beat 5 rounds ({})",
            long,
            short
        );
    }

    #[test]
    fn parallel_training_matches_sequential() {
        // Per-feature gradient entries are reduced in a fixed order, so
        // thread count must not change the result bitwise.
        let rows = 32;
        let mut data = Vec::with_capacity(rows * 3);
        for i in 0..rows {
            let x = i as f64 * 0.1;
            data.extend_from_slice(&[x, x * x, 1.0]);
        }
        let design: ColMatrix<f64> = RowMatrix::from_vec(data, rows, 3).to_layout();
        let targets: Vec<f64> = (0..rows).map(|i| (i as f64 * 0.1).sin()).collect();

        let sequential = MomentumTrainer::new(MomentumParams {
            n_threads: 1,
            ..silent(20)
        })
        .train(&design, &targets);
        let parallel = MomentumTrainer::new(MomentumParams {
            n_threads: 2,
            ..silent(20)
        })
        .train(&design, &targets);

        assert_eq!(sequential.weights(), parallel.weights());
    }

    #[test]
    fn divergent_settings_produce_non_finite_weights() {
        let design = ColMatrix::from_vec(vec![1.0e4, 2.0e4], 2, 1);
        let params = MomentumParams {
            learning_rate: 10.0,
            ..silent(200)
        };

        let model = MomentumTrainer::new(params).train(&design, &[1.0, 1.0]);
        assert!(model.weights().iter().any(|w| !w.is_finite()));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn target_length_mismatch_panics() {
        let design = ColMatrix::from_vec(vec![1.0, 1.0], 2, 1);
        MomentumTrainer::new(silent(1)).train(&design, &[1.0]);
    }
}
