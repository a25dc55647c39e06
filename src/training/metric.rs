//! Evaluation metrics for fitted models.
//!
//! Metrics are separate from the training loop: the trainer minimizes the
//! mean squared residual directly, while metrics score predictions after
//! the fact. All metrics consume paired prediction/target slices and reduce
//! to a single `f64`.

// =============================================================================
// Metric Trait
// =============================================================================

/// A metric for scoring predictions against targets.
///
/// Implementations reduce paired slices to a scalar. Non-finite predictions
/// flow through the reduction, so an overflowed model evaluates to infinity
/// or NaN rather than a misleading finite score. Evaluating over zero
/// samples divides by zero and yields NaN.
pub trait Metric: Send + Sync {
    /// Evaluate the metric over paired predictions and targets.
    ///
    /// Both slices must have the same length.
    fn evaluate(&self, predictions: &[f64], targets: &[f64]) -> f64;

    /// Whether higher values indicate better performance.
    ///
    /// - `true`: higher is better
    /// - `false`: lower is better (RMSE, MAE)
    fn higher_is_better(&self) -> bool;

    /// Name of the metric (for logging).
    fn name(&self) -> &str;
}

// =============================================================================
// RMSE (Root Mean Squared Error)
// =============================================================================

/// Root Mean Squared Error: sqrt(mean((pred - target)²))
///
/// Lower is better. The canonical regression quality score for this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Metric for Rmse {
    fn evaluate(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        debug_assert_eq!(predictions.len(), targets.len());

        let mse = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| {
                let diff = p - t;
                diff * diff
            })
            .sum::<f64>()
            / predictions.len() as f64;

        mse.sqrt()
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "rmse"
    }
}

// =============================================================================
// MAE (Mean Absolute Error)
// =============================================================================

/// Mean Absolute Error: mean(|pred - target|)
///
/// Lower is better. More robust to outliers than RMSE.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl Metric for Mae {
    fn evaluate(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        debug_assert_eq!(predictions.len(), targets.len());

        predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>()
            / predictions.len() as f64
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "mae"
    }
}

// =============================================================================
// Tests
// =============================================================================
