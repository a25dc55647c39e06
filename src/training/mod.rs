//! Training infrastructure for momentum gradient descent.
//!
//! This module provides the core types needed for fitting:
//!
//! - [`MomentumState`]: Two-slot weight state advanced by the update rule
//! - [`MomentumTrainer`]: Fixed-horizon training loop over a design matrix
//! - [`MomentumParams`]: Learning rate, momentum, round count
//! - [`Metric`]: Trait for evaluating prediction quality
//! - [`TrainingLogger`]: Round-by-round logging with verbosity levels
//!
//! ## Metrics
//!
//! - [`Rmse`]: Root mean squared error
//! - [`Mae`]: Mean absolute error

mod logger;
mod metric;
mod optimizer;
mod trainer;

pub use logger::{TrainingLogger, Verbosity};
pub use metric::{Mae, Metric, Rmse};
pub use optimizer::{gradient_into, predict_into, MomentumState};
pub use trainer::{MomentumParams, MomentumTrainer};
