//! basisfit: least-squares regression over fixed basis expansions.
//!
//! This crate fits linear weights over a declared nonlinear feature map by
//! momentum gradient descent and reports in-sample prediction error.
//!
//! # Key Types
//!
//! - [`BasisModel`] - High-level model with fit/predict/evaluate
//! - [`FeatureMap`] / [`BasisFunction`] - Declared basis expansion
//! - [`MomentumParams`] / [`MomentumTrainer`] - Fixed-horizon optimization
//! - [`Dataset`] - Raw observations and targets
//!
//! # Fitting
//!
//! Build a [`Dataset`], pick a [`FeatureMap`] ([`FeatureMap::reference`] is
//! the stock five-input map), then call [`BasisModel::fit`]. See the
//! [`model`] module for details.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod features;
pub mod io;
pub mod model;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level model types
pub use model::{BasisModel, LinearModel};

// Feature map types (most users want these)
pub use features::{BasisFunction, FeatureMap};

// Training types (params, metrics)
pub use training::{Metric, MomentumParams, MomentumTrainer, Rmse, Verbosity};

// Data types (for preparing training data)
pub use data::{ColMatrix, Dataset, DatasetError, RowMatrix};

// Shared utilities
pub use utils::{Parallelism, run_with_threads};
