//! Fitted models.
//!
//! - [`LinearModel`]: weights over design-matrix columns, prediction kernels
//! - [`BasisModel`]: feature map + linear weights, the end-to-end surface

mod basis;
mod linear;

pub use basis::{BasisModel, FitError, ModelIoError};
pub use linear::LinearModel;
