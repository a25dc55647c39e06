//! Data containers for raw inputs and design matrices.
//!
//! # Overview
//!
//! Raw observations live in a [`RowMatrix`] wrapped by [`Dataset`], which
//! validates the input/target alignment once. The feature map expands rows
//! into a design matrix, also row-major; training converts it to a
//! [`ColMatrix`] so that per-coordinate gradient reductions run over
//! contiguous memory.
//!
//! # Storage Types
//!
//! - [`DenseMatrix`]: contiguous dense storage, generic over element type,
//!   [`Layout`] and backing storage
//! - [`RowMatrix`] / [`ColMatrix`]: the two layout aliases used throughout

mod dataset;
mod dense;
mod layout;

pub use dataset::{Dataset, DatasetError};
pub use dense::DenseMatrix;
pub use layout::{ColMajor, Layout, RowMajor, StridedIter};

/// Row-major dense matrix (rows contiguous).
pub type RowMatrix<T = f64, S = Box<[T]>> = DenseMatrix<T, RowMajor, S>;

/// Column-major dense matrix (columns contiguous).
pub type ColMatrix<T = f64, S = Box<[T]>> = DenseMatrix<T, ColMajor, S>;
