//! Feature maps: fixed nonlinear basis expansions of raw input vectors.
//!
//! A [`FeatureMap`] is an ordered list of [`BasisFunction`] terms over a
//! fixed input dimension. Applying the map to one raw vector yields one
//! feature vector; applying it row-wise to an input matrix yields the
//! design matrix a linear model is trained on.
//!
//! Term order is a contract: weight `k` of a trained model belongs to term
//! `k` of the map that produced its design matrix. Reordering terms changes
//! the meaning of the learned weights.
//!
//! # Numeric Behavior
//!
//! Values are propagated as computed: an input large enough to overflow the
//! exponential term yields `f64::INFINITY` in that column, and NaN inputs
//! yield NaN features. Nothing is clamped or repaired.
//!
//! # Example
//!
//! ```
//! use basisfit::features::FeatureMap;
//!
//! // d=5 reference layout: identity, square, exp, cos blocks and a bias term
//! let map = FeatureMap::reference();
//! assert_eq!(map.input_dim(), 5);
//! assert_eq!(map.output_dim(), 21);
//!
//! let features = map.transform(&[0.0, 0.0, 0.0, 0.0, 0.0]);
//! assert_eq!(features[20], 1.0); // bias
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::RowMatrix;
use crate::utils::Parallelism;

// =============================================================================
// Basis Functions
// =============================================================================

/// One term of a feature map: a generating function plus the input
/// coordinate it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasisFunction {
    /// The raw coordinate, unchanged.
    Identity(usize),
    /// The squared coordinate.
    Square(usize),
    /// Natural exponential of the coordinate.
    ///
    /// Large positive inputs overflow to `f64::INFINITY`; the value is
    /// propagated, not clamped.
    Exp(usize),
    /// Cosine of the coordinate, in radians.
    Cos(usize),
    /// The constant 1.
    Bias,
}

impl BasisFunction {
    /// Evaluate this term on one raw input row.
    ///
    /// # Panics
    ///
    /// Panics if the term's coordinate is out of bounds for `input`. Maps
    /// built through [`FeatureMap::new`] have validated coordinates.
    #[inline]
    pub fn evaluate(&self, input: &[f64]) -> f64 {
        match *self {
            BasisFunction::Identity(i) => input[i],
            BasisFunction::Square(i) => input[i] * input[i],
            BasisFunction::Exp(i) => input[i].exp(),
            BasisFunction::Cos(i) => input[i].cos(),
            BasisFunction::Bias => 1.0,
        }
    }

    /// The input coordinate this term reads, if any.
    #[inline]
    pub fn coordinate(&self) -> Option<usize> {
        match *self {
            BasisFunction::Identity(i)
            | BasisFunction::Square(i)
            | BasisFunction::Exp(i)
            | BasisFunction::Cos(i) => Some(i),
            BasisFunction::Bias => None,
        }
    }
}

// =============================================================================
// Feature Map
// =============================================================================

/// Feature map configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FeatureMapError {
    #[error("feature map has no terms")]
    Empty,

    #[error("term {term} reads coordinate {coordinate}, but the input dimension is {input_dim}")]
    CoordinateOutOfRange {
        term: usize,
        coordinate: usize,
        input_dim: usize,
    },
}

/// A declared feature map over a fixed input dimension.
///
/// The map is deterministic and stateless: transforming the same row twice
/// yields identical results, and rows are independent of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMap {
    input_dim: usize,
    terms: Vec<BasisFunction>,
}

impl FeatureMap {
    /// Create a feature map from an explicit term list.
    ///
    /// Every coordinate a term reads must be below `input_dim`, and the term
    /// list must be non-empty.
    pub fn new(input_dim: usize, terms: Vec<BasisFunction>) -> Result<Self, FeatureMapError> {
        if terms.is_empty() {
            return Err(FeatureMapError::Empty);
        }
        for (term, basis) in terms.iter().enumerate() {
            if let Some(coordinate) = basis.coordinate() {
                if coordinate >= input_dim {
                    return Err(FeatureMapError::CoordinateOutOfRange {
                        term,
                        coordinate,
                        input_dim,
                    });
                }
            }
        }
        Ok(Self { input_dim, terms })
    }

    /// The block layout for an arbitrary input dimension `d`: the identity,
    /// square, exponential and cosine blocks (each covering coordinates
    /// `0..d` in order), followed by a single bias term. Output dimension is
    /// `4 * d + 1`.
    pub fn blockwise(input_dim: usize) -> Self {
        let mut terms = Vec::with_capacity(4 * input_dim + 1);
        terms.extend((0..input_dim).map(BasisFunction::Identity));
        terms.extend((0..input_dim).map(BasisFunction::Square));
        terms.extend((0..input_dim).map(BasisFunction::Exp));
        terms.extend((0..input_dim).map(BasisFunction::Cos));
        terms.push(BasisFunction::Bias);
        Self { input_dim, terms }
    }

    /// The reference instance: `blockwise(5)`, mapping d=5 inputs to p=21
    /// features.
    pub fn reference() -> Self {
        Self::blockwise(5)
    }

    /// Dimension of one raw input vector.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Dimension of one feature vector (the number of terms).
    #[inline]
    pub fn output_dim(&self) -> usize {
        self.terms.len()
    }

    /// The ordered term list.
    #[inline]
    pub fn terms(&self) -> &[BasisFunction] {
        &self.terms
    }

    /// Transform one raw input row into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `input.len() != input_dim` or `out.len() != output_dim`.
    pub fn transform_into(&self, input: &[f64], out: &mut [f64]) {
        assert_eq!(
            input.len(),
            self.input_dim,
            "Input length {} does not match input dimension {}",
            input.len(),
            self.input_dim
        );
        assert_eq!(
            out.len(),
            self.terms.len(),
            "Output length {} does not match output dimension {}",
            out.len(),
            self.terms.len()
        );
        for (value, term) in out.iter_mut().zip(self.terms.iter()) {
            *value = term.evaluate(input);
        }
    }

    /// Transform one raw input row into a freshly allocated feature vector.
    pub fn transform(&self, input: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.terms.len()];
        self.transform_into(input, &mut out);
        out
    }

    /// Build the design matrix for a batch of raw inputs.
    ///
    /// Row `i` of the result is the transform of row `i` of `inputs`. Rows
    /// are independent, so `Parallelism::Parallel` splits them across the
    /// rayon pool; both modes produce identical bits.
    ///
    /// # Panics
    ///
    /// Panics if `inputs.num_cols() != input_dim`.
    pub fn design_matrix(&self, inputs: &RowMatrix<f64>, parallelism: Parallelism) -> RowMatrix<f64> {
        assert_eq!(
            inputs.num_cols(),
            self.input_dim,
            "Input matrix has {} columns, but the feature map reads {}",
            inputs.num_cols(),
            self.input_dim
        );

        let n_rows = inputs.num_rows();
        let output_dim = self.terms.len();
        let mut data = vec![0.0f64; n_rows * output_dim];

        if parallelism.is_parallel() {
            data.par_chunks_mut(output_dim)
                .enumerate()
                .for_each(|(row, out)| self.transform_into(inputs.row_slice(row), out));
        } else {
            for (row, out) in data.chunks_mut(output_dim).enumerate() {
                self.transform_into(inputs.row_slice(row), out);
            }
        }

        RowMatrix::from_vec(data, n_rows, output_dim)
    }
}

// =============================================================================
// Tests
// =============================================================================
