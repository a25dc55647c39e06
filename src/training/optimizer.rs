//! Momentum gradient descent kernels.
//!
//! The optimizer minimizes the mean squared residual
//! `L(w) = (1/n) * ||y - X w||^2` over a column-major design matrix `X`.
//! Each iteration computes
//!
//! ```text
//! grad   = (1/n) * X^T (X w_curr - y)
//! w_next = w_curr + momentum * (w_curr - w_prev) - learning_rate * grad
//! ```
//!
//! and advances the two-slot state (`w_prev <- w_curr`, `w_curr <- w_next`).
//! Both slots start at zero, so the first step reduces to plain gradient
//! descent. The kernels here are the pieces of one iteration; the
//! fixed-horizon loop lives in [`super::trainer`].
//!
//! The `1/n` factor is part of the gradient definition, not a convention:
//! dropping it rescales the effective step size. Degenerate inputs (n = 0,
//! overflowing feature values) propagate as Inf/NaN through the arithmetic;
//! nothing here detects or repairs them.

use rayon::prelude::*;

use crate::data::ColMatrix;
use crate::utils::Parallelism;

// =============================================================================
// Momentum State
// =============================================================================

/// Two-slot optimizer state: the previous and current weight vectors.
///
/// Created at zero, advanced once per iteration, and consumed into the final
/// weight vector when the loop ends. Keeping the state explicit makes a
/// single iteration testable against hand-computed values.
///
/// # Example
///
/// ```
/// use basisfit::training::MomentumState;
///
/// let mut state = MomentumState::zeros(2);
/// state.apply_step(&[-2.0, -4.0], 0.1, 0.9);
/// // First step from zero state is plain gradient descent.
/// assert_eq!(state.weights(), &[0.2, 0.4]);
/// ```
#[derive(Debug, Clone)]
pub struct MomentumState {
    prev: Vec<f64>,
    curr: Vec<f64>,
}

impl MomentumState {
    /// Create a zero-initialized state of the given dimension.
    ///
    /// Both slots start at zero; the momentum term vanishes on the first
    /// step.
    pub fn zeros(dim: usize) -> Self {
        Self {
            prev: vec![0.0; dim],
            curr: vec![0.0; dim],
        }
    }

    /// Weight dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.curr.len()
    }

    /// The current weight vector.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.curr
    }

    /// The previous weight vector (one step behind).
    #[inline]
    pub fn previous(&self) -> &[f64] {
        &self.prev
    }

    /// Apply one momentum step for the given gradient and advance the state.
    ///
    /// The buffers are rotated in place; no allocation happens per step.
    ///
    /// # Panics
    ///
    /// Panics if `gradient.len() != self.dim()`.
    pub fn apply_step(&mut self, gradient: &[f64], learning_rate: f64, momentum: f64) {
        assert_eq!(
            gradient.len(),
            self.curr.len(),
            "Gradient length {} does not match weight dimension {}",
            gradient.len(),
            self.curr.len()
        );

        // After the swap, `prev` holds w_curr and `curr` holds w_prev; the
        // loop overwrites `curr` with w_next.
        std::mem::swap(&mut self.prev, &mut self.curr);
        for ((next, &last), &grad) in self
            .curr
            .iter_mut()
            .zip(self.prev.iter())
            .zip(gradient.iter())
        {
            *next = last + momentum * (last - *next) - learning_rate * grad;
        }
    }

    /// Consume the state, returning the current weight vector.
    pub fn into_weights(self) -> Vec<f64> {
        self.curr
    }
}

// =============================================================================
// Iteration Kernels
// =============================================================================

/// Compute predictions `out = X w` by column accumulation.
///
/// Every column of the column-major design matrix contributes
/// `weight[col] * column` to the output buffer. This is the layout the
/// trainer already holds, so no transposition happens per iteration.
///
/// # Panics
///
/// Panics if `weights.len() != design.num_cols()` or
/// `out.len() != design.num_rows()`.
pub fn predict_into(design: &ColMatrix<f64>, weights: &[f64], out: &mut [f64]) {
    assert_eq!(
        weights.len(),
        design.num_cols(),
        "Weight length {} does not match design matrix columns {}",
        weights.len(),
        design.num_cols()
    );
    assert_eq!(
        out.len(),
        design.num_rows(),
        "Output length {} does not match design matrix rows {}",
        out.len(),
        design.num_rows()
    );

    out.fill(0.0);
    for (col, &weight) in weights.iter().enumerate() {
        for (value, &x) in out.iter_mut().zip(design.col_slice(col).iter()) {
            *value += weight * x;
        }
    }
}

/// Compute the mean-residual gradient `out = (1/n) * X^T r`.
///
/// One contiguous column dot product per coordinate. Coordinates are
/// independent, so `Parallelism::Parallel` splits them across the rayon
/// pool; per-coordinate accumulation order is fixed, so both modes produce
/// identical bits.
///
/// # Panics
///
/// Panics if `residual.len() != design.num_rows()` or
/// `out.len() != design.num_cols()`.
pub fn gradient_into(
    design: &ColMatrix<f64>,
    residual: &[f64],
    out: &mut [f64],
    parallelism: Parallelism,
) {
    assert_eq!(
        residual.len(),
        design.num_rows(),
        "Residual length {} does not match design matrix rows {}",
        residual.len(),
        design.num_rows()
    );
    assert_eq!(
        out.len(),
        design.num_cols(),
        "Gradient length {} does not match design matrix columns {}",
        out.len(),
        design.num_cols()
    );

    let n = design.num_rows() as f64;
    if parallelism.is_parallel() {
        out.par_iter_mut().enumerate().for_each(|(col, grad)| {
            *grad = column_dot(design.col_slice(col), residual) / n;
        });
    } else {
        for (col, grad) in out.iter_mut().enumerate() {
            *grad = column_dot(design.col_slice(col), residual) / n;
        }
    }
}

#[inline]
fn column_dot(column: &[f64], residual: &[f64]) -> f64 {
    column
        .iter()
        .zip(residual.iter())
        .map(|(&x, &r)| x * r)
        .sum()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn small_design() -> ColMatrix<f64> {
        // Row-major logical matrix:
        //   [1 2]
        //   [3 4]
        ColMatrix::from_vec(vec![1.0, 3.0, 2.0, 4.0], 2, 2)
    }

    #[test]
    fn zero_state() {
        let state = MomentumState::zeros(3);
        assert_eq!(state.dim(), 3);
        assert_eq!(state.weights(), &[0.0, 0.0, 0.0]);
        assert_eq!(state.previous(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn predict_known_values() {
        let design = small_design();
        let mut out = vec![0.0; 2];
        predict_into(&design, &[1.0, -1.0], &mut out);

        // [1*1 + 2*(-1), 3*1 + 4*(-1)]
        assert_eq!(out, vec![-1.0, -1.0]);
    }

    #[test]
    fn gradient_known_values() {
        let design = small_design();
        let residual = [1.0, 1.0];
        let mut grad = vec![0.0; 2];
        gradient_into(&design, &residual, &mut grad, Parallelism::Sequential);

        // (1/2) * [1+3, 2+4]
        assert_eq!(grad, vec![2.0, 3.0]);
    }

    #[test]
    fn gradient_parallel_matches_sequential() {
        let data: Vec<f64> = (0..60).map(|i| (i as f64) * 0.31 - 7.0).collect();
        let design = ColMatrix::from_vec(data, 10, 6);
        let residual: Vec<f64> = (0..10).map(|i| (i as f64) * 0.5 - 2.0).collect();

        let mut sequential = vec![0.0; 6];
        let mut parallel = vec![0.0; 6];
        gradient_into(&design, &residual, &mut sequential, Parallelism::Sequential);
        gradient_into(&design, &residual, &mut parallel, Parallelism::Parallel);

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn first_step_is_plain_gradient_descent() {
        // From a zero state the momentum term vanishes, so
        // w_1 = learning_rate * (1/n) * X^T y.
        let design = small_design();
        let targets = [1.0, 1.0];

        let mut state = MomentumState::zeros(2);
        let mut predictions = vec![0.0; 2];
        let mut residual = vec![0.0; 2];
        let mut gradient = vec![0.0; 2];

        predict_into(&design, state.weights(), &mut predictions);
        for ((r, &pred), &y) in residual.iter_mut().zip(&predictions).zip(&targets) {
            *r = pred - y;
        }
        gradient_into(&design, &residual, &mut gradient, Parallelism::Sequential);
        state.apply_step(&gradient, 0.1, 0.9);

        // X^T y = [4, 6], so w_1 = 0.1 * (1/2) * [4, 6] = [0.2, 0.3].
        assert_abs_diff_eq!(state.weights()[0], 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(state.weights()[1], 0.3, epsilon = 1e-15);
        assert_eq!(state.previous(), &[0.0, 0.0]);
    }

    #[test]
    fn momentum_step_hand_computed() {
        // One feature, two identical rows: X = [1; 1], y = [2, 2].
        let design = ColMatrix::from_vec(vec![1.0, 1.0], 2, 1);
        let targets = [2.0, 2.0];
        let (learning_rate, momentum) = (0.1, 0.9);

        let mut state = MomentumState::zeros(1);
        let mut predictions = vec![0.0; 2];
        let mut residual = vec![0.0; 2];
        let mut gradient = vec![0.0; 1];

        for _ in 0..2 {
            predict_into(&design, state.weights(), &mut predictions);
            for ((r, &pred), &y) in residual.iter_mut().zip(&predictions).zip(&targets) {
                *r = pred - y;
            }
            gradient_into(&design, &residual, &mut gradient, Parallelism::Sequential);
            state.apply_step(&gradient, learning_rate, momentum);
        }

        // Step 0: grad = -2,   w_1 = 0.2
        // Step 1: grad = -1.8, w_2 = 0.2 + 0.9*(0.2 - 0) + 0.1*1.8 = 0.56
        assert_abs_diff_eq!(state.previous()[0], 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(state.weights()[0], 0.56, epsilon = 1e-15);
    }

    #[test]
    fn state_advances_on_step() {
        let mut state = MomentumState::zeros(2);
        state.apply_step(&[1.0, -1.0], 0.5, 0.9);
        let after_first = state.weights().to_vec();

        state.apply_step(&[0.0, 0.0], 0.5, 0.9);
        assert_eq!(state.previous(), after_first.as_slice());
    }

    #[test]
    #[should_panic(expected = "does not match weight dimension")]
    fn gradient_dim_mismatch_panics() {
        let mut state = MomentumState::zeros(3);
        state.apply_step(&[1.0, 2.0], 0.1, 0.9);
    }

    #[test]
    fn objective_decreases_on_small_system() {
        // Well-conditioned 1-feature system; a long horizon must reduce
        // the mean squared residual despite early momentum overshoot.
        let design = ColMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 4, 1);
        let targets = [2.0, 4.0, 6.0, 8.0];

        let objective = |weights: &[f64]| -> f64 {
            let mut out = vec![0.0; 4];
            predict_into(&design, weights, &mut out);
            out.iter()
                .zip(&targets)
                .map(|(&pred, &y)| (y - pred) * (y - pred))
                .sum::<f64>()
                / 4.0
        };

        let mut state = MomentumState::zeros(1);
        let initial = objective(state.weights());

        let mut predictions = vec![0.0; 4];
        let mut residual = vec![0.0; 4];
        let mut gradient = vec![0.0; 1];
        for _ in 0..1000 {
            predict_into(&design, state.weights(), &mut predictions);
            for ((r, &pred), &y) in residual.iter_mut().zip(&predictions).zip(&targets) {
                *r = pred - y;
            }
            gradient_into(&design, &residual, &mut gradient, Parallelism::Sequential);
            state.apply_step(&gradient, 0.05, 0.9);
        }

        let objective_end = objective(state.weights());
        assert!(
            objective_end < initial * 1e-3,
            "objective did not decrease: {initial} -> {objective_end}"
        );
        assert_abs_diff_eq!(state.weights()[0], 2.0, epsilon = 1e-3);
    }
}
