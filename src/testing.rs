//! Testing utilities for basisfit.
//!
//! This module provides common assertion helpers and synthetic data
//! generators used by both unit tests and integration tests.
//!
//! ```ignore
//! use basisfit::assert_approx_eq;
//! use basisfit::testing::DEFAULT_TOLERANCE;
//!
//! assert_approx_eq!(fitted, expected, DEFAULT_TOLERANCE);
//! ```

pub mod data;

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons.
/// Appropriate for fitted values where inputs and targets are O(1).
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two `f64` values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use basisfit::assert_approx_eq;
/// assert_approx_eq!(1.0f64, 1.0001f64, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two slices of `f64` values are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}
