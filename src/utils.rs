//! Common utilities used across the crate.
//!
//! This module provides the parallelism configuration shared by the feature
//! transformer and the optimizer kernels.

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// This is a simple flag passed through training components. When
/// `Parallel`, components may use `rayon` parallel iterators for the
/// row-wise transform and the per-coordinate gradient reduction. When
/// `Sequential`, components must use sequential iteration. Optimizer
/// iterations are sequential in either mode; only work inside one iteration
/// is ever split.
///
/// The actual thread pool is set up at the training entry point via
/// `n_threads`. Components don't manage thread pools, they just respect
/// this flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if the rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use the ambient rayon pool)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// # Panics
///
/// Panics if the thread pool cannot be created.
///
/// # Example
///
/// ```ignore
/// use basisfit::utils::run_with_threads;
///
/// // Sequential
/// let result = run_with_threads(1, |_| expensive_computation());
///
/// // Exactly 4 threads
/// let result = run_with_threads(4, |_| expensive_computation());
/// ```
#[inline]
pub fn run_with_threads<T: Send>(n_threads: usize, f: impl FnOnce(Parallelism) -> T + Send) -> T {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => f(Parallelism::Sequential),
        Parallelism::Parallel if n_threads == 0 => f(Parallelism::Parallel),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .expect("Failed to create thread pool");
            pool.install(|| f(Parallelism::Parallel))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallelism_from_threads() {
        assert!(!Parallelism::from_threads(1).is_parallel()); // 1 = sequential
        assert!(Parallelism::from_threads(2).is_parallel()); // >1 = parallel
        assert!(Parallelism::from_threads(8).is_parallel());
    }

    #[test]
    fn parallelism_constants() {
        assert!(Parallelism::Parallel.is_parallel());
        assert!(!Parallelism::Sequential.is_parallel());
    }

    #[test]
    fn run_with_threads_sequential() {
        let result = run_with_threads(1, |_| 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn run_with_threads_auto() {
        let result = run_with_threads(0, |_| 42);
        assert_eq!(result, 42);
    }

    #[test]
    fn run_with_threads_explicit() {
        let result = run_with_threads(2, |_| rayon::current_num_threads());
        assert_eq!(result, 2);
    }
}
