//! Training progress logging.
//!
//! The logger prints round-by-round metric lines in the familiar
//! `[round] name:value` format, gated by a [`Verbosity`] level so tests and
//! benchmarks can run silently.

use std::time::Instant;

use serde::{Deserialize, Serialize};

// =============================================================================
// Verbosity
// =============================================================================

/// How much training output to print.
///
/// Levels are ordered, so `verbosity >= Verbosity::Info` reads naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Verbosity {
    /// No output. Used by tests and benchmarks.
    Silent,
    /// Per-round metric lines plus start/finish summaries.
    #[default]
    Info,
    /// Info plus per-round diagnostics (gradient norms).
    Debug,
}

// =============================================================================
// TrainingLogger
// =============================================================================

/// Prints training progress to stdout.
///
/// # Example
///
/// ```
/// use basisfit::training::{TrainingLogger, Verbosity};
///
/// let mut logger = TrainingLogger::new(Verbosity::Silent);
/// logger.start_training(100);
/// logger.log_round(0, &[("train-rmse".to_string(), 1.25)]);
/// logger.finish_training();
/// ```
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    start: Option<Instant>,
}

impl TrainingLogger {
    /// Create a logger with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            start: None,
        }
    }

    /// Announce the start of a training run and begin timing it.
    pub fn start_training(&mut self, n_rounds: usize) {
        self.start = Some(Instant::now());
        if self.verbosity >= Verbosity::Info {
            println!("Starting training: {} rounds", n_rounds);
        }
    }

    /// Print one `[round] name:value  name:value` metric line.
    pub fn log_round(&self, round: usize, metrics: &[(String, f64)]) {
        if self.verbosity < Verbosity::Info {
            return;
        }

        let formatted = metrics
            .iter()
            .map(|(name, value)| format!("{}:{:.6}", name, value))
            .collect::<Vec<_>>()
            .join("  ");
        println!("[{}] {}", round, formatted);
    }

    /// Print a message at `Info` level.
    pub fn info(&self, msg: &str) {
        if self.verbosity >= Verbosity::Info {
            println!("{}", msg);
        }
    }

    /// Print a message at `Debug` level.
    pub fn debug(&self, msg: &str) {
        if self.verbosity >= Verbosity::Debug {
            println!("{}", msg);
        }
    }

    /// Announce the end of a training run with elapsed wall time.
    pub fn finish_training(&mut self) {
        if let Some(start) = self.start.take() {
            if self.verbosity >= Verbosity::Info {
                println!(
                    "Training finished in {:.2}s",
                    start.elapsed().as_secs_f64()
                );
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
