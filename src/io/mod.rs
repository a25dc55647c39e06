//! Reading datasets and persisting fitted weights.
//!
//! The numeric core never touches files; these helpers sit at the boundary.
//! Datasets arrive as delimited text with one observation per row: an
//! identifier column (never read), the raw input columns, then the target.
//! Fitted weights leave as plain text with one value per line at 12
//! fractional digits, which `f64` parses back exactly.

use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::data::{Dataset, DatasetError, RowMatrix};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading a delimited dataset file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected {expected} columns, got {got}")]
    RowWidth {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: invalid number '{value}'")]
    Parse { line: usize, value: String },

    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Errors raised while reading or writing a weights file.
#[derive(Debug, thiserror::Error)]
pub enum WeightsIoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: invalid weight '{value}'")]
    Parse { line: usize, value: String },
}

// =============================================================================
// Dataset loading
// =============================================================================

/// Load a delimited observation file.
///
/// Each non-blank row must hold `1 + input_dim + 1` columns: an identifier,
/// `input_dim` numeric features, and one numeric target. Columns may be
/// separated by commas, whitespace, or both. Line numbers in errors are
/// 1-based.
pub fn load_delimited(
    path: impl AsRef<Path>,
    input_dim: usize,
) -> Result<Dataset, DatasetLoadError> {
    let content = fs::read_to_string(path)?;
    parse_delimited(&content, input_dim)
}

fn parse_delimited(content: &str, input_dim: usize) -> Result<Dataset, DatasetLoadError> {
    let expected = input_dim + 2;
    let mut inputs: Vec<f64> = Vec::new();
    let mut targets: Vec<f64> = Vec::new();

    for (line_idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if parts.len() != expected {
            return Err(DatasetLoadError::RowWidth {
                line: line_idx + 1,
                expected,
                got: parts.len(),
            });
        }

        // parts[0] is the identifier; the core never reads it.
        for part in &parts[1..1 + input_dim] {
            inputs.push(parse_number(part, line_idx + 1)?);
        }
        targets.push(parse_number(parts[expected - 1], line_idx + 1)?);
    }

    let n_rows = targets.len();
    let inputs = RowMatrix::from_vec(inputs, n_rows, input_dim);
    Ok(Dataset::new(inputs, targets)?)
}

fn parse_number(value: &str, line: usize) -> Result<f64, DatasetLoadError> {
    value.parse().map_err(|_| DatasetLoadError::Parse {
        line,
        value: value.to_string(),
    })
}

// =============================================================================
// Weights file
// =============================================================================

/// Write weights as plain text, one value per line with 12 fractional digits.
pub fn write_weights(path: impl AsRef<Path>, weights: &[f64]) -> Result<(), WeightsIoError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for weight in weights {
        writeln!(writer, "{:.12}", weight)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a weights file written by [`write_weights`].
///
/// Blank lines are skipped; line numbers in errors are 1-based.
pub fn read_weights(path: impl AsRef<Path>) -> Result<Vec<f64>, WeightsIoError> {
    let content = fs::read_to_string(path)?;
    parse_weights(&content)
}

fn parse_weights(content: &str) -> Result<Vec<f64>, WeightsIoError> {
    let mut weights = Vec::new();

    for (line_idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let value: f64 = line.parse().map_err(|_| WeightsIoError::Parse {
            line: line_idx + 1,
            value: line.to_string(),
        })?;
        weights.push(value);
    }

    Ok(weights)
}

// =============================================================================
// Tests
// =============================================================================
