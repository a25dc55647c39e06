use rand::prelude::*;

use crate::data::{Dataset, RowMatrix};

/// Generate random raw inputs in row-major order.
///
/// Values are uniform in `[min, max]`.
pub fn random_inputs(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Vec<f64> {
	assert!(max >= min);
	let mut rng = StdRng::seed_from_u64(seed);
	(0..rows * cols)
		.map(|_| rng.gen_range(min..=max))
		.collect()
}

/// Create a [`RowMatrix`] of random raw inputs.
pub fn random_input_matrix(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> RowMatrix<f64> {
	let data = random_inputs(rows, cols, seed, min, max);
	RowMatrix::from_vec(data, rows, cols)
}

/// Generate targets as a linear model of the raw inputs plus uniform noise.
///
/// Returns `(targets, weights, bias)`.
pub fn linear_targets(
	inputs_row_major: &[f64],
	rows: usize,
	cols: usize,
	seed: u64,
	noise_amplitude: f64,
) -> (Vec<f64>, Vec<f64>, f64) {
	assert_eq!(inputs_row_major.len(), rows * cols);
	let mut rng = StdRng::seed_from_u64(seed);

	let weights: Vec<f64> = (0..cols).map(|_| rng.gen_range(-1.0..=1.0)).collect();
	let bias: f64 = rng.gen_range(-0.25..=0.25);

	let mut targets = Vec::with_capacity(rows);
	for r in 0..rows {
		let mut y = bias;
		let base = r * cols;
		for c in 0..cols {
			y += inputs_row_major[base + c] * weights[c];
		}
		if noise_amplitude > 0.0 {
			y += rng.gen_range(-noise_amplitude..=noise_amplitude);
		}
		targets.push(y);
	}

	(targets, weights, bias)
}

/// Create a full synthetic dataset: random inputs with noisy linear targets.
pub fn synthetic_dataset(rows: usize, cols: usize, seed: u64, noise_amplitude: f64) -> Dataset {
	let inputs = random_inputs(rows, cols, seed, -1.0, 1.0);
	let (targets, _, _) = linear_targets(&inputs, rows, cols, seed ^ 0xBA515, noise_amplitude);
	Dataset::new(RowMatrix::from_vec(inputs, rows, cols), targets)
		.expect("row and target counts match by construction")
}
