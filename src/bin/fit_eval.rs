//! Fit-and-evaluate harness for delimited observation files.
//!
//! Loads a dataset, fits the blockwise basis model with momentum gradient
//! descent, prints the in-sample RMSE, and optionally writes the fitted
//! weights to a text file.
//!
//! Examples:
//! - Stock five-input map with reference settings:
//!   `cargo run --bin fit_eval --release -- --input data.txt --out weights.txt`
//!
//! - Custom horizon and step size:
//!   `cargo run --bin fit_eval --release -- --input data.txt --rounds 500 --learning-rate 0.05`

use std::path::PathBuf;

use basisfit::features::FeatureMap;
use basisfit::io::load_delimited;
use basisfit::model::BasisModel;
use basisfit::training::{MomentumParams, Rmse, Verbosity};

#[derive(Debug)]
struct Args {
	input: PathBuf,
	input_dim: usize,
	rounds: usize,
	learning_rate: f64,
	momentum: f64,
	threads: usize,
	out: Option<PathBuf>,
	quiet: bool,
}

fn parse_args() -> Args {
	let mut input: Option<PathBuf> = None;
	let mut input_dim = 5usize;
	let mut rounds = 100usize;
	let mut learning_rate = 0.1f64;
	let mut momentum = 0.9f64;
	let mut threads = 0usize;
	let mut out: Option<PathBuf> = None;
	let mut quiet = false;

	let mut it = std::env::args().skip(1);
	while let Some(arg) = it.next() {
		match arg.as_str() {
			"--input" => input = Some(PathBuf::from(it.next().expect("--input requires a value"))),
			"--input-dim" => input_dim = it.next().expect("--input-dim value").parse().unwrap(),
			"--rounds" => rounds = it.next().expect("--rounds value").parse().unwrap(),
			"--learning-rate" => learning_rate = it.next().expect("--learning-rate value").parse().unwrap(),
			"--momentum" => momentum = it.next().expect("--momentum value").parse().unwrap(),
			"--threads" => threads = it.next().expect("--threads value").parse().unwrap(),
			"--out" => out = Some(PathBuf::from(it.next().expect("--out requires a value"))),
			"--quiet" => quiet = true,
			other => panic!("unknown argument: {other}"),
		}
	}

	Args {
		input: input.expect("--input is required"),
		input_dim,
		rounds,
		learning_rate,
		momentum,
		threads,
		out,
		quiet,
	}
}

fn main() {
	let args = parse_args();

	let dataset = load_delimited(&args.input, args.input_dim)
		.unwrap_or_else(|e| panic!("failed to load {}: {e}", args.input.display()));

	let map = FeatureMap::blockwise(args.input_dim);
	let params = MomentumParams {
		learning_rate: args.learning_rate,
		momentum: args.momentum,
		n_rounds: args.rounds,
		verbosity: if args.quiet { Verbosity::Silent } else { Verbosity::Info },
		n_threads: args.threads,
	};

	let model = BasisModel::fit(&dataset, map, params)
		.unwrap_or_else(|e| panic!("fit failed: {e}"));

	let rmse = model.evaluate(&dataset, &Rmse);
	println!("rmse: {rmse:.6}");

	if let Some(out) = &args.out {
		model
			.save_weights(out)
			.unwrap_or_else(|e| panic!("failed to write {}: {e}", out.display()));
		if !args.quiet {
			println!("weights written to {}", out.display());
		}
	}
}
