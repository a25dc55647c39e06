//! Integration tests for momentum training over basis expansions.
//!
//! Each JSON case under `tests/test-cases/momentum/` carries a dataset,
//! training parameters, and the weights produced by an independent
//! implementation of the same update rule. Training here must land on the
//! same trajectory:
//! - fitted weights match the reference weights to tight tolerance,
//! - the reported RMSE matches the reference RMSE,
//! - the result does not depend on the thread count.

use std::fs;
use std::path::Path;

use rstest::rstest;
use serde::Deserialize;

use basisfit::testing::assert_slice_approx_eq;
use basisfit::testing::data::random_input_matrix;
use basisfit::{
    assert_approx_eq, BasisModel, Dataset, FeatureMap, MomentumParams, Parallelism, Rmse,
    RowMatrix, Verbosity,
};

const TEST_CASES_DIR: &str = "tests/test-cases/momentum";

#[derive(Debug, Deserialize)]
struct MomentumCase {
    input_dim: usize,
    num_rows: usize,
    inputs: Vec<f64>,
    targets: Vec<f64>,
    learning_rate: f64,
    momentum: f64,
    n_rounds: usize,
    expected_weights: Vec<f64>,
    expected_rmse: f64,
}

fn load_case(name: &str) -> MomentumCase {
    let path = Path::new(TEST_CASES_DIR).join(format!("{name}.json"));
    let json =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    serde_json::from_str(&json).expect("Failed to parse momentum case JSON")
}

fn case_dataset(case: &MomentumCase) -> Dataset {
    let inputs = RowMatrix::from_vec(case.inputs.clone(), case.num_rows, case.input_dim);
    Dataset::new(inputs, case.targets.clone()).expect("case rows and targets line up")
}

fn case_params(case: &MomentumCase) -> MomentumParams {
    MomentumParams {
        learning_rate: case.learning_rate,
        momentum: case.momentum,
        n_rounds: case.n_rounds,
        verbosity: Verbosity::Silent,
        n_threads: 1,
    }
}

#[rstest]
#[case("constant_rows")]
#[case("varied_rows")]
#[case("short_horizon")]
fn fit_matches_reference_trajectory(#[case] name: &str) {
    let case = load_case(name);
    let dataset = case_dataset(&case);

    let model = BasisModel::fit(&dataset, FeatureMap::blockwise(case.input_dim), case_params(&case))
        .expect("case dims line up");

    assert_eq!(model.weights().len(), case.expected_weights.len());
    assert_slice_approx_eq(model.weights(), &case.expected_weights, 1e-9, "fitted weights");
    assert_approx_eq!(model.evaluate(&dataset, &Rmse), case.expected_rmse, 1e-9);
}

#[test]
fn thread_count_does_not_change_results() {
    let case = load_case("varied_rows");
    let dataset = case_dataset(&case);

    let sequential =
        BasisModel::fit(&dataset, FeatureMap::blockwise(case.input_dim), case_params(&case))
            .expect("case dims line up");
    let threaded = BasisModel::fit(
        &dataset,
        FeatureMap::blockwise(case.input_dim),
        MomentumParams { n_threads: 4, ..case_params(&case) },
    )
    .expect("case dims line up");

    // Gradients are computed per column with a fixed fold order, so the
    // thread split must not show up in the result at all.
    assert_eq!(sequential.weights(), threaded.weights());
}

#[test]
fn longer_horizons_keep_reducing_training_error() {
    let case = load_case("varied_rows");
    let dataset = case_dataset(&case);

    let rmse_at = |n_rounds: usize| {
        let params = MomentumParams { n_rounds, ..case_params(&case) };
        BasisModel::fit(&dataset, FeatureMap::blockwise(case.input_dim), params)
            .expect("case dims line up")
            .evaluate(&dataset, &Rmse)
    };

    let early = rmse_at(5);
    let mid = rmse_at(25);
    let late = rmse_at(100);
    assert!(late < mid, "rmse after 100 rounds ({late}) should beat 25 rounds ({mid})");
    assert!(mid < early, "rmse after 25 rounds ({mid}) should beat 5 rounds ({early})");
}

#[test]
fn zero_rounds_leaves_weights_at_zero() {
    let case = load_case("varied_rows");
    let dataset = case_dataset(&case);
    let params = MomentumParams { n_rounds: 0, ..case_params(&case) };

    let model = BasisModel::fit(&dataset, FeatureMap::blockwise(case.input_dim), params)
        .expect("case dims line up");

    assert!(model.weights().iter().all(|&w| w == 0.0));
    let baseline =
        (case.targets.iter().map(|t| t * t).sum::<f64>() / case.targets.len() as f64).sqrt();
    assert_eq!(model.evaluate(&dataset, &Rmse), baseline);
}

#[rstest]
#[case(1)]
#[case(5)]
#[case(8)]
fn blockwise_design_has_four_blocks_plus_bias(#[case] input_dim: usize) {
    let inputs = random_input_matrix(6, input_dim, 42, -1.0, 1.0);
    let map = FeatureMap::blockwise(input_dim);

    let design = map.design_matrix(&inputs, Parallelism::Sequential);

    assert_eq!(design.num_rows(), 6);
    assert_eq!(design.num_cols(), 4 * input_dim + 1);
    assert_eq!(design.num_cols(), map.output_dim());
    for row in 0..design.num_rows() {
        let features = design.row_slice(row);
        assert_eq!(features[map.output_dim() - 1], 1.0, "last column is the intercept");
    }
}

#[test]
fn bias_only_model_reproduces_constant_targets_exactly() {
    let map = FeatureMap::reference();
    let mut weights = vec![0.0; map.output_dim()];
    weights[map.output_dim() - 1] = 0.75;
    let model = BasisModel::from_parts(map, weights).expect("weight count matches");

    let inputs = random_input_matrix(8, 5, 3, -2.0, 2.0);
    let dataset = Dataset::new(inputs, vec![0.75; 8]).expect("rows and targets line up");

    assert_eq!(model.evaluate(&dataset, &Rmse), 0.0);
}
