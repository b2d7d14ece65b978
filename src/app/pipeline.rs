//! The computational half of a run, shared by the binary and the tests.
//!
//! Workflow:
//! seeded rng -> training sample -> fit -> evaluation grid -> held-out sample
//! -> error diagnostics -> figure description
//!
//! Nothing here touches the filesystem; `app::run_with_config` renders and
//! writes the outputs.

use crate::data::{GroundTruth, generate_sample, linspace, seeded_rng};
use crate::domain::{ErrorReport, RunConfig, SampleSet};
use crate::error::AppError;
use crate::models::{FittedPolynomial, PolynomialRegression};
use crate::plot::{Figure, FigureData, generalization_figure};
use crate::report::mean_squared_error;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub train: SampleSet,
    pub held_out: SampleSet,
    /// Evaluation grid spanning the x range.
    pub grid: Vec<f64>,
    /// Model predictions on `grid`.
    pub predictions: Vec<f64>,
    /// Noiseless ground truth on `grid`.
    pub truth: Vec<f64>,
    pub fitted: FittedPolynomial,
    pub errors: ErrorReport,
    pub figure: Figure,
}

/// Execute the sampling and fitting pipeline.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    config.validate()?;

    let truth = GroundTruth;
    let mut rng = seeded_rng(config.seed);

    // 1) Training sample.
    let train = generate_sample(
        &truth,
        config.train_size,
        config.x_range,
        config.noise_scale,
        &mut rng,
    );

    // 2) Fit the regression model.
    let fitted = PolynomialRegression::new(config.degree).fit(&train.x, &train.y)?;
    log::debug!("Fitted coefficients: {:?}", fitted.coefficients());

    // 3) Predictions and the noiseless curve over the evaluation grid.
    let (lo, hi) = config.x_range;
    let grid = linspace(lo, hi, config.grid_points);
    let predictions = fitted.predict(&grid);
    let truth_curve = truth.eval_all(&grid);
    if predictions.iter().any(|v| !v.is_finite()) {
        return Err(AppError::new(4, "Non-finite model prediction on the evaluation grid."));
    }

    // 4) Fresh data from the same mechanism.
    let held_out = generate_sample(
        &truth,
        config.held_out_size,
        config.x_range,
        config.noise_scale,
        &mut rng,
    );

    // 5) Error diagnostics, with a constant model as reference.
    let baseline = PolynomialRegression::new(0).fit(&train.x, &train.y)?;
    let errors = ErrorReport {
        train_mse: mean_squared_error(&train.y, &fitted.predict(&train.x)),
        held_out_mse: mean_squared_error(&held_out.y, &fitted.predict(&held_out.x)),
        truth_grid_mse: mean_squared_error(&truth_curve, &predictions),
        baseline_held_out_mse: mean_squared_error(&held_out.y, &baseline.predict(&held_out.x)),
        baseline_truth_grid_mse: mean_squared_error(&truth_curve, &baseline.predict(&grid)),
    };
    log::debug!("Error report: {errors:?}");

    // 6) Figure description.
    let figure = generalization_figure(
        &FigureData {
            train: &train,
            held_out: &held_out,
            grid: &grid,
            predictions: &predictions,
            truth: &truth_curve,
        },
        config,
    );

    Ok(RunOutput {
        train,
        held_out,
        grid,
        predictions,
        truth: truth_curve,
        fitted,
        errors,
        figure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_shapes() {
        let run = run_pipeline(&RunConfig::default()).unwrap();
        assert_eq!(run.train.len(), 20);
        assert_eq!(run.held_out.len(), 200);
        assert_eq!(run.grid.len(), 100);
        assert_eq!(run.predictions.len(), 100);
        assert_eq!(run.fitted.coefficients().len(), 6);
        assert_eq!(run.figure.series.len(), 4);
        assert!(run.errors.train_mse.is_finite());
        assert!(run.errors.held_out_mse.is_finite());
    }

    #[test]
    fn runs_are_bit_reproducible() {
        let a = run_pipeline(&RunConfig::default()).unwrap();
        let b = run_pipeline(&RunConfig::default()).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.train.x), bits(&b.train.x));
        assert_eq!(bits(&a.held_out.x), bits(&b.held_out.x));
        assert_eq!(bits(a.fitted.coefficients()), bits(b.fitted.coefficients()));
    }

    #[test]
    fn quintic_fit_beats_constant_baseline() {
        for seed in [0, 1, 2, 3] {
            for noise_scale in [0.0, 0.05] {
                let config = RunConfig {
                    seed,
                    noise_scale,
                    ..RunConfig::default()
                };
                let run = run_pipeline(&config).unwrap();
                assert!(
                    run.errors.truth_grid_mse < run.errors.baseline_truth_grid_mse,
                    "seed {seed}, noise {noise_scale}: {:?}",
                    run.errors
                );
            }
        }
    }

    #[test]
    fn noiseless_training_recovers_ground_truth() {
        let config = RunConfig {
            noise_scale: 0.0,
            ..RunConfig::default()
        };
        let run = run_pipeline(&config).unwrap();
        for (got, want) in run.fitted.coefficients().iter().zip(GroundTruth::COEFFICIENTS.iter()) {
            assert!((got - want).abs() < 1e-6, "coefficient {got} != {want}");
        }
        assert!(run.errors.train_mse < 1e-20);
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let config = RunConfig {
            held_out_size: 0,
            ..RunConfig::default()
        };
        assert_eq!(run_pipeline(&config).unwrap_err().exit_code(), 2);
    }
}
