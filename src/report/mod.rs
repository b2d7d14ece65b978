//! Reporting utilities: error metrics and formatted run summaries.
//!
//! We keep formatting code in one place so the sampling/fitting code stays
//! free of presentation concerns.

use crate::domain::{ErrorReport, RunConfig};
use crate::models::FittedPolynomial;

/// Mean squared error between observations and predictions.
///
/// Returns `NaN` for empty or mismatched inputs.
pub fn mean_squared_error(y: &[f64], y_hat: &[f64]) -> f64 {
    if y.is_empty() || y.len() != y_hat.len() {
        return f64::NAN;
    }
    let sse: f64 = y.iter().zip(y_hat.iter()).map(|(a, b)| (a - b).powi(2)).sum();
    sse / y.len() as f64
}

/// Format the run summary (configuration, coefficients and error diagnostics).
pub fn format_run_summary(config: &RunConfig, fitted: &FittedPolynomial, errors: &ErrorReport) -> String {
    let mut out = String::new();

    out.push_str("=== generalization error ===\n");
    out.push_str(&format!(
        "Seed: {} | train n={} | held-out n={} | noise={:.3}\n",
        config.seed, config.train_size, config.held_out_size, config.noise_scale
    ));
    out.push_str(&format!(
        "Model: degree-{} polynomial, coefficients {}\n",
        fitted.degree(),
        fmt_vec(fitted.coefficients())
    ));
    out.push_str(&format!(
        "MSE train={:.4} held-out={:.4} truth-grid={:.4}\n",
        errors.train_mse, errors.held_out_mse, errors.truth_grid_mse
    ));
    out.push_str(&format!(
        "Constant baseline: held-out={:.4} truth-grid={:.4}\n",
        errors.baseline_held_out_mse, errors.baseline_truth_grid_mse
    ));

    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", parts.join(", "))
}
