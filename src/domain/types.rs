//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory while sampling, fitting and plotting
//! - exported to JSON (`RunSummary`)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest accepted figure edge in pixels.
pub const MAX_FIGURE_PX: f64 = 16384.0;

/// An ordered set of scalar observations `(x_i, y_i)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Run configuration.
///
/// This is derived from CLI flags (plus defaults). `RunConfig::default()`
/// reproduces the reference figure exactly.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Seed for the single random stream used by every draw.
    pub seed: u64,
    /// Number of points the model is fitted on.
    pub train_size: usize,
    /// Number of fresh points drawn to show generalization error.
    pub held_out_size: usize,
    /// Polynomial degree of the regression model.
    pub degree: usize,
    /// Standard deviation of the additive Gaussian noise.
    pub noise_scale: f64,
    /// Input domain `[low, high)` for sampling; also the evaluation grid span.
    pub x_range: (f64, f64),
    /// Number of evaluation grid points for the prediction and truth curves.
    pub grid_points: usize,

    pub output_dir: PathBuf,
    /// File stem shared by the PDF and PNG outputs.
    pub stem: String,
    /// Figure size in inches.
    pub figure_inches: (f64, f64),
    /// Raster resolution; also the SVG user-unit scale.
    pub dpi: u32,
    /// Optional JSON summary path.
    pub export_summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            train_size: 20,
            held_out_size: 200,
            degree: 5,
            noise_scale: 0.5,
            x_range: (-1.0, 1.0),
            grid_points: 100,
            output_dir: PathBuf::from("."),
            stem: "generalization_error".to_string(),
            figure_inches: (3.0, 2.5),
            dpi: 100,
            export_summary: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.train_size == 0 || self.held_out_size == 0 {
            return Err(AppError::new(2, "Sample sizes must be > 0."));
        }
        if self.grid_points < 2 {
            return Err(AppError::new(2, "Evaluation grid needs at least 2 points."));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale >= 0.0) {
            return Err(AppError::new(2, "Noise scale must be finite and >= 0."));
        }
        let (lo, hi) = self.x_range;
        if !(lo.is_finite() && hi.is_finite() && hi > lo) {
            return Err(AppError::new(2, "Invalid x range."));
        }
        if self.dpi == 0 {
            return Err(AppError::new(2, "DPI must be > 0."));
        }
        let (w, h) = self.figure_inches;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(AppError::new(2, "Invalid figure size."));
        }
        let dpi = f64::from(self.dpi);
        if (w * dpi).round() > MAX_FIGURE_PX || (h * dpi).round() > MAX_FIGURE_PX {
            return Err(AppError::new(
                2,
                format!("Figure of {w}x{h} in at {} dpi exceeds {MAX_FIGURE_PX} px.", self.dpi),
            ));
        }
        if self.stem.is_empty() {
            return Err(AppError::new(2, "Output file stem must not be empty."));
        }
        Ok(())
    }

    /// Figure size in pixels at the configured DPI.
    pub fn figure_pixels(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        let (w, h) = self.figure_inches;
        ((w * dpi).round() as u32, (h * dpi).round() as u32)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pdf", self.stem))
    }

    pub fn png_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.png", self.stem))
    }
}

/// Error diagnostics for one run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ErrorReport {
    /// MSE on the points used for the fit.
    pub train_mse: f64,
    /// MSE on the held-out sample.
    pub held_out_mse: f64,
    /// MSE against the noiseless curve on the evaluation grid.
    pub truth_grid_mse: f64,
    /// Held-out MSE of a constant (degree 0) model fitted on the same data.
    pub baseline_held_out_mse: f64,
    /// Grid MSE of the constant model.
    pub baseline_truth_grid_mse: f64,
}

/// Portable summary of a run, written by `--export-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub tool: String,
    pub seed: u64,
    pub train_size: usize,
    pub held_out_size: usize,
    pub degree: usize,
    pub noise_scale: f64,
    /// Coefficients in ascending power order (`w_0 + w_1 x + ...`).
    pub coefficients: Vec<f64>,
    pub errors: ErrorReport,
    pub outputs: Vec<PathBuf>,
}
