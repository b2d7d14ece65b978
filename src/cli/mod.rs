//! Command-line parsing for the generalization-error figure.
//!
//! Every flag defaults to the value used for the reference figure, so running
//! the binary without arguments reproduces it exactly.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "generalization-error",
    version,
    about = "Plot a polynomial fit against held-out data to show generalization error"
)]
pub struct Cli {
    /// Random seed for every draw (inputs and noise).
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of points used for the model fit.
    #[arg(long, default_value_t = 20)]
    pub train_size: usize,

    /// Number of fresh points drawn to show generalization.
    #[arg(long, default_value_t = 200)]
    pub held_out_size: usize,

    /// Polynomial degree of the regression model.
    #[arg(long, default_value_t = 5)]
    pub degree: usize,

    /// Standard deviation of the observation noise.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Number of evaluation points for the prediction and truth curves.
    #[arg(long, default_value_t = 100)]
    pub grid_points: usize,

    /// Directory receiving the figure files.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// File stem for `<stem>.pdf` and `<stem>.png`.
    #[arg(long, default_value = "generalization_error")]
    pub stem: String,

    /// Raster resolution (dots per inch) of the 3 x 2.5 inch figure.
    #[arg(long, default_value_t = 100)]
    pub dpi: u32,

    /// Also write a JSON summary (coefficients and errors).
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}
