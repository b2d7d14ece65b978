//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments into a `RunConfig`
//! - runs the sampling/fitting pipeline
//! - renders the figure and writes the PDF and PNG
//! - writes the optional JSON summary

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{RunConfig, RunSummary};
use crate::error::AppError;
use crate::io::FigurePaths;

pub mod pipeline;

/// Entry point for the `generalization-error` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = run_config_from_args(&cli);
    run_with_config(&config).map(|_| ())
}

/// Run the full pipeline and write every output for `config`.
pub fn run_with_config(config: &RunConfig) -> Result<FigurePaths, AppError> {
    log::info!(
        "Sampling {} training and {} held-out points (seed {})",
        config.train_size,
        config.held_out_size,
        config.seed
    );
    let run = pipeline::run_pipeline(config)?;

    for line in crate::report::format_run_summary(config, &run.fitted, &run.errors).lines() {
        log::info!("{line}");
    }

    let svg = crate::plot::render_svg(&run.figure)?;
    let paths = crate::io::write_figure(&svg, &config.pdf_path(), &config.png_path(), config.dpi)?;

    if let Some(path) = &config.export_summary {
        let summary = RunSummary {
            tool: env!("CARGO_PKG_NAME").to_string(),
            seed: config.seed,
            train_size: config.train_size,
            held_out_size: config.held_out_size,
            degree: run.fitted.degree(),
            noise_scale: config.noise_scale,
            coefficients: run.fitted.coefficients().to_vec(),
            errors: run.errors,
            outputs: vec![paths.pdf.clone(), paths.png.clone()],
        };
        crate::io::write_summary_json(path, &summary)?;
        log::info!("Wrote summary to {}", path.display());
    }

    Ok(paths)
}

pub fn run_config_from_args(cli: &Cli) -> RunConfig {
    RunConfig {
        seed: cli.seed,
        train_size: cli.train_size,
        held_out_size: cli.held_out_size,
        degree: cli.degree,
        noise_scale: cli.noise,
        grid_points: cli.grid_points,
        output_dir: cli.output_dir.clone(),
        stem: cli.stem.clone(),
        dpi: cli.dpi,
        export_summary: cli.export_summary.clone(),
        ..RunConfig::default()
    }
}
