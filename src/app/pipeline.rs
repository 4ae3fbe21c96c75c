//! The fit pipeline shared by the CLI and the integration tests:
//! ingest -> fit -> quality gate -> outputs.
//!
//! Nothing is written unless the quality gate accepts the fit, and every
//! error is raised before the first file is created.

use std::fs::create_dir_all;
use std::path::PathBuf;

use tracing::info;

use crate::domain::{FitConfig, SigmoidFit};
use crate::error::AppError;
use crate::fit::{SolverOptions, fit_sigmoid};
use crate::io::export::{output_path, write_results_csv};
use crate::io::ingest::{IngestedData, load_samples};
use crate::io::summary::{build_summary, write_summary_json};

/// All computed outputs of a single `dbc fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub fit: SigmoidFit,
    /// Whether the quality score landed inside the acceptance window.
    pub accepted: bool,
    /// Files written, in order. Empty when the fit was rejected.
    pub written: Vec<PathBuf>,
}

/// Execute the full pipeline for `config.csv_path`.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_samples(&config.csv_path, config.delimiter)?;
    run_fit_with_data(config, ingest)
}

/// Execute the pipeline on already-ingested samples.
pub fn run_fit_with_data(config: &FitConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let opts = SolverOptions {
        max_iterations: config.max_iterations,
        ..SolverOptions::default()
    };
    let fit = fit_sigmoid(&ingest.samples, config.initial_guess, &opts)?;

    info!(
        k = fit.params.k,
        x0 = fit.params.x0,
        dbc_10 = fit.dbc_10,
        quality = fit.quality,
        iterations = fit.iterations,
        "fit converged"
    );

    if !config.quality_window.contains(fit.quality) {
        return Ok(RunOutput {
            ingest,
            fit,
            accepted: false,
            written: Vec::new(),
        });
    }

    let written = write_outputs(config, &ingest, &fit)?;
    Ok(RunOutput {
        ingest,
        fit,
        accepted: true,
        written,
    })
}

fn write_outputs(config: &FitConfig, ingest: &IngestedData, fit: &SigmoidFit) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(&config.out_dir).map_err(|e| {
        AppError::io(format!(
            "Failed to create output directory '{}': {e}",
            config.out_dir.display()
        ))
    })?;

    let mut written = Vec::new();

    let results = output_path(&config.out_dir, &ingest.path, "csv");
    write_results_csv(&results, &ingest.samples, fit)?;
    info!(path = %results.display(), "wrote results table");
    written.push(results);

    if config.plot {
        let plot = output_path(&config.out_dir, &ingest.path, "svg");
        crate::plot::render_fit_chart(&plot, ingest, fit, config)?;
        info!(path = %plot.display(), "wrote plot");
        written.push(plot);
    }

    if let Some(path) = &config.summary_json {
        let summary = build_summary(fit, ingest, config);
        write_summary_json(path, &summary)?;
        info!(path = %path.display(), "wrote fit summary");
        written.push(path.clone());
    }

    Ok(written)
}
