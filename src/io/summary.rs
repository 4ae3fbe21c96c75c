//! Read/write the JSON fit summary.
//!
//! The summary is the portable record of one run:
//! - run metadata (input, resin, residence time, timestamp)
//! - initial guess, fitted parameters and derived statistics
//! - a precomputed fitted grid for quick re-plotting
//!
//! The schema is defined by `domain::FitSummary`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::domain::{CurveGrid, FitConfig, FitSummary, SigmoidFit};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::models::sample_curve;
use crate::plot::plot_domain;

const GRID_POINTS: usize = 101;

/// Assemble the summary for a finished run.
pub fn build_summary(fit: &SigmoidFit, ingest: &IngestedData, config: &FitConfig) -> FitSummary {
    let (x_min, x_max) = plot_domain(ingest.stats.x_min, ingest.stats.x_max);
    let (loading, breakthrough): (Vec<f64>, Vec<f64>) = sample_curve(&fit.params, x_min, x_max, GRID_POINTS)
        .into_iter()
        .unzip();

    FitSummary {
        tool: "dbc".to_string(),
        generated: Local::now().to_rfc3339(),
        input: ingest.path.display().to_string(),
        resin_type: config.resin_type.clone(),
        residence_time: config.residence_time.clone(),
        initial_guess: config.initial_guess,
        fit: *fit,
        quality_window: config.quality_window,
        grid: CurveGrid {
            loading,
            breakthrough,
        },
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &FitSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::io(format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<FitSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::invalid_data(format!("Invalid summary JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::{QualityWindow, Sample, SigmoidParams};
    use crate::io::ingest::DatasetStats;

    #[test]
    fn summary_grid_spans_plot_domain() {
        let fit = SigmoidFit {
            params: SigmoidParams::new(0.2, 80.0),
            dbc_10: 80.0 - 9.0_f64.ln() / 0.2,
            quality: 0.99,
            iterations: 7,
            sse: 0.001,
        };
        let ingest = IngestedData {
            path: PathBuf::from("run.csv"),
            samples: vec![Sample::new(0.0, 0.0), Sample::new(250.0, 1.0)],
            stats: DatasetStats {
                n_samples: 2,
                x_min: 0.0,
                x_max: 250.0,
                y_min: 0.0,
                y_max: 1.0,
            },
        };
        let config = FitConfig {
            csv_path: PathBuf::from("run.csv"),
            delimiter: b',',
            resin_type: "Protein A".to_string(),
            residence_time: "4 min".to_string(),
            initial_guess: SigmoidParams::default(),
            max_iterations: 200,
            quality_window: QualityWindow::default(),
            out_dir: PathBuf::from("."),
            plot: false,
            summary_json: None,
        };

        let summary = build_summary(&fit, &ingest, &config);
        assert_eq!(summary.grid.loading.len(), GRID_POINTS);
        assert_eq!(summary.grid.loading[0], -1.0);
        assert_eq!(*summary.grid.loading.last().unwrap(), 250.0);
        assert_eq!(summary.resin_type, "Protein A");

        let json = serde_json::to_string(&summary).unwrap();
        let back: FitSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.fit, fit);
    }
}
