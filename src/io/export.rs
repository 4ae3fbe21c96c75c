//! Results table export.
//!
//! Layout (headerless, three columns, one row per sample):
//!
//! ```text
//! x_0, y_0, k
//! x_1, y_1, x0
//! x_2, y_2, dbc_10
//! x_3, y_3, quality
//! x_4, y_4, 0
//! ...
//! ```
//!
//! Datasets with fewer than four samples get padding rows with empty x/y cells
//! so all four statistics are always present.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{Sample, SigmoidFit};
use crate::error::AppError;

/// Output file stem for an input path: `data/run1.csv` -> `run1_stats`.
pub fn output_stem(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dbc".to_string());
    format!("{stem}_stats")
}

/// `<out_dir>/<stem>.<ext>`
pub fn output_path(out_dir: &Path, input: &Path, ext: &str) -> PathBuf {
    out_dir.join(format!("{}.{ext}", output_stem(input)))
}

/// Write the results table to `path`.
pub fn write_results_csv(path: &Path, samples: &[Sample], fit: &SigmoidFit) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create results file '{}': {e}", path.display())))?;
    write_results(file, samples, fit)
        .map_err(|e| AppError::io(format!("Failed to write results file '{}': {e}", path.display())))
}

/// Write the results table to any writer.
pub fn write_results<W: Write>(writer: W, samples: &[Sample], fit: &SigmoidFit) -> Result<(), csv::Error> {
    let stats = [fit.params.k, fit.params.x0, fit.dbc_10, fit.quality];
    let rows = samples.len().max(stats.len());

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    for i in 0..rows {
        let stat = stats.get(i).copied().unwrap_or(0.0).to_string();
        match samples.get(i) {
            Some(s) => wtr.write_record([s.x.to_string(), s.y.to_string(), stat])?,
            None => wtr.write_record([String::new(), String::new(), stat])?,
        }
    }
    wtr.flush()?;
    Ok(())
}
