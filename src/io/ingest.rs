//! Delimited-file ingest.
//!
//! Turns a headerless two-column table (loading, fraction breakthrough) into a
//! validated list of [`Sample`]s.
//!
//! - **Strict schema**: every row must have exactly two numeric fields
//! - **Fail fast**: the first bad row aborts the run with its line number
//! - Lines starting with `#` are comments; blank lines are skipped

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::Sample;
use crate::error::AppError;

/// Summary stats about the samples read.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_samples: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Ingest output: samples in file order plus their stats.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub path: PathBuf,
    pub samples: Vec<Sample>,
    pub stats: DatasetStats,
}

/// Open `path` and read its samples.
pub fn load_samples(path: &Path, delimiter: u8) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Problems reading file '{}': {e}", path.display())))?;

    let samples = read_samples(file, delimiter)?;
    let stats = compute_stats(&samples)
        .ok_or_else(|| AppError::invalid_data(format!("No data rows in '{}'.", path.display())))?;

    info!(
        path = %path.display(),
        n = stats.n_samples,
        x_min = stats.x_min,
        x_max = stats.x_max,
        "loaded samples"
    );
    if stats.y_min < 0.0 || stats.y_max > 1.0 {
        warn!(
            y_min = stats.y_min,
            y_max = stats.y_max,
            "fraction breakthrough outside [0, 1]"
        );
    }

    Ok(IngestedData {
        path: path.to_path_buf(),
        samples,
        stats,
    })
}

/// Parse samples from any reader.
pub fn read_samples<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Sample>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| match e.kind() {
            csv::ErrorKind::Io(_) => AppError::io(format!("Problems reading file: {e}")),
            _ => AppError::invalid_data(format!("Read invalid data: {e}")),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 2 {
            return Err(AppError::invalid_data(format!(
                "Read invalid data: line {line}: expected 2 columns, found {}.",
                record.len()
            )));
        }

        let x = parse_field(&record[0], line, "loading")?;
        let y = parse_field(&record[1], line, "breakthrough")?;
        samples.push(Sample::new(x, y));
    }

    Ok(samples)
}

fn parse_field(raw: &str, line: u64, column: &str) -> Result<f64, AppError> {
    let value: f64 = raw.parse().map_err(|_| {
        AppError::invalid_data(format!(
            "Read invalid data: line {line}: {column} '{raw}' is not a number."
        ))
    })?;
    if !value.is_finite() {
        return Err(AppError::invalid_data(format!(
            "Read invalid data: line {line}: {column} '{raw}' is not a finite number."
        )));
    }
    Ok(value)
}

fn compute_stats(samples: &[Sample]) -> Option<DatasetStats> {
    if samples.is_empty() {
        return None;
    }
    let mut stats = DatasetStats {
        n_samples: samples.len(),
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for s in samples {
        stats.x_min = stats.x_min.min(s.x);
        stats.x_max = stats.x_max.max(s.x);
        stats.y_min = stats.y_min.min(s.y);
        stats.y_max = stats.y_max.max(s.y);
    }
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{INVALID_DATA, IO_ERROR};

    #[test]
    fn reads_two_column_table() {
        let data = "0,0.01\n50, 0.05\n\n# comment\n70,0.5\n";
        let samples = read_samples(data.as_bytes(), b',').unwrap();
        assert_eq!(
            samples,
            vec![Sample::new(0.0, 0.01), Sample::new(50.0, 0.05), Sample::new(70.0, 0.5)]
        );
    }

    #[test]
    fn honours_delimiter() {
        let samples = read_samples("1.5\t0.2\n3\t0.4\n".as_bytes(), b'\t').unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Sample::new(3.0, 0.4));
    }

    #[test]
    fn wrong_column_count_is_invalid_data() {
        let err = read_samples("0,0.1\n1,0.2,5\n".as_bytes(), b',').unwrap_err();
        assert_eq!(err.exit_code(), INVALID_DATA);
        assert!(err.message().contains("line 2"), "{}", err.message());
        assert!(err.message().contains("expected 2 columns"), "{}", err.message());
    }

    #[test]
    fn non_numeric_is_invalid_data() {
        let err = read_samples("x,y\n0,0.1\n".as_bytes(), b',').unwrap_err();
        assert_eq!(err.exit_code(), INVALID_DATA);
        assert!(err.message().contains("line 1"), "{}", err.message());

        let err = read_samples("0,nan\n".as_bytes(), b',').unwrap_err();
        assert_eq!(err.exit_code(), INVALID_DATA);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_samples(Path::new("definitely/not/here.csv"), b',').unwrap_err();
        assert_eq!(err.exit_code(), IO_ERROR);
    }

    #[test]
    fn stats_cover_samples() {
        let stats = compute_stats(&[Sample::new(10.0, 0.2), Sample::new(-1.0, 0.9)]).unwrap();
        assert_eq!(stats.n_samples, 2);
        assert_eq!((stats.x_min, stats.x_max), (-1.0, 10.0));
        assert_eq!((stats.y_min, stats.y_max), (0.2, 0.9));
        assert!(compute_stats(&[]).is_none());
    }
}
