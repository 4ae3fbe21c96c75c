//! Formatted terminal output.
//!
//! Formatting lives in one place so the fitting code stays free of
//! presentation concerns and output changes are localized.

use crate::domain::{FitConfig, SigmoidFit};
use crate::io::ingest::IngestedData;
use crate::math::sum_squared_error;
use crate::report::FittedSample;

/// Format the run summary (dataset stats + fitted parameters + diagnostics).
pub fn format_run_summary(ingest: &IngestedData, fit: &SigmoidFit, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== dbc - Dynamic Binding Capacity ===\n");
    out.push_str(&format!("Input: {}\n", ingest.path.display()));
    out.push_str(&format!("Resin: {}\n", config.resin_type));
    out.push_str(&format!("Residence time: {}\n", config.residence_time));
    out.push_str(&format!(
        "Samples: n={} | loading=[{:.2}, {:.2}] | breakthrough=[{:.3}, {:.3}]\n",
        ingest.stats.n_samples,
        ingest.stats.x_min,
        ingest.stats.x_max,
        ingest.stats.y_min,
        ingest.stats.y_max
    ));

    out.push_str("\nFit:\n");
    out.push_str(&format!("- k      : {:.6}\n", fit.params.k));
    out.push_str(&format!("- x0     : {:.6}\n", fit.params.x0));
    out.push_str(&format!("- DBC 10%: {:.2} g/L\n", fit.dbc_10));
    out.push_str(&format!(
        "- R^2    : {:.4} (accepted range [{:.2}, {:.2}])\n",
        fit.quality,
        config.quality_window.lower(),
        config.quality_window.upper()
    ));
    out.push_str(&format!(
        "- solver : {} iterations, SSE={:.6e} (start k={}, x0={})\n",
        fit.iterations, fit.sse, config.initial_guess.k, config.initial_guess.x0
    ));

    out
}

/// Format the per-sample residual table, followed by the total SSE.
pub fn format_residuals(rows: &[FittedSample]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>12} {:>10} {:>10} {:>10}\n", "loading", "y_obs", "y_fit", "residual"));
    out.push_str(&format!("{:-<12} {:-<10} {:-<10} {:-<10}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:>12.3} {:>10.4} {:>10.4} {:>10.4}\n",
            r.sample.x, r.sample.y, r.y_fit, r.residual
        ));
    }

    let observed: Vec<f64> = rows.iter().map(|r| r.sample.y).collect();
    let fitted: Vec<f64> = rows.iter().map(|r| r.y_fit).collect();
    out.push_str(&format!("SSE = {:.6e}\n", sum_squared_error(&observed, &fitted)));
    out
}

/// Warning printed when the quality gate rejects a fit.
pub fn format_poor_fit(quality: f64) -> String {
    format!("WARNING: sigmoid fit is poor; r^2 = {quality:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sample;

    #[test]
    fn poor_fit_warning_rounds_to_two_places() {
        assert_eq!(format_poor_fit(1.4321), "WARNING: sigmoid fit is poor; r^2 = 1.43");
    }

    #[test]
    fn residual_table_has_row_per_sample() {
        let rows = [
            FittedSample {
                sample: Sample::new(10.0, 0.1),
                y_fit: 0.12,
                residual: -0.02,
            },
            FittedSample {
                sample: Sample::new(90.0, 0.9),
                y_fit: 0.88,
                residual: 0.02,
            },
        ];
        let text = format_residuals(&rows);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("-0.0200"));
        assert!(text.ends_with("SSE = 8.000000e-4\n"), "{text}");
    }
}
