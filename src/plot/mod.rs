//! Breakthrough chart rendering.
//!
//! Plot elements:
//! - observed samples: markers
//! - fitted curve: line over the plot domain
//! - annotations: resin, residence time, DBC 10%, quality score, equation

use std::path::Path;

use crate::domain::{FitConfig, FitSummary, SigmoidFit};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::models::sample_curve;

pub mod chart;

pub use chart::BreakthroughChart;

/// Number of points used to draw the fitted curve.
pub const CURVE_POINTS: usize = 200;

/// Default loading axis; widened when the data extends beyond it.
const DOMAIN_MIN: f64 = -1.0;
const DOMAIN_MAX: f64 = 200.0;

/// Loading range the fitted curve is drawn over.
pub fn plot_domain(x_min: f64, x_max: f64) -> (f64, f64) {
    (x_min.min(DOMAIN_MIN), x_max.max(DOMAIN_MAX))
}

/// Breakthrough axis: at least `[0, 1]`, padded by 5%.
pub fn breakthrough_bounds(y_min: f64, y_max: f64) -> (f64, f64) {
    (y_min.min(0.0) - 0.05, y_max.max(1.0) + 0.05)
}

/// Annotation lines describing a fit.
pub fn fit_annotations(fit: &SigmoidFit, resin_type: &str, residence_time: &str) -> Vec<String> {
    vec![
        format!("Resin: {resin_type}"),
        format!("Residence Time: {residence_time}"),
        format!("DBC 10% = {:.1} g/L", fit.dbc_10),
        format!("R^2 = {:.3}", fit.quality),
        format!(
            "y = 1 / (1 + e^(-k(x - x0)))  (k = {:.3}, x0 = {:.1})",
            fit.params.k, fit.params.x0
        ),
    ]
}

/// Chart title for an input file.
pub fn chart_title(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("Dynamic Binding Capacity 10% Curve for {name}")
}

/// Render the raw samples and the fitted curve to an SVG file.
pub fn render_fit_chart(
    path: &Path,
    ingest: &IngestedData,
    fit: &SigmoidFit,
    config: &FitConfig,
) -> Result<(), AppError> {
    let (x_min, x_max) = plot_domain(ingest.stats.x_min, ingest.stats.x_max);
    let (y_min, y_max) = breakthrough_bounds(ingest.stats.y_min, ingest.stats.y_max);

    let curve = sample_curve(&fit.params, x_min, x_max, CURVE_POINTS);
    let points: Vec<(f64, f64)> = ingest.samples.iter().map(|s| (s.x, s.y)).collect();

    BreakthroughChart {
        title: chart_title(&ingest.path),
        curve: &curve,
        points: &points,
        annotations: fit_annotations(fit, &config.resin_type, &config.residence_time),
        x_bounds: [x_min, x_max],
        y_bounds: [y_min, y_max],
    }
    .render_svg(path)
}

/// Re-render a chart from a saved summary (curve only, no raw samples).
pub fn render_summary_chart(path: &Path, summary: &FitSummary) -> Result<(), AppError> {
    let curve: Vec<(f64, f64)> = summary
        .grid
        .loading
        .iter()
        .copied()
        .zip(summary.grid.breakthrough.iter().copied())
        .collect();
    if curve.len() < 2 {
        return Err(AppError::invalid_data("Summary JSON has no fitted grid to plot."));
    }

    let x_min = curve.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = curve.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = curve.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = curve.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = breakthrough_bounds(y_min, y_max);

    BreakthroughChart {
        title: chart_title(Path::new(&summary.input)),
        curve: &curve,
        points: &[],
        annotations: fit_annotations(&summary.fit, &summary.resin_type, &summary.residence_time),
        x_bounds: [x_min, x_max],
        y_bounds: [y_min, y_max],
    }
    .render_svg(path)
}
