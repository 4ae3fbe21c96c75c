//! Plotters-powered breakthrough chart, rendered to SVG.
//!
//! The SVG backend writes `<text>` elements directly, so labels need no font
//! rasterizer (and no native font dependencies).

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 650;

/// Figure-relative position of the first annotation line.
const ANNOTATION_X: f64 = 0.5;
const ANNOTATION_Y: f64 = 0.6;
const ANNOTATION_LINE_PX: i32 = 20;

/// A render-only chart description.
///
/// All series and bounds are computed by the caller; `render_svg` only draws.
pub struct BreakthroughChart<'a> {
    pub title: String,
    /// Fitted curve (line).
    pub curve: &'a [(f64, f64)],
    /// Observed samples (markers).
    pub points: &'a [(f64, f64)],
    /// Free-text lines drawn inside the figure.
    pub annotations: Vec<String>,
    /// X bounds (resin loading).
    pub x_bounds: [f64; 2],
    /// Y bounds (fraction breakthrough).
    pub y_bounds: [f64; 2],
}

impl BreakthroughChart<'_> {
    /// Draw the chart into an SVG file at `path`.
    pub fn render_svg(&self, path: &Path) -> Result<(), AppError> {
        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return Err(AppError::io(format!(
                "Cannot plot '{}': invalid axis bounds.",
                path.display()
            )));
        }

        self.draw(path)
            .map_err(|e| AppError::io(format!("Failed to write plot '{}': {e}", path.display())))
    }

    fn draw(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 22).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(self.x_bounds[0]..self.x_bounds[1], self.y_bounds[0]..self.y_bounds[1])?;

        chart
            .configure_mesh()
            .x_desc("Resin Loading (g/L_resin)")
            .y_desc("Fraction Breakthrough")
            .x_labels(10)
            .y_labels(11)
            .y_label_formatter(&|v| format!("{v:.1}"))
            .draw()?;

        let curve_color = RGBColor(31, 119, 180);
        let point_color = RGBColor(255, 127, 14);

        chart
            .draw_series(LineSeries::new(self.curve.iter().copied(), &curve_color))?
            .label("fit")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], curve_color));

        if !self.points.is_empty() {
            chart
                .draw_series(
                    self.points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, point_color.filled())),
                )?
                .label("raw_data")
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, point_color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        let font = ("sans-serif", 15).into_font();
        let left = (ANNOTATION_X * WIDTH as f64) as i32;
        let top = (ANNOTATION_Y * HEIGHT as f64) as i32;
        for (i, line) in self.annotations.iter().enumerate() {
            root.draw(&Text::new(
                line.as_str(),
                (left, top + i as i32 * ANNOTATION_LINE_PX),
                font.clone(),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}
