//! Plain-text bar chart sink.
//!
//! Each histogram bucket becomes one row: left edge, empirical density, a
//! bar scaled to the panel's tallest value, and the ideal curve evaluated at
//! the bucket midpoint (linear interpolation over the rendered curve).

use std::fmt::Write as FmtWrite;

use super::{HistogramSeries, VisualizationSink};
use crate::error::SimResult;

/// Default bar width in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Renders panels into a string buffer.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    output: String,
    bar_width: usize,
    curve: Vec<(f64, f64)>,
    labels: Vec<String>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl TextRenderer {
    /// Create a renderer with bars at most `bar_width` characters wide.
    #[must_use]
    pub fn new(bar_width: usize) -> Self {
        Self {
            output: String::new(),
            bar_width: bar_width.max(1),
            curve: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Everything rendered so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the renderer, returning its output.
    #[must_use]
    pub fn into_string(self) -> String {
        self.output
    }

    /// Interpolate the last rendered curve at `x`.
    fn ideal_at(&self, x: f64) -> Option<f64> {
        let (first, last) = (self.curve.first()?, self.curve.last()?);
        if x < first.0 || x > last.0 {
            return None;
        }
        self.curve.windows(2).find_map(|pair| {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if x < x0 || x > x1 {
                return None;
            }
            if (x1 - x0).abs() < f64::EPSILON {
                return Some(y0);
            }
            Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
        })
    }

    fn bar(&self, weight: f64, max: f64) -> String {
        if max <= 0.0 {
            return String::new();
        }
        let filled = ((weight / max) * self.bar_width as f64).round() as usize;
        "#".repeat(filled.min(self.bar_width))
    }
}

impl VisualizationSink for TextRenderer {
    fn set_title(&mut self, title: &str) -> SimResult<()> {
        self.curve.clear();
        self.labels.clear();
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let _ = writeln!(self.output, "{title}");
        let _ = writeln!(self.output, "{}", "=".repeat(title.chars().count()));
        Ok(())
    }

    fn render_curve(&mut self, points: &[(f64, f64)], label: &str) -> SimResult<()> {
        self.curve = points.to_vec();
        self.labels.push(format!("{label} (ideal column)"));
        Ok(())
    }

    fn render_histogram(&mut self, series: &HistogramSeries, label: &str) -> SimResult<()> {
        let max = series.max_weight();
        let half = series.width / 2.0;
        let _ = writeln!(
            self.output,
            "{:>10}  {:>10}  {:<width$}  {:>10}",
            "edge",
            "density",
            "",
            "ideal",
            width = self.bar_width
        );
        for (edge, weight) in series.left_edges.iter().zip(&series.weights) {
            let ideal = self
                .ideal_at(edge + half)
                .map_or_else(|| "-".to_string(), |y| format!("{y:.4}"));
            let bar = self.bar(*weight, max);
            let _ = writeln!(
                self.output,
                "{edge:>10.4}  {weight:>10.4}  {bar:<width$}  {ideal:>10}",
                width = self.bar_width
            );
        }
        self.labels.push(format!("{label} (bars)"));
        Ok(())
    }

    fn add_legend(&mut self) -> SimResult<()> {
        if !self.labels.is_empty() {
            let _ = writeln!(self.output, "Legend: {}", self.labels.join(", "));
        }
        Ok(())
    }
}
