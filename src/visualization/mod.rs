//! Visualization sinks.
//!
//! Scenarios never draw anything themselves; they hand an ideal curve and a
//! histogram series to a [`VisualizationSink`]:
//! - [`FigureRecorder`]: in-memory panels, serializable for export
//! - [`Exporter`]: writes recorded panels as JSON, JSON Lines, or CSV
//! - [`TextRenderer`]: plain-text bar chart for terminals
//!
//! # Example
//!
//! ```rust
//! use distsim::visualization::{FigureRecorder, VisualizationSink};
//!
//! let mut sink = FigureRecorder::new();
//! sink.set_title("Demo").unwrap();
//! sink.render_curve(&[(0.0, 1.0), (1.0, 0.0)], "Ideal Curve").unwrap();
//! sink.add_legend().unwrap();
//! assert_eq!(sink.panels()[0].legend, vec!["Ideal Curve".to_string()]);
//! ```

pub mod text;

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domains::histogram::DensityHistogram;
use crate::error::{SimError, SimResult};

pub use text::TextRenderer;

/// Receives the pieces of one comparison figure.
///
/// Call order per panel: `set_title`, any number of `render_curve` /
/// `render_histogram`, then `add_legend`.
pub trait VisualizationSink {
    /// Start a new panel with the given title.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot accept output.
    fn set_title(&mut self, title: &str) -> SimResult<()>;

    /// Draw an x/y curve.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot accept output.
    fn render_curve(&mut self, points: &[(f64, f64)], label: &str) -> SimResult<()>;

    /// Draw a weighted histogram.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot accept output.
    fn render_histogram(&mut self, series: &HistogramSeries, label: &str) -> SimResult<()>;

    /// Attach a legend naming every series drawn on the current panel.
    ///
    /// # Errors
    ///
    /// Returns error if the sink cannot accept output.
    fn add_legend(&mut self) -> SimResult<()>;
}

/// Bucket left edges plus per-bucket weights, ready for bar rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    /// Left edge of each bar.
    pub left_edges: Vec<f64>,
    /// Common bar width.
    pub width: f64,
    /// Bar heights (densities).
    pub weights: Vec<f64>,
}

impl HistogramSeries {
    /// Build plot coordinates from a trial result.
    #[must_use]
    pub fn from_histogram(histogram: &DensityHistogram) -> Self {
        Self {
            left_edges: histogram.left_edges(),
            width: histogram.bucket_step(),
            weights: histogram.densities.clone(),
        }
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when there are no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Largest bar height, zero when empty.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.weights.iter().copied().fold(0.0, f64::max)
    }
}

/// A named curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    /// Legend label.
    pub label: String,
    /// Curve samples.
    pub points: Vec<(f64, f64)>,
}

/// A named histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledHistogram {
    /// Legend label.
    pub label: String,
    /// Bars.
    pub series: HistogramSeries,
}

/// One titled subplot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Panel title.
    pub title: String,
    /// Curves in draw order.
    pub curves: Vec<CurveSeries>,
    /// Histograms in draw order.
    pub histograms: Vec<LabeledHistogram>,
    /// Legend entries, empty until `add_legend` is called.
    pub legend: Vec<String>,
}

impl Panel {
    fn series_labels(&self) -> Vec<String> {
        self.curves
            .iter()
            .map(|c| c.label.clone())
            .chain(self.histograms.iter().map(|h| h.label.clone()))
            .collect()
    }
}

/// Sink that records every call into in-memory panels.
#[derive(Debug, Clone, Default)]
pub struct FigureRecorder {
    panels: Vec<Panel>,
}

impl FigureRecorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded panels in order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Consume the recorder, returning its panels.
    #[must_use]
    pub fn into_panels(self) -> Vec<Panel> {
        self.panels
    }

    /// Serialize all panels as a pretty JSON array.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(&self.panels)
            .map_err(|e| SimError::serialization(format!("JSON serialization failed: {e}")))
    }

    fn current_panel(&mut self) -> &mut Panel {
        if self.panels.is_empty() {
            self.panels.push(Panel::default());
        }
        let last = self.panels.len() - 1;
        &mut self.panels[last]
    }
}

impl VisualizationSink for FigureRecorder {
    fn set_title(&mut self, title: &str) -> SimResult<()> {
        self.panels.push(Panel {
            title: title.to_string(),
            ..Panel::default()
        });
        Ok(())
    }

    fn render_curve(&mut self, points: &[(f64, f64)], label: &str) -> SimResult<()> {
        self.current_panel().curves.push(CurveSeries {
            label: label.to_string(),
            points: points.to_vec(),
        });
        Ok(())
    }

    fn render_histogram(&mut self, series: &HistogramSeries, label: &str) -> SimResult<()> {
        self.current_panel().histograms.push(LabeledHistogram {
            label: label.to_string(),
            series: series.clone(),
        });
        Ok(())
    }

    fn add_legend(&mut self) -> SimResult<()> {
        let panel = self.current_panel();
        panel.legend = panel.series_labels();
        Ok(())
    }
}

/// Forwards every call to two sinks, first `A` then `B`.
#[derive(Debug, Clone, Default)]
pub struct Tee<A, B> {
    /// First sink.
    pub first: A,
    /// Second sink.
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Pair two sinks.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Split back into the two sinks.
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: VisualizationSink, B: VisualizationSink> VisualizationSink for Tee<A, B> {
    fn set_title(&mut self, title: &str) -> SimResult<()> {
        self.first.set_title(title)?;
        self.second.set_title(title)
    }

    fn render_curve(&mut self, points: &[(f64, f64)], label: &str) -> SimResult<()> {
        self.first.render_curve(points, label)?;
        self.second.render_curve(points, label)
    }

    fn render_histogram(&mut self, series: &HistogramSeries, label: &str) -> SimResult<()> {
        self.first.render_histogram(series, label)?;
        self.second.render_histogram(series, label)
    }

    fn add_legend(&mut self) -> SimResult<()> {
        self.first.add_legend()?;
        self.second.add_legend()
    }
}

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// One JSON document holding every panel.
    #[default]
    Json,
    /// One panel per line.
    JsonLines,
    /// Flat rows: `panel,kind,label,x,y`.
    Csv,
}

impl ExportFormat {
    /// Pick a format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") => Self::JsonLines,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Writes recorded panels to disk.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter for the given format.
    #[must_use]
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Configured format.
    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Export panels to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if file operations or serialization fail.
    pub fn export(&self, panels: &[Panel], path: &Path) -> SimResult<()> {
        let file =
            File::create(path).map_err(|e| SimError::io(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        match self.format {
            ExportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, panels).map_err(|e| {
                    SimError::serialization(format!("JSON serialization failed: {e}"))
                })?;
                writeln!(writer).map_err(|e| SimError::io(format!("Write failed: {e}")))?;
            }
            ExportFormat::JsonLines => {
                for panel in panels {
                    let json = serde_json::to_string(panel).map_err(|e| {
                        SimError::serialization(format!("JSON serialization failed: {e}"))
                    })?;
                    writeln!(writer, "{json}")
                        .map_err(|e| SimError::io(format!("Write failed: {e}")))?;
                }
            }
            ExportFormat::Csv => {
                writer
                    .write_all(Self::to_csv(panels).as_bytes())
                    .map_err(|e| SimError::io(format!("Write failed: {e}")))?;
            }
        }

        writer
            .flush()
            .map_err(|e| SimError::io(format!("Flush failed: {e}")))?;
        Ok(())
    }

    /// Render panels as CSV rows.
    #[must_use]
    pub fn to_csv(panels: &[Panel]) -> String {
        let mut out = String::from("panel,kind,label,x,y\n");
        for panel in panels {
            let title = csv_field(&panel.title);
            for curve in &panel.curves {
                let label = csv_field(&curve.label);
                for (x, y) in &curve.points {
                    let _ = writeln!(out, "{title},curve,{label},{x},{y}");
                }
            }
            for hist in &panel.histograms {
                let label = csv_field(&hist.label);
                for (x, y) in hist.series.left_edges.iter().zip(&hist.series.weights) {
                    let _ = writeln!(out, "{title},histogram,{label},{x},{y}");
                }
            }
        }
        out
    }

    /// Read panels back from a JSON or JSON Lines export.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or if the
    /// exporter is configured for CSV.
    pub fn read(&self, path: &Path) -> SimResult<Vec<Panel>> {
        let content = std::fs::read_to_string(path)?;
        match self.format {
            ExportFormat::Json => Ok(serde_json::from_str(&content)?),
            ExportFormat::JsonLines => content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| serde_json::from_str(line).map_err(SimError::from))
                .collect(),
            ExportFormat::Csv => Err(SimError::serialization("CSV exports are write-only")),
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
