//! Charts and summaries of timing tables.
//!
//! Everything here consumes plain data ([`ChartData`], [`summary::Comparison`]).
//! The drawing backend sits behind [`ChartRenderer`] and is only compiled
//! with the `plot` feature.

pub mod chart;
pub mod summary;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::units::{TimeUnit, TimingTable};

pub use chart::default_renderer;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(
        "rendering is not available in this build, rebuild with `--features plot` \
         or write the timings with --write-csv"
    )]
    MissingCapability,

    #[error("unsupported output format '{0}' (expected svg, png, jpg, jpeg or bmp)")]
    UnsupportedFormat(String),

    #[error(
        "raster output needs the `ttf` feature for its text, \
         write an .svg file or rebuild with `--features ttf`"
    )]
    NoFonts,

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error("nothing to draw")]
    EmptyChart,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// One chart: a title, the unit of every value, the ordered x labels and
/// one series per engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub unit: TimeUnit,
    pub labels: Vec<String>,
    pub series: [Series; 2],
}

impl ChartData {
    pub fn from_table(table: &TimingTable, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            unit: table.unit,
            labels: table.labels.clone(),
            series: [
                Series {
                    name: "Dijkstra".into(),
                    values: table.non_negative.clone(),
                },
                Series {
                    name: "Bellman-Ford".into(),
                    values: table.tolerant.clone(),
                },
            ],
        }
    }

    pub fn y_label(&self) -> String {
        format!("Time ({})", self.unit)
    }
}

/// Where a rendered chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOutput {
    /// Image file, format picked by extension.
    pub out: Option<PathBuf>,

    /// Render even without `out`, into the temp directory.
    pub show: bool,

    /// Fixed width in pixels. `None` grows with the number of labels.
    pub width: Option<u32>,

    pub height: u32,
}

impl Default for ChartOutput {
    fn default() -> Self {
        Self {
            out: None,
            show: true,
            width: None,
            height: 450,
        }
    }
}

impl ChartOutput {
    /// `(width, height)` for a chart with `labels` x positions.
    pub fn size(&self, labels: usize) -> (u32, u32) {
        let labels = u32::try_from(labels).unwrap_or(u32::MAX);
        let width = self
            .width
            .unwrap_or_else(|| labels.saturating_mul(120).max(600));
        (width, self.height)
    }

    /// File to draw into. `None` means nothing should be drawn.
    pub fn target(&self, temp_name: &str) -> Option<PathBuf> {
        match &self.out {
            Some(out) => Some(out.clone()),
            None if self.show => Some(std::env::temp_dir().join(temp_name)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Bitmap,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "svg" => Ok(Self::Svg),
            "png" | "jpg" | "jpeg" | "bmp" => Ok(Self::Bitmap),
            _ => Err(ReportError::UnsupportedFormat(extension)),
        }
    }
}

pub trait ChartRenderer {
    /// Draws `data` as described by `output` and returns the written file,
    /// or `None` if nothing was requested.
    fn render(&self, data: &ChartData, output: &ChartOutput)
    -> Result<Option<PathBuf>, ReportError>;
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::units::{TimeUnit, TimingTable};

    use super::*;

    #[test]
    fn chart_from_table() {
        let mut table = TimingTable::new(TimeUnit::Millis);
        table.push("G1", 1.5, 3.2);
        table.push("G2", f64::NAN, 4.0);

        let data = ChartData::from_table(&table, "title");

        assert_eq!(data.labels, vec!["G1", "G2"]);
        assert_eq!(data.series[0].name, "Dijkstra");
        assert_eq!(data.series[1].values, vec![3.2, 4.0]);
        assert!(data.series[0].values[1].is_nan());
        assert_eq!(data.y_label(), "Time (ms)");
    }

    #[test]
    fn width_grows_with_labels() {
        let output = ChartOutput::default();

        assert_eq!(output.size(2), (600, 450));
        assert_eq!(output.size(10), (1200, 450));

        let fixed = ChartOutput {
            width: Some(300),
            ..Default::default()
        };
        assert_eq!(fixed.size(10), (300, 450));
    }

    #[test]
    fn render_target() {
        let hidden = ChartOutput {
            show: false,
            ..Default::default()
        };
        assert_eq!(hidden.target("chart.svg"), None);

        let shown = ChartOutput::default();
        assert_eq!(
            shown.target("chart.svg"),
            Some(std::env::temp_dir().join("chart.svg"))
        );

        let file = ChartOutput {
            out: Some(PathBuf::from("out/chart.png")),
            show: false,
            ..Default::default()
        };
        assert_eq!(file.target("chart.svg"), Some(PathBuf::from("out/chart.png")));
    }

    #[test]
    fn format_by_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a.SVG")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a.jpeg")).unwrap(),
            OutputFormat::Bitmap
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.pdf")),
            Err(ReportError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
        assert!(OutputFormat::from_path(Path::new("chart")).is_err());
    }
}
