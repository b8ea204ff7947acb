use std::path::PathBuf;

use super::{ChartData, ChartOutput, ChartRenderer, ReportError};

/// Temp file used when a chart is shown without an explicit `--out`.
pub const SHOW_FILE: &str = "sssp-compare.svg";

/// Renderer of this build: `PlottersRenderer` with the `plot` feature,
/// [`NoRenderer`] without.
#[cfg(feature = "plot")]
pub fn default_renderer() -> Box<dyn ChartRenderer> {
    Box::new(PlottersRenderer)
}

#[cfg(not(feature = "plot"))]
pub fn default_renderer() -> Box<dyn ChartRenderer> {
    Box::new(NoRenderer)
}

/// Fails every request with [`ReportError::MissingCapability`], unless
/// nothing is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRenderer;

impl ChartRenderer for NoRenderer {
    fn render(
        &self,
        _data: &ChartData,
        output: &ChartOutput,
    ) -> Result<Option<PathBuf>, ReportError> {
        match output.target(SHOW_FILE) {
            Some(_) => Err(ReportError::MissingCapability),
            None => Ok(None),
        }
    }
}

#[cfg(feature = "plot")]
pub use self::plot::PlottersRenderer;

#[cfg(feature = "plot")]
mod plot {
    use std::path::{Path, PathBuf};

    use log::info;
    use ordered_float::OrderedFloat;
    use plotters::{coord::Shift, prelude::*};

    use crate::{
        report::{ChartData, ChartOutput, ChartRenderer, OutputFormat, ReportError},
        units::format_value,
    };

    use super::SHOW_FILE;

    const SERIES_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(214, 39, 40)];

    impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ReportError {
        fn from(value: DrawingAreaErrorKind<E>) -> Self {
            Self::Render(value.to_string())
        }
    }

    /// Line chart with one marker per label, each finite point annotated.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PlottersRenderer;

    impl ChartRenderer for PlottersRenderer {
        fn render(
            &self,
            data: &ChartData,
            output: &ChartOutput,
        ) -> Result<Option<PathBuf>, ReportError> {
            let Some(path) = output.target(SHOW_FILE) else {
                return Ok(None);
            };
            if data.labels.is_empty() {
                return Err(ReportError::EmptyChart);
            }

            let size = output.size(data.labels.len());
            render_to(&path, size, data)?;

            info!("Chart written to {}", path.display());
            Ok(Some(path))
        }
    }

    /// Something that draws itself onto any backend.
    pub(crate) trait Drawing {
        fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>)
        -> Result<(), ReportError>;
    }

    impl Drawing for ChartData {
        fn draw_on<DB: DrawingBackend>(
            &self,
            root: &DrawingArea<DB, Shift>,
        ) -> Result<(), ReportError> {
            comparison_chart(root, self)
        }
    }

    /// Opens the backend matching the extension of `path` and draws on it.
    pub(crate) fn render_to<D: Drawing>(
        path: &Path,
        size: (u32, u32),
        drawing: &D,
    ) -> Result<(), ReportError> {
        let format = OutputFormat::from_path(path)?;
        // Bitmap backends draw text through the system font loader only.
        if format == OutputFormat::Bitmap && !cfg!(feature = "ttf") {
            return Err(ReportError::NoFonts);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            OutputFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                drawing.draw_on(&root)?;
                root.present()?;
            }
            OutputFormat::Bitmap => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                drawing.draw_on(&root)?;
                root.present()?;
            }
        }

        Ok(())
    }

    fn comparison_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &ChartData,
    ) -> Result<(), ReportError> {
        root.fill(&WHITE)?;

        let y_max = data
            .series
            .iter()
            .flat_map(|s| s.values.iter())
            .filter(|v| v.is_finite())
            .map(|v| OrderedFloat(*v))
            .max()
            .map(|max| max.0)
            .filter(|max| *max > 0.0)
            .unwrap_or(1.0);

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d((0..data.labels.len()).into_segmented(), 0.0..y_max * 1.15)?;

        let label_of = |value: &SegmentValue<usize>| match value {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                data.labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(&WHITE)
            .bold_line_style(BLACK.mix(0.15).stroke_width(1))
            .x_labels(data.labels.len())
            .x_label_formatter(&label_of)
            .y_label_formatter(&|v| format_value(*v))
            .y_desc(data.y_label())
            .draw()?;

        for (series, color) in data.series.iter().zip(SERIES_COLORS) {
            let points: Vec<(SegmentValue<usize>, f64)> = series
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (SegmentValue::CenterOf(i), *v))
                .collect();

            // Missing values break the line instead of bridging it.
            let mut runs: Vec<Vec<(SegmentValue<usize>, f64)>> = vec![vec![]];
            for (i, v) in series.values.iter().enumerate() {
                if v.is_finite() {
                    if let Some(run) = runs.last_mut() {
                        run.push((SegmentValue::CenterOf(i), *v));
                    }
                } else if runs.last().is_some_and(|run| !run.is_empty()) {
                    runs.push(vec![]);
                }
            }

            chart
                .draw_series(
                    runs.into_iter()
                        .map(|run| PathElement::new(run, color.stroke_width(2))),
                )?
                .label(&series.name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });

            chart.draw_series(points.iter().map(|(x, y)| {
                EmptyElement::at((x.clone(), *y))
                    + Circle::new((0, 0), 4, color.filled())
                    + Text::new(
                        format_value(*y),
                        (-12, -20),
                        ("sans-serif", 12).into_font().color(&color),
                    )
            }))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        Ok(())
    }

}

#[cfg(feature = "plot")]
pub(crate) use self::plot::{Drawing, render_to};
