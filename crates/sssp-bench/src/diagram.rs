//! Drawing of a [`PathFile`]: vertices on a circle, the route in red.

use std::{f64::consts::PI, path::PathBuf};

use crate::{
    export::PathFile,
    report::{ChartOutput, ReportError},
};

/// Temp file used when a diagram is shown without an explicit `--out`.
pub const SHOW_FILE: &str = "sssp-diagram.svg";

/// Default `(width, height)` of a diagram.
pub const DIAGRAM_SIZE: (u32, u32) = (1200, 800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Start,
    End,
    OnPath,
    Other,
}

impl NodeRole {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "Start node",
            Self::End => "End node",
            Self::OnPath => "Path node",
            Self::Other => "Other node",
        }
    }

    /// Fill colour as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Start => (144, 238, 144),
            Self::End => (240, 128, 128),
            Self::OnPath => (255, 255, 224),
            Self::Other => (173, 216, 230),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    pub label: String,
    pub position: (f64, f64),
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub source: usize,
    pub target: usize,
    pub weight: i64,
    pub on_path: bool,
}

/// Positions and styling of everything in the diagram, independent of the
/// drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl Layout {
    pub fn new(file: &PathFile, title: impl Into<String>) -> Self {
        let node_count = file.node_count();
        let route: Vec<usize> = file
            .route
            .iter()
            .copied()
            .filter(|v| *v < node_count)
            .collect();

        let role = |node: usize| match (route.first(), route.last()) {
            (Some(start), _) if *start == node => NodeRole::Start,
            (_, Some(end)) if *end == node => NodeRole::End,
            _ if route.contains(&node) => NodeRole::OnPath,
            _ => NodeRole::Other,
        };

        let nodes = file
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| DiagramNode {
                label: label.clone(),
                position: circle_position(i, node_count),
                role: role(i),
            })
            .collect();

        let edges = file
            .edges
            .iter()
            .filter(|(s, t, _)| *s < node_count && *t < node_count)
            .map(|&(source, target, weight)| DiagramEdge {
                source,
                target,
                weight,
                on_path: route.windows(2).any(|hop| hop == [source, target]),
            })
            .collect();

        Self {
            title: title.into(),
            nodes,
            edges,
        }
    }
}

/// Vertex `i` of `n` on the unit circle, clockwise from the top.
fn circle_position(i: usize, n: usize) -> (f64, f64) {
    if n <= 1 {
        return (0.0, 0.0);
    }
    let angle = PI / 2.0 - 2.0 * PI * i as f64 / n as f64;
    (angle.cos(), angle.sin())
}

/// Draws `file` as described by `output`. Returns the written file, or
/// `None` if nothing was requested.
pub fn render_diagram(
    file: &PathFile,
    title: &str,
    output: &ChartOutput,
) -> Result<Option<PathBuf>, ReportError> {
    let Some(path) = output.target(SHOW_FILE) else {
        return Ok(None);
    };
    if file.labels.is_empty() {
        return Err(ReportError::EmptyChart);
    }

    draw_layout(&Layout::new(file, title), path, output)
}

#[cfg(not(feature = "plot"))]
fn draw_layout(
    _layout: &Layout,
    _path: PathBuf,
    _output: &ChartOutput,
) -> Result<Option<PathBuf>, ReportError> {
    Err(ReportError::MissingCapability)
}

#[cfg(feature = "plot")]
fn draw_layout(
    layout: &Layout,
    path: PathBuf,
    output: &ChartOutput,
) -> Result<Option<PathBuf>, ReportError> {
    let size = (output.width.unwrap_or(DIAGRAM_SIZE.0), output.height);
    crate::report::chart::render_to(&path, size, layout)?;

    log::info!("Diagram written to {}", path.display());
    Ok(Some(path))
}

#[cfg(feature = "plot")]
mod plot {
    use plotters::{
        coord::Shift,
        prelude::*,
        style::text_anchor::{HPos, Pos, VPos},
    };

    use crate::report::{ReportError, chart::Drawing};

    use super::{Layout, NodeRole};

    const EDGE_GRAY: RGBColor = RGBColor(128, 128, 128);
    const NODE_PIXELS: i32 = 16;
    /// Node radius in layout units, edges stop there.
    const NODE_RADIUS: f64 = 0.07;
    const ARROW: f64 = 0.06;
    /// Sideways shift of each edge so that both directions stay visible.
    const EDGE_OFFSET: f64 = 0.025;

    fn color(role: NodeRole) -> RGBColor {
        let (r, g, b) = role.rgb();
        RGBColor(r, g, b)
    }

    impl Drawing for Layout {
        fn draw_on<DB: DrawingBackend>(
            &self,
            root: &DrawingArea<DB, Shift>,
        ) -> Result<(), ReportError> {
            root.fill(&WHITE)?;

            let (width, height) = root.dim_in_pixel();
            let aspect = f64::from(width) / f64::from(height.max(1));
            let reach = 1.25;

            let mut chart = ChartBuilder::on(root)
                .caption(&self.title, ("sans-serif", 22))
                .margin(20)
                .build_cartesian_2d(-reach * aspect..reach * aspect, -reach..reach)?;

            let weight_style = ("sans-serif", 13).into_font().color(&BLACK);

            // Route edges last so they stay on top.
            let ordered = self
                .edges
                .iter()
                .filter(|e| !e.on_path)
                .chain(self.edges.iter().filter(|e| e.on_path));

            for edge in ordered {
                let (color, width) = if edge.on_path {
                    (RED, 4)
                } else {
                    (EDGE_GRAY, 2)
                };
                let from = self.nodes[edge.source].position;
                let to = self.nodes[edge.target].position;

                if edge.source == edge.target {
                    let at = (from.0, from.1 + NODE_RADIUS * 1.8);
                    chart.draw_series([Text::new(
                        format!("\u{21bb} {}", edge.weight),
                        at,
                        weight_style.clone(),
                    )])?;
                    continue;
                }

                let (dx, dy) = (to.0 - from.0, to.1 - from.1);
                let length = dx.hypot(dy);
                let (ux, uy) = (dx / length, dy / length);
                let (nx, ny) = (uy * EDGE_OFFSET, -ux * EDGE_OFFSET);

                let tail = (from.0 + ux * NODE_RADIUS + nx, from.1 + uy * NODE_RADIUS + ny);
                let tip = (to.0 - ux * NODE_RADIUS + nx, to.1 - uy * NODE_RADIUS + ny);
                let base = (tip.0 - ux * ARROW, tip.1 - uy * ARROW);
                let head = vec![
                    tip,
                    (base.0 + uy * ARROW / 2.0, base.1 - ux * ARROW / 2.0),
                    (base.0 - uy * ARROW / 2.0, base.1 + ux * ARROW / 2.0),
                ];

                chart.draw_series([PathElement::new(vec![tail, base], color.stroke_width(width))])?;
                chart.draw_series([Polygon::new(head, color.filled())])?;

                let middle = (
                    (tail.0 + tip.0) / 2.0 + nx * 1.5,
                    (tail.1 + tip.1) / 2.0 + ny * 1.5,
                );
                chart.draw_series([Text::new(
                    edge.weight.to_string(),
                    middle,
                    weight_style.clone(),
                )])?;
            }

            let label_style = ("sans-serif", 14)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center));

            chart.draw_series(self.nodes.iter().map(|node| {
                EmptyElement::at(node.position)
                    + Circle::new((0, 0), NODE_PIXELS, color(node.role).filled())
                    + Circle::new((0, 0), NODE_PIXELS, BLACK.stroke_width(1))
                    + Text::new(node.label.clone(), (0, 0), label_style.clone())
            }))?;

            for role in [NodeRole::Start, NodeRole::End, NodeRole::OnPath, NodeRole::Other] {
                let fill = color(role);
                chart
                    .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                    .label(role.name())
                    .legend(move |(x, y)| Circle::new((x + 10, y), 6, fill.filled()));
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
}

#[cfg(test)]
mod tests {
    use crate::{export::PathFile, report::ChartOutput};

    use super::{Layout, NodeRole, render_diagram};

    fn file() -> PathFile {
        PathFile {
            labels: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            edges: vec![(0, 1, 4), (0, 2, 1), (2, 1, 1), (1, 3, 5), (2, 3, 9)],
            route: vec![0, 2, 1, 3],
        }
    }

    #[test]
    fn roles_and_path_edges() {
        let layout = Layout::new(&file(), "t");
        let roles: Vec<_> = layout.nodes.iter().map(|n| n.role).collect();

        assert_eq!(
            roles,
            vec![NodeRole::Start, NodeRole::OnPath, NodeRole::OnPath, NodeRole::End]
        );
        let on_path: Vec<_> = layout
            .edges
            .iter()
            .filter(|e| e.on_path)
            .map(|e| (e.source, e.target))
            .collect();
        assert_eq!(on_path, vec![(0, 2), (2, 1), (1, 3)]);
    }

    #[test]
    fn without_route_every_node_is_other() {
        let mut file = file();
        file.route.clear();
        let layout = Layout::new(&file, "t");

        assert!(layout.nodes.iter().all(|n| n.role == NodeRole::Other));
        assert!(layout.edges.iter().all(|e| !e.on_path));
    }

    #[test]
    fn circular_positions() {
        let layout = Layout::new(&file(), "t");
        let (x, y) = layout.nodes[0].position;

        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9, "first node on top");
        for node in &layout.nodes {
            let (x, y) = node.position;
            assert!((x.hypot(y) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn out_of_range_route_entries_are_ignored() {
        let mut file = file();
        file.route = vec![0, 9, 1];
        let layout = Layout::new(&file, "t");

        assert_eq!(layout.nodes[1].role, NodeRole::End);
        assert!(layout.edges.iter().any(|e| e.on_path && (e.source, e.target) == (0, 1)));
    }

    #[test]
    fn nothing_requested() {
        let output = ChartOutput {
            show: false,
            ..Default::default()
        };

        assert_eq!(render_diagram(&file(), "t", &output).unwrap(), None);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diagram.svg");
        let output = ChartOutput {
            out: Some(out.clone()),
            show: false,
            width: Some(600),
            height: 400,
        };

        assert_eq!(
            render_diagram(&file(), "Shortest path", &output).unwrap(),
            Some(out.clone())
        );
        let svg = std::fs::read_to_string(out).unwrap();
        assert!(svg.contains("Start node"));
        assert!(svg.contains("Shortest path"));
    }

    #[cfg(all(feature = "plot", not(feature = "ttf")))]
    #[test]
    fn png_needs_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let output = ChartOutput {
            out: Some(dir.path().join("diagram.png")),
            show: false,
            ..Default::default()
        };

        assert!(matches!(
            render_diagram(&file(), "t", &output),
            Err(crate::report::ReportError::NoFonts)
        ));
    }
}
