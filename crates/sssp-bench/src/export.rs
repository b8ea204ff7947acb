//! Graph with one highlighted route, as read by the `diagram` command:
//!
//! ```text
//! V
//! label_1 ... label_V
//! src dst weight    (1-based, any number of lines)
//!
//! PATH:
//! v_1 ... v_k       (1-based)
//! ```

use std::{fmt::Write as _, fs, path::Path};

use graph_rs::{algorithms::ShortestPaths, input::GraphText};
use log::{debug, info};

use crate::{Error, Result};

const PATH_MARKER: &str = "PATH:";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathFile {
    pub labels: Vec<String>,
    /// Zero-based `(source, target, weight)`.
    pub edges: Vec<(usize, usize, i64)>,
    /// Zero-based vertices from start to end. Empty if there is no route.
    pub route: Vec<usize>,
}

impl PathFile {
    /// Graph of `graph` with the route to `target` in `paths`, edges ordered
    /// by source vertex.
    pub fn from_shortest_path(
        graph: &GraphText<i64>,
        paths: &ShortestPaths<i64>,
        target: usize,
    ) -> Self {
        let mut edges: Vec<_> = graph.edges.edges().collect();
        edges.sort_by_key(|(source, _, _)| *source);

        let route = paths
            .path(target)
            .map(|path| path.nodes().collect())
            .unwrap_or_default();

        Self {
            labels: graph.labels.clone(),
            edges,
            route,
        }
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();

        let _ = writeln!(text, "{}", self.labels.len());
        let _ = writeln!(text, "{}", self.labels.join(" "));
        for (source, target, weight) in &self.edges {
            let _ = writeln!(text, "{} {} {weight}", source + 1, target + 1);
        }
        let _ = writeln!(text, "\n{PATH_MARKER}");
        let route: Vec<String> = self.route.iter().map(|v| (v + 1).to_string()).collect();
        let _ = writeln!(text, "{}", route.join(" "));

        text
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_text()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Path file written to {} ({} vertices, route of {})",
            path.display(),
            self.labels.len(),
            self.route.len()
        );
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Lenient reader: edge lines with fewer than three fields are skipped,
    /// route entries that are not positive integers are ignored and
    /// missing labels are filled with the vertex number.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() < 2 {
            return Err(Error::PathFile("expected at least two lines".into()));
        }

        let node_count: usize = lines[0]
            .trim()
            .parse()
            .map_err(|_| Error::PathFile(format!("invalid vertex count '{}'", lines[0].trim())))?;
        let mut labels: Vec<String> = lines[1].split_whitespace().map(String::from).collect();

        let mut edges = vec![];
        let mut route = vec![];
        let mut rest = lines[2..].iter().enumerate();

        while let Some((i, line)) = rest.next() {
            let line = line.trim();
            if line == PATH_MARKER {
                if let Some((_, route_line)) = rest.next() {
                    route = route_line
                        .split_whitespace()
                        .filter_map(|v| v.parse::<usize>().ok())
                        .filter_map(|v| v.checked_sub(1))
                        .collect();
                }
                break;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 {
                continue;
            }

            let number = |token: &str| {
                token.parse::<i64>().map_err(|_| {
                    Error::PathFile(format!("invalid edge '{line}' on line {}", i + 3))
                })
            };
            let (source, target, weight) = (number(parts[0])?, number(parts[1])?, number(parts[2])?);

            let zero_based = |v: i64| v.checked_sub(1).and_then(|v| usize::try_from(v).ok());
            match (zero_based(source), zero_based(target)) {
                (Some(source), Some(target)) => edges.push((source, target, weight)),
                _ => debug!("skipping edge '{line}' with a vertex below 1"),
            }
        }

        let vertices = edges
            .iter()
            .map(|(s, t, _)| s.max(t) + 1)
            .chain([node_count, labels.len()])
            .max()
            .unwrap_or(0);
        labels.extend((labels.len()..vertices).map(|v| (v + 1).to_string()));

        Ok(Self {
            labels,
            edges,
            route,
        })
    }
}

#[cfg(test)]
mod tests {
    use graph_rs::{
        algorithms::{bellman_ford::BellmanFord, dijkstra::Dijkstra},
        input::{GraphText, LoadOptions},
    };

    use crate::Error;

    use super::PathFile;

    const GRAPH: &str = "4\nA B C D\n5\n1 2 4\n3 2 1\n1 3 1\n2 4 5\n3 4 9\n";

    #[test]
    fn from_dijkstra() {
        let graph = GraphText::parse(GRAPH, LoadOptions::default()).unwrap();
        let (adjacency, _) = graph.clone().into_graph();
        let paths = adjacency.dijkstra(0);

        let file = PathFile::from_shortest_path(&graph, &paths, 3);

        assert_eq!(file.route, vec![0, 2, 1, 3]);
        assert_eq!(
            file.edges,
            vec![(0, 1, 4), (0, 2, 1), (1, 3, 5), (2, 1, 1), (2, 3, 9)]
        );
        assert_eq!(
            file.to_text(),
            "4\nA B C D\n1 2 4\n1 3 1\n2 4 5\n3 2 1\n3 4 9\n\nPATH:\n1 3 2 4\n"
        );
    }

    #[test]
    fn unreachable_target_has_empty_route() {
        let graph = GraphText::parse("3 a b c 1 1 2 1", LoadOptions::default()).unwrap();
        let paths = graph.edges.bellman_ford(0);

        let file = PathFile::from_shortest_path(&graph, &paths, 2);

        assert!(file.route.is_empty());
        assert!(file.to_text().ends_with("PATH:\n\n"));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/temp.txt");
        let file = PathFile {
            labels: vec!["x".into(), "y".into(), "z".into()],
            edges: vec![(0, 1, -2), (1, 2, 3)],
            route: vec![0, 1, 2],
        };

        file.write(&path).unwrap();

        assert_eq!(PathFile::read(&path).unwrap(), file);
    }

    #[test]
    fn lenient_parse() {
        let text = "3\nA B\n1 2 3\n\n2 3\n0 1 4\n\nPATH:\n1 x -2 2 0\n";
        let file = PathFile::parse(text).unwrap();

        assert_eq!(file.labels, vec!["A", "B", "3"]);
        assert_eq!(file.edges, vec![(0, 1, 3)]);
        assert_eq!(file.route, vec![0, 1]);
    }

    #[test]
    fn without_route() {
        let file = PathFile::parse("2\nA B\n1 2 1\n").unwrap();

        assert_eq!(file.edges, vec![(0, 1, 1)]);
        assert!(file.route.is_empty());
    }

    #[test]
    fn invalid_files() {
        assert!(matches!(PathFile::parse("3\n"), Err(Error::PathFile(_))));
        assert!(matches!(PathFile::parse("three\nA B C\n"), Err(Error::PathFile(_))));
        assert!(matches!(
            PathFile::parse("2\nA B\n1 b 2\n"),
            Err(Error::PathFile(_))
        ));
        assert!(matches!(
            PathFile::read(std::path::Path::new("no/such/temp.txt")),
            Err(Error::NotFound(_))
        ));
    }
}
