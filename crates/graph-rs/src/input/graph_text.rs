//! Reader for the whitespace separated graph format:
//!
//! ```text
//! V
//! label_1 ... label_V
//! E
//! src dst weight    (E times, 1-based vertices)
//! ```

use std::{error::Error, fmt::Display, fs, path::Path, str::FromStr};

use log::{debug, info};

use crate::graph::csr::DirectedCsrGraph;

use super::edgelist::EdgeList;

#[derive(Debug)]
pub enum ParseError {
    Empty,
    InvalidVertexCount(String),
    MissingLabels { expected: usize, found: usize },
    MissingEdgeCount,
    InvalidEdgeCount(String),
    TruncatedEdges { expected: usize, parsed: usize },
    InvalidEdge { index: usize, token: String },
    Io(std::io::Error),
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "graph file is empty"),
            Self::InvalidVertexCount(token) => write!(f, "invalid vertex count '{token}'"),
            Self::MissingLabels { expected, found } => {
                write!(f, "missing vertex labels: expected {expected}, found {found}")
            }
            Self::MissingEdgeCount => write!(f, "missing edge count"),
            Self::InvalidEdgeCount(token) => write!(f, "invalid edge count '{token}'"),
            Self::TruncatedEdges { expected, parsed } => {
                write!(f, "not enough edge data: expected {expected} edges, found {parsed}")
            }
            Self::InvalidEdge { index, token } => {
                write!(f, "invalid edge data in edge {}: '{token}'", index + 1)
            }
            Self::Io(err) => write!(f, "could not read graph file: {err}"),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Insert the mirror of every edge.
    pub undirected: bool,
}

#[derive(Debug, Clone)]
pub struct GraphText<EV> {
    pub labels: Vec<String>,
    pub edges: EdgeList<EV>,
    skipped_edges: usize,
}

impl GraphText<i64> {
    pub fn read(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let graph = Self::parse(&text, options)?;

        info!(
            "Loaded graph {:?} (node_count: {}, edge_count: {})",
            path,
            graph.node_count(),
            graph.edges.len()
        );

        Ok(graph)
    }

    pub fn parse(text: &str, options: LoadOptions) -> Result<Self, ParseError> {
        let mut tokens = text.split_whitespace();

        let node_count = tokens.next().ok_or(ParseError::Empty)?;
        let node_count = match usize::from_str(node_count) {
            Ok(n) if n >= 1 => n,
            _ => return Err(ParseError::InvalidVertexCount(node_count.to_string())),
        };

        let labels: Vec<String> = tokens.by_ref().take(node_count).map(String::from).collect();
        if labels.len() < node_count {
            return Err(ParseError::MissingLabels {
                expected: node_count,
                found: labels.len(),
            });
        }

        let edge_count = tokens.next().ok_or(ParseError::MissingEdgeCount)?;
        let edge_count = usize::from_str(edge_count)
            .map_err(|_| ParseError::InvalidEdgeCount(edge_count.to_string()))?;

        let mut edges = EdgeList::with_nodes(node_count);
        let mut skipped_edges = 0;

        for index in 0..edge_count {
            let (Some(source), Some(target), Some(weight)) =
                (tokens.next(), tokens.next(), tokens.next())
            else {
                return Err(ParseError::TruncatedEdges {
                    expected: edge_count,
                    parsed: index,
                });
            };

            let source = parse_token::<i64>(source, index)?;
            let target = parse_token::<i64>(target, index)?;
            let weight = parse_token::<i64>(weight, index)?;

            let (Some(source), Some(target)) = (
                zero_based(source, node_count),
                zero_based(target, node_count),
            ) else {
                debug!(
                    "skipping edge {} ({source} -> {target}): vertex out of range 1..={node_count}",
                    index + 1
                );
                skipped_edges += 1;
                continue;
            };

            edges.insert(source, target, weight);
            if options.undirected {
                edges.insert(target, source, weight);
            }
        }

        Ok(Self {
            labels,
            edges,
            skipped_edges,
        })
    }
}

impl<EV: Copy + Default> GraphText<EV> {
    pub fn node_count(&self) -> usize {
        self.edges.node_count()
    }

    /// Number of edges dropped because an endpoint was out of range.
    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    /// Adjacency view labelled with the vertex names, plus the flat edge
    /// list it was built from.
    pub fn into_graph(self) -> (DirectedCsrGraph<EV, String>, EdgeList<EV>) {
        let mut graph = DirectedCsrGraph::from(&self.edges);
        graph.set_node_values(self.labels);
        (graph, self.edges)
    }
}

fn parse_token<T: FromStr>(token: &str, index: usize) -> Result<T, ParseError> {
    T::from_str(token).map_err(|_| ParseError::InvalidEdge {
        index,
        token: token.to_string(),
    })
}

fn zero_based(vertex: i64, node_count: usize) -> Option<usize> {
    vertex
        .checked_sub(1)
        .and_then(|v| usize::try_from(v).ok())
        .filter(|v| *v < node_count)
}

#[cfg(test)]
mod tests {
    use crate::{DirectedGraph, Graph};

    use super::{GraphText, LoadOptions, ParseError};

    const TRIANGLE: &str = "3\nA B C\n3\n1 2 4\n2 3 2\n1 3 9\n";

    #[test]
    fn parse_triangle() {
        let graph = GraphText::parse(TRIANGLE, LoadOptions::default()).unwrap();

        assert_eq!(graph.labels, vec!["A", "B", "C"]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(
            graph.edges.edges().collect::<Vec<_>>(),
            vec![(0, 1, 4), (1, 2, 2), (0, 2, 9)]
        );
        assert_eq!(graph.skipped_edges(), 0);
    }

    #[test]
    fn later_edges_overwrite() {
        let graph = GraphText::parse("2 a b 3 1 2 5 2 1 1 1 2 7", LoadOptions::default()).unwrap();

        assert_eq!(
            graph.edges.edges().collect::<Vec<_>>(),
            vec![(0, 1, 7), (1, 0, 1)]
        );
    }

    #[test]
    fn undirected_mirrors_edges() {
        let graph = GraphText::parse(TRIANGLE, LoadOptions { undirected: true }).unwrap();

        assert_eq!(graph.edges.len(), 6);
        assert_eq!(graph.edges.weight(2, 1), Some(2));
        assert_eq!(graph.edges.weight(2, 0), Some(9));
    }

    #[test]
    fn out_of_range_edges_are_dropped() {
        let graph = GraphText::parse(
            "3\nA B C\n4\n0 1 1\n1 4 1\n1 2 4\n-2 3 1\n",
            LoadOptions::default(),
        )
        .unwrap();

        assert_eq!(graph.edges.edges().collect::<Vec<_>>(), vec![(0, 1, 4)]);
        assert_eq!(graph.skipped_edges(), 3);
    }

    #[test]
    fn into_graph_keeps_insertion_order() {
        let graph = GraphText::parse("3 A B C 3 1 3 9 1 2 4 1 3 1", LoadOptions::default()).unwrap();
        let (csr, edges) = graph.into_graph();

        assert_eq!(csr.node_count(), 3);
        assert_eq!(csr.node_value(1).map(String::as_str), Some("B"));
        assert_eq!(
            csr.out_neighbors(0)
                .map(|t| (t.target(), *t.value()))
                .collect::<Vec<_>>(),
            vec![(2, 1), (1, 4)]
        );
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn isolated_trailing_vertices_are_kept() {
        let graph = GraphText::parse("4 A B C D 1 1 2 1", LoadOptions::default()).unwrap();
        let (csr, _) = graph.into_graph();

        assert_eq!(csr.node_count(), 4);
        assert_eq!(csr.out_degree(3), 0);
    }

    #[test]
    fn format_errors() {
        let parse = |s: &str| GraphText::parse(s, LoadOptions::default()).unwrap_err();

        assert!(matches!(parse(""), ParseError::Empty));
        assert!(matches!(parse("  \n "), ParseError::Empty));
        assert!(matches!(parse("x A"), ParseError::InvalidVertexCount(_)));
        assert!(matches!(parse("0"), ParseError::InvalidVertexCount(_)));
        assert!(matches!(parse("-3 A B C"), ParseError::InvalidVertexCount(_)));
        assert!(matches!(
            parse("3 A B"),
            ParseError::MissingLabels {
                expected: 3,
                found: 2
            }
        ));
        assert!(matches!(parse("2 A B"), ParseError::MissingEdgeCount));
        assert!(matches!(parse("2 A B many"), ParseError::InvalidEdgeCount(_)));
        assert!(matches!(
            parse("2 A B 2 1 2 3 2 1"),
            ParseError::TruncatedEdges {
                expected: 2,
                parsed: 1
            }
        ));
        assert!(matches!(
            parse("2 A B 1 1 2 heavy"),
            ParseError::InvalidEdge { index: 0, .. }
        ));
    }
}
