use std::path::PathBuf;

use graph_rs::input::LoadOptions;

/// Timing table read by `compare` when no csv is given.
pub const DEFAULT_CSV: &str = "data/benchmark.csv";

/// Path file written by `path` and read by `diagram`.
pub const DEFAULT_PATH_FILE: &str = "data/temp.txt";

pub const DEFAULT_GRAPH_PREFIX: &str = "G";

pub const DEFAULT_REPETITIONS: u32 = 200;

pub const DEFAULT_TITLE: &str = "Dijkstra vs Bellman-Ford running time";

pub const DEFAULT_DIAGRAM_TITLE: &str = "Shortest path";

/// Settings for timing the engines on a set of graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Start vertex, 1-based. Clamped into the vertex range of each graph.
    pub start_vertex: i64,

    /// Calls per engine and graph. Values below 1 count as 1.
    pub repetitions: i64,

    /// Load every edge in both directions.
    pub undirected: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            start_vertex: 1,
            repetitions: DEFAULT_REPETITIONS.into(),
            undirected: false,
        }
    }
}

impl BenchConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            undirected: self.undirected,
        }
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions.clamp(1, u32::MAX.into()) as u32
    }

    /// Zero-based start vertex for a graph with `node_count` vertices.
    pub fn start_index(&self, node_count: usize) -> usize {
        let last = node_count.saturating_sub(1);
        usize::try_from(self.start_vertex.saturating_sub(1)).map_or(0, |start| start.min(last))
    }
}

/// `dir/{prefix}1.txt` ... `dir/{prefix}{count}.txt`.
pub fn graph_paths(dir: impl Into<PathBuf>, prefix: &str, count: usize) -> Vec<PathBuf> {
    let dir = dir.into();
    (1..=count)
        .map(|i| dir.join(format!("{prefix}{i}.txt")))
        .collect()
}
