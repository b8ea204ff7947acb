use std::{
    hint::black_box,
    path::{Path, PathBuf},
    time::Instant,
};

use graph_rs::{
    Graph,
    algorithms::{bellman_ford::BellmanFord, dijkstra::Dijkstra},
    input::GraphText,
};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, config::BenchConfig};

/// Average call duration of both engines on one graph, in seconds.
///
/// `non_negative` is NaN when Dijkstra was skipped because the graph has a
/// negative edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub label: String,
    pub non_negative: f64,
    pub tolerant: f64,
    pub vertices: Option<usize>,
    pub edges: Option<usize>,
}

impl TimingRecord {
    pub fn new(label: impl Into<String>, non_negative: f64, tolerant: f64) -> Self {
        Self {
            label: label.into(),
            non_negative,
            tolerant,
            vertices: None,
            edges: None,
        }
    }
}

/// Calls `f` `repetitions` times (at least once) and returns the mean wall
/// clock time per call in seconds.
pub fn average_seconds<F, R>(repetitions: u32, mut f: F) -> f64
where
    F: FnMut() -> R,
{
    let repetitions = repetitions.max(1);

    let start = Instant::now();
    for _ in 0..repetitions {
        black_box(f());
    }
    let elapsed = start.elapsed();

    elapsed.as_secs_f64() / f64::from(repetitions)
}

/// Fails with [`Error::NotFound`] on the first path that does not exist.
pub fn ensure_exists<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    match paths.iter().map(AsRef::as_ref).find(|p| !p.exists()) {
        Some(missing) => Err(Error::NotFound(missing.to_path_buf())),
        None => Ok(()),
    }
}

pub fn benchmark_graph(path: &Path, config: &BenchConfig) -> Result<TimingRecord> {
    let graph = GraphText::read(path, config.load_options()).map_err(|source| Error::Graph {
        path: path.to_path_buf(),
        source,
    })?;

    if graph.skipped_edges() > 0 {
        warn!(
            "{}: ignored {} edges with a vertex outside 1..={}",
            path.display(),
            graph.skipped_edges(),
            graph.node_count()
        );
    }

    let label = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());

    let (adjacency, edges) = graph.into_graph();
    let start = config.start_index(adjacency.node_count());
    let repetitions = config.repetitions();
    let has_negative_weight = edges.has_negative_weight();

    debug!(
        "Timing {label} from vertex {} with {repetitions} repetitions",
        start + 1
    );

    let non_negative = if has_negative_weight {
        info!("{label}: negative edge weight, skipping dijkstra");
        f64::NAN
    } else {
        average_seconds(repetitions, || adjacency.dijkstra(start))
    };

    let tolerant = average_seconds(repetitions, || edges.bellman_ford(start));

    if has_negative_weight {
        let result = edges.bellman_ford(start);
        if let Some((s, t)) = edges.negative_cycle_edge(&result) {
            warn!(
                "{label}: negative cycle reachable from vertex {} (edge {} -> {} still relaxes), \
                 bellman-ford distances are not final",
                start + 1,
                s + 1,
                t + 1
            );
        }
    }

    Ok(TimingRecord {
        vertices: Some(adjacency.node_count()),
        edges: Some(adjacency.edge_count()),
        ..TimingRecord::new(label, non_negative, tolerant)
    })
}

/// Times every graph in order. Each graph is loaded, timed and dropped
/// before the next one is read.
pub fn benchmark_graphs(paths: &[PathBuf], config: &BenchConfig) -> Result<Vec<TimingRecord>> {
    if paths.is_empty() {
        return Err(Error::NoGraphs);
    }
    ensure_exists(paths)?;

    info!(
        "Benchmarking {} graphs ({} repetitions each)",
        paths.len(),
        config.repetitions()
    );

    let progress = ProgressBar::new(paths.len() as u64);
    let records = paths
        .iter()
        .map(|path| {
            let record = benchmark_graph(path, config);
            progress.inc(1);
            record
        })
        .collect::<Result<Vec<_>>>();
    progress.finish_and_clear();

    records
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, path::PathBuf};

    use crate::{Error, config::BenchConfig};

    use super::{average_seconds, benchmark_graphs, ensure_exists};

    #[test]
    fn average_calls_at_least_once() {
        let calls = Cell::new(0);

        let seconds = average_seconds(0, || calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 1);
        assert!(seconds >= 0.0);

        average_seconds(7, || calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 8);
    }

    #[test]
    fn missing_graph() {
        let paths = vec![PathBuf::from("does/not/exist.txt")];

        assert!(matches!(ensure_exists(&paths), Err(Error::NotFound(_))));
        assert!(matches!(
            benchmark_graphs(&paths, &BenchConfig::default()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn no_graphs() {
        assert!(matches!(
            benchmark_graphs(&[], &BenchConfig::default()),
            Err(Error::NoGraphs)
        ));
    }
}
