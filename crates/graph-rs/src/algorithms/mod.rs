use std::fmt::Debug;

use num_traits::{CheckedAdd, Zero};
use serde::{Deserialize, Serialize};

use crate::graph::{Path, Target};

pub mod bellman_ford;
pub mod dijkstra;

/// Edge weight usable by the shortest path engines.
///
/// `Ord` is required by the priority queue. A sum that does not fit the
/// weight type is treated as unreachable.
pub trait Weight: Copy + Ord + Zero + CheckedAdd + Debug {}

impl<T> Weight for T where T: Copy + Ord + Zero + CheckedAdd + Debug {}

/// Single source distances.
///
/// `distances[v]` is `None` while `v` is unreachable from `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPaths<EV> {
    start: usize,
    distances: Vec<Option<EV>>,
    predecessors: Vec<Option<usize>>,
}

impl<EV: Weight> ShortestPaths<EV> {
    /// All nodes unreachable except `start` at distance zero.
    pub fn new(node_count: usize, start: usize) -> Self {
        let mut distances = vec![None; node_count];
        distances[start] = Some(EV::zero());

        Self {
            start,
            distances,
            predecessors: vec![None; node_count],
        }
    }

    /// Lowers the distance of `target` to `distance` via `source`, if that
    /// is an improvement.
    pub(crate) fn relax(&mut self, source: usize, target: usize, distance: EV) -> bool {
        let improves = self.distances[target].is_none_or(|current| distance < current);
        if improves {
            self.distances[target] = Some(distance);
            self.predecessors[target] = Some(source);
        }
        improves
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn distance(&self, node: usize) -> Option<EV> {
        self.distances.get(node).copied().flatten()
    }

    pub fn distances(&self) -> &[Option<EV>] {
        &self.distances
    }

    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.predecessors.get(node).copied().flatten()
    }

    pub fn is_reachable(&self, node: usize) -> bool {
        self.distance(node).is_some()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Reconstructs the walk from `start` to `node` by following the
    /// predecessors.
    ///
    /// Returns `None` if `node` is unreachable, or if the predecessors form
    /// a cycle, which only happens after relaxing a negative cycle.
    pub fn path(&self, node: usize) -> Option<Path<EV>> {
        self.distance(node)?;

        let mut hops = vec![];
        let mut current = node;
        while current != self.start {
            if hops.len() >= self.distances.len() {
                return None;
            }
            hops.push(Target::new(current, self.distance(current)?));
            current = self.predecessor(current)?;
        }
        hops.reverse();

        Some(Path::new(self.start, hops))
    }
}
