use std::{iter::Copied, slice::Iter};

use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::types::Direction;

/// Flat list of distinct directed edges over `node_count` nodes.
///
/// Every ordered pair `(source, target)` appears at most once. Inserting a
/// pair a second time overwrites its weight but keeps the position of the
/// first insertion.
#[derive(Debug, Clone)]
pub struct EdgeList<EV> {
    edges: Vec<(usize, usize, EV)>,
    index: FxHashMap<(usize, usize), usize>,
    node_count: usize,
}

impl<EV: Copy> EdgeList<EV> {
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            index: FxHashMap::default(),
            node_count,
        }
    }

    /// Builds an edge list from raw triples.
    ///
    /// The node count is large enough to hold every referenced node.
    pub fn new(edges: Vec<(usize, usize, EV)>) -> Self {
        let node_count = edges
            .iter()
            .map(|(s, t, _)| s.max(t) + 1)
            .max()
            .unwrap_or(0);

        let mut edge_list = Self::with_nodes(node_count);
        edges
            .into_iter()
            .for_each(|(s, t, v)| edge_list.insert(s, t, v));
        edge_list
    }

    /// Inserts `source -> target`, overwriting the weight of an existing
    /// edge between the same ordered pair.
    ///
    /// Panics if an endpoint is not below `node_count`.
    pub fn insert(&mut self, source: usize, target: usize, weight: EV) {
        assert!(
            source < self.node_count && target < self.node_count,
            "edge ({source}, {target}) out of range for {} nodes",
            self.node_count
        );

        match self.index.get(&(source, target)) {
            Some(&i) => self.edges[i].2 = weight,
            None => {
                self.index.insert((source, target), self.edges.len());
                self.edges.push((source, target, weight));
            }
        }
    }

    pub fn weight(&self, source: usize, target: usize) -> Option<EV> {
        self.index.get(&(source, target)).map(|&i| self.edges[i].2)
    }

    pub fn degrees(&self, direction: Direction) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count];

        if matches!(direction, Direction::Outgoing | Direction::Undirected) {
            self.edges.iter().for_each(|(s, _, _)| {
                degrees[*s] += 1;
            });
        }

        if matches!(direction, Direction::Incoming | Direction::Undirected) {
            self.edges.iter().for_each(|(_, t, _)| {
                degrees[*t] += 1;
            });
        }

        degrees
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> Copied<Iter<'_, (usize, usize, EV)>> {
        self.edges.iter().copied()
    }
}

impl<EV: Copy + PartialOrd + Zero> EdgeList<EV> {
    pub fn has_negative_weight(&self) -> bool {
        self.edges.iter().any(|(_, _, w)| *w < EV::zero())
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Direction;

    use super::EdgeList;

    #[test]
    fn edgelist_from_triples() {
        let edge_list = EdgeList::new(vec![(1, 2, 5), (1, 4, 3), (2, 3, 1), (2, 1, 1), (4, 0, 4)]);

        assert_eq!(edge_list.node_count(), 5);
        assert_eq!(
            edge_list.edges().collect::<Vec<(usize, usize, i32)>>(),
            vec![(1, 2, 5), (1, 4, 3), (2, 3, 1), (2, 1, 1), (4, 0, 4)]
        );
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut edge_list = EdgeList::with_nodes(3);
        edge_list.insert(0, 1, 7);
        edge_list.insert(1, 2, 2);
        edge_list.insert(0, 1, 3);

        assert_eq!(edge_list.len(), 2);
        assert_eq!(edge_list.weight(0, 1), Some(3));
        assert_eq!(
            edge_list.edges().collect::<Vec<_>>(),
            vec![(0, 1, 3), (1, 2, 2)]
        );
    }

    #[test]
    fn degrees() {
        let edge_list = EdgeList::new(vec![(0, 1, 1), (0, 2, 1), (2, 1, 1)]);

        assert_eq!(edge_list.degrees(Direction::Outgoing), vec![2, 0, 1]);
        assert_eq!(edge_list.degrees(Direction::Incoming), vec![0, 2, 1]);
        assert_eq!(edge_list.degrees(Direction::Undirected), vec![2, 2, 2]);
    }

    #[test]
    fn negative_weights() {
        let mut edge_list = EdgeList::new(vec![(0, 1, 4), (1, 2, 0)]);
        assert!(!edge_list.has_negative_weight());

        edge_list.insert(1, 2, -1);
        assert!(edge_list.has_negative_weight());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn insert_out_of_range() {
        let mut edge_list = EdgeList::with_nodes(2);
        edge_list.insert(0, 2, 1);
    }
}
