use std::{cmp::Reverse, collections::BinaryHeap};

use log::trace;
use num_traits::{CheckedAdd, Zero};

use crate::{DirectedGraph, GraphError};

use super::{ShortestPaths, Weight};

pub trait Dijkstra: DirectedGraph
where
    Self::EV: Weight,
{
    /// Distances from `start_node` along outgoing edges.
    ///
    /// Only correct when no edge weight is negative. The weights are not
    /// checked here.
    fn dijkstra(&self, start_node: usize) -> ShortestPaths<Self::EV>;

    fn try_dijkstra(&self, start_node: usize) -> Result<ShortestPaths<Self::EV>, GraphError> {
        if !self.contains_node(start_node) {
            return Err(GraphError::NodeNotFound(start_node));
        }
        Ok(self.dijkstra(start_node))
    }
}

impl<G> Dijkstra for G
where
    G: DirectedGraph,
    G::EV: Weight,
{
    fn dijkstra(&self, start_node: usize) -> ShortestPaths<Self::EV> {
        let mut result = ShortestPaths::new(self.node_count(), start_node);
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((<G::EV as Zero>::zero(), start_node)));

        while let Some(Reverse((cost, node))) = frontier.pop() {
            // Entries are never removed from the heap, skip outdated ones.
            if result.distance(node) != Some(cost) {
                continue;
            }

            for n in self.out_neighbors(node) {
                let Some(path_cost) = CheckedAdd::checked_add(&cost, n.value()) else {
                    continue;
                };
                if result.relax(node, n.target(), path_cost) {
                    frontier.push(Reverse((path_cost, n.target())));
                }
            }
        }

        trace!(
            "dijkstra from {start_node} reached {} of {} nodes",
            result.reachable_count(),
            self.node_count()
        );

        result
    }
}
