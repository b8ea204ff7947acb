use log::{debug, trace};
use num_traits::CheckedAdd;

use crate::{GraphError, input::edgelist::EdgeList};

use super::{ShortestPaths, Weight};

pub trait BellmanFord {
    type EV: Weight;

    /// Distances from `start_node`, relaxing every edge for at most
    /// `node_count - 1` passes and stopping after the first pass without an
    /// update.
    ///
    /// Negative weights are allowed. Negative cycles are not detected: the
    /// result is whatever the capped passes produced. Use
    /// [`BellmanFord::negative_cycle_edge`] to check afterwards.
    fn bellman_ford(&self, start_node: usize) -> ShortestPaths<Self::EV>;

    fn try_bellman_ford(&self, start_node: usize) -> Result<ShortestPaths<Self::EV>, GraphError>;

    /// Runs one more relaxation pass over `result` and returns the first
    /// edge that would still improve a distance. Such an edge exists iff a
    /// negative cycle is reachable from the start node.
    fn negative_cycle_edge(&self, result: &ShortestPaths<Self::EV>) -> Option<(usize, usize)>;
}

impl<EV: Weight> BellmanFord for EdgeList<EV> {
    type EV = EV;

    fn bellman_ford(&self, start_node: usize) -> ShortestPaths<EV> {
        let mut result = ShortestPaths::new(self.node_count(), start_node);

        for pass in 1..self.node_count() {
            let mut updated = false;

            for (s, t, w) in self.edges() {
                let relaxed = result
                    .distance(s)
                    .and_then(|d| CheckedAdd::checked_add(&d, &w));
                if let Some(distance) = relaxed {
                    updated |= result.relax(s, t, distance);
                }
            }

            if !updated {
                trace!("bellman-ford from {start_node} converged after {pass} passes");
                break;
            }
        }

        result
    }

    fn try_bellman_ford(&self, start_node: usize) -> Result<ShortestPaths<EV>, GraphError> {
        if start_node >= self.node_count() {
            return Err(GraphError::NodeNotFound(start_node));
        }
        Ok(self.bellman_ford(start_node))
    }

    fn negative_cycle_edge(&self, result: &ShortestPaths<EV>) -> Option<(usize, usize)> {
        let edge = self.edges().find_map(|(s, t, w)| {
            let distance = CheckedAdd::checked_add(&result.distance(s)?, &w)?;
            result
                .distance(t)
                .is_none_or(|current| distance < current)
                .then_some((s, t))
        });

        if let Some((s, t)) = edge {
            debug!("edge ({s}, {t}) can still be relaxed, negative cycle reachable");
        }

        edge
    }
}

#[cfg(test)]
mod test {
    use crate::{
        GraphError,
        algorithms::dijkstra::Dijkstra,
        graph::csr::DirectedCsrGraph,
        input::edgelist::EdgeList,
    };

    use super::BellmanFord;

    #[test]
    fn triangle() {
        let edges = EdgeList::new(vec![(0, 1, 4i64), (1, 2, 2), (0, 2, 9)]);
        let result = edges.bellman_ford(0);

        assert_eq!(result.distances(), &[Some(0), Some(4), Some(6)]);
        assert_eq!(edges.negative_cycle_edge(&result), None);
    }

    #[test]
    fn negative_weights() {
        let edges = EdgeList::new(vec![(0, 1, 4i64), (0, 2, 5), (2, 1, -3), (1, 3, 1)]);
        let result = edges.bellman_ford(0);

        assert_eq!(result.distances(), &[Some(0), Some(2), Some(5), Some(3)]);
        assert_eq!(
            result.path(3).unwrap().nodes().collect::<Vec<_>>(),
            vec![0, 2, 1, 3]
        );
    }

    #[test]
    fn negative_cycle_is_capped_not_flagged() {
        let edges = EdgeList::new(vec![(0, 1, 1i64), (1, 2, -2), (2, 1, 1)]);
        let result = edges.bellman_ford(0);

        // Stops after two passes although the cycle 1 -> 2 -> 1 keeps improving.
        assert_eq!(result.distances(), &[Some(0), Some(-1), Some(-2)]);
        assert!(edges.negative_cycle_edge(&result).is_some());
    }

    #[test]
    fn overflowing_sum_is_unreachable() {
        let edges = EdgeList::new(vec![(0, 1, i64::MAX), (1, 2, 1), (2, 0, i64::MIN)]);
        let result = edges.bellman_ford(0);

        assert_eq!(result.distances(), &[Some(0), Some(i64::MAX), None]);
        assert_eq!(edges.negative_cycle_edge(&result), None);
    }

    #[test]
    fn single_node() {
        let edges: EdgeList<i64> = EdgeList::with_nodes(1);

        assert_eq!(edges.bellman_ford(0).distances(), &[Some(0)]);
    }

    #[test]
    fn agrees_with_dijkstra() {
        let edges = EdgeList::new(vec![
            (0, 1, 7i64),
            (0, 2, 9),
            (0, 5, 14),
            (1, 2, 10),
            (1, 3, 15),
            (2, 3, 11),
            (2, 5, 2),
            (3, 4, 6),
            (5, 4, 9),
            (6, 0, 1),
        ]);
        let graph: DirectedCsrGraph<i64, ()> = DirectedCsrGraph::from(&edges);

        for start in 0..edges.node_count() {
            assert_eq!(
                edges.bellman_ford(start).distances(),
                graph.dijkstra(start).distances(),
                "distances from {start}"
            );
        }
    }

    #[test]
    fn start_out_of_range() {
        let edges = EdgeList::new(vec![(0, 1, 1i64)]);

        assert_eq!(edges.try_bellman_ford(5), Err(GraphError::NodeNotFound(5)));
    }
}
