use log::debug;
use serde::{Deserialize, Serialize};

use crate::{DirectedGraph, Graph, graph::Target, input::edgelist::EdgeList};
use crate::types::Direction;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Csr<EV> {
    offsets: Vec<usize>,
    targets: Vec<Target<EV>>,
}

impl<EV> Csr<EV> {
    /// Create a `CSR` from `offsets` and `targets`.
    ///
    /// Returns a new `CSR` where `offsets[i]` contains the index of the first
    /// target node in `targets`.
    pub fn new(offsets: Vec<usize>, targets: Vec<Target<EV>>) -> Csr<EV> {
        Self { offsets, targets }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    pub fn degree(&self, i: usize) -> usize {
        let from = self.offsets[i];
        let to = self.offsets[i + 1];

        to - from
    }

    pub fn targets(&self, i: usize) -> &[Target<EV>] {
        let from = self.offsets[i];
        let to = self.offsets[i + 1];

        &self.targets[from..to]
    }
}

/// Immutable adjacency of a directed graph, stored as outgoing compressed
/// sparse rows.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DirectedCsrGraph<EV, NV> {
    pub node_values: Vec<NV>,
    pub csr_out: Csr<EV>,
}

impl<EV, NV> DirectedCsrGraph<EV, NV> {
    pub fn new(node_values: Vec<NV>, csr_out: Csr<EV>) -> DirectedCsrGraph<EV, NV> {
        let g = Self {
            node_values,
            csr_out,
        };

        debug!(
            "Created directed graph (node_count: {:?}, edge_count = {:?})",
            g.csr_out.node_count(),
            g.csr_out.edge_count()
        );

        g
    }

    /// Replaces all node values. Extra values are dropped.
    pub fn set_node_values(&mut self, mut values: Vec<NV>) {
        values.truncate(self.csr_out.node_count());
        self.node_values = values;
    }
}

impl<EV: Copy, NV> Graph for DirectedCsrGraph<EV, NV> {
    type EV = EV;
    type NV = NV;
    fn node_count(&self) -> usize {
        self.csr_out.node_count()
    }

    fn edge_count(&self) -> usize {
        self.csr_out.edge_count()
    }

    fn node_value(&self, node: usize) -> Option<&NV> {
        self.node_values.get(node)
    }
}

impl<EV: Copy, NV> DirectedGraph for DirectedCsrGraph<EV, NV> {
    fn out_neighbors<'a>(&'a self, node: usize) -> impl Iterator<Item = &'a Target<EV>>
    where
        EV: 'a,
    {
        self.csr_out.targets(node).iter()
    }

    fn out_degree(&self, node: usize) -> usize {
        self.csr_out.degree(node)
    }
}

impl<EV, NV> From<&EdgeList<EV>> for DirectedCsrGraph<EV, NV>
where
    EV: Copy + Default,
    NV: Default + Clone,
{
    fn from(edge_list: &EdgeList<EV>) -> Self {
        let mut offsets = prefix_sum(edge_list.degrees(Direction::Outgoing));
        let mut targets = vec![Target::new(0, EV::default()); edge_list.len()];

        edge_list.edges().for_each(|(s, t, v)| {
            let offset = offsets[s];

            // Increment offset by one after inserting target.
            offsets[s] = offset + 1;
            targets[offset] = Target::new(t, v);
        });

        // Every offset now points at the start of the next row.
        offsets.rotate_right(1);
        offsets[0] = 0;

        let csr_out = Csr::new(offsets, targets);
        let node_values = vec![NV::default(); csr_out.node_count()];

        DirectedCsrGraph::new(node_values, csr_out)
    }
}

impl<EV, NV> From<EdgeList<EV>> for DirectedCsrGraph<EV, NV>
where
    EV: Copy + Default,
    NV: Default + Clone,
{
    fn from(edge_list: EdgeList<EV>) -> Self {
        Self::from(&edge_list)
    }
}

/// Exclusive prefix sum with the total appended, so the result has one
/// entry more than `degrees`.
fn prefix_sum(degrees: Vec<usize>) -> Vec<usize> {
    let mut sums: Vec<usize> = degrees
        .iter()
        .scan(0, |total, degree| {
            let value = *total;
            *total += degree;
            Some(value)
        })
        .collect();

    sums.push(degrees.iter().sum());

    sums
}
