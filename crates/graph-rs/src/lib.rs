use std::{error::Error, fmt::Display};

use graph::Target;

pub mod algorithms;
pub mod graph;
pub mod input;
pub mod types;

#[derive(Debug, PartialEq, Eq)]
pub enum GraphError {
    NodeNotFound(usize),
}

impl Error for GraphError {}

impl Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(node) => write!(f, "node_id: {} not found in graph", node),
        }
    }
}

pub trait Graph {
    type EV;
    type NV;
    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn node_value(&self, node: usize) -> Option<&Self::NV>;

    fn contains_node(&self, node: usize) -> bool {
        node < self.node_count()
    }
}

pub trait DirectedGraph: Graph {
    fn out_neighbors<'a>(&'a self, node: usize) -> impl Iterator<Item = &'a Target<Self::EV>>
    where
        Self::EV: 'a;

    fn out_degree(&self, node: usize) -> usize;
}
