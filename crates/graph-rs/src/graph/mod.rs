use std::hash::Hash;

use num_traits::Zero;
use serde::{Deserialize, Serialize};

pub mod csr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target<EV> {
    target: usize,
    value: EV,
}

/// A walk through the graph starting at `start`.
///
/// Every [`Target`] in `path` carries the accumulated distance from `start`,
/// so the cost of the whole walk is the value of the last hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path<EV> {
    pub start: usize,
    pub path: Vec<Target<EV>>,
}

impl<EV> Path<EV> {
    pub fn new(start: usize, path: Vec<Target<EV>>) -> Self {
        Self { start, path }
    }

    /// All nodes on the walk, `start` included.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.start).chain(self.path.iter().map(|t| t.target()))
    }
}

impl<EV: Zero + Copy> Path<EV> {
    pub fn cost(&self) -> EV {
        self.path.last().map_or(EV::zero(), |n| n.value)
    }
}

impl<EV> Target<EV> {
    pub fn new(target: usize, value: EV) -> Target<EV> {
        Self { target, value }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn value(&self) -> &EV {
        &self.value
    }
}

impl<EV> Hash for Target<EV> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.target.hash(state)
    }
}

impl<EV> PartialEq for Target<EV> {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl<EV> Eq for Target<EV> {}
