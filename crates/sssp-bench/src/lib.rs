//! Timing comparison of a non-negative weight shortest path engine
//! (Dijkstra) against a negative tolerant one (Bellman-Ford).
//!
//! The numeric pipeline (`harness` -> `units` -> `timing`) works on plain
//! data and never touches a renderer. Drawing happens behind
//! [`report::ChartRenderer`].

pub mod config;
pub mod diagram;
pub mod error;
pub mod export;
pub mod harness;
pub mod report;
pub mod timing;
pub mod units;

pub use error::{Error, Result};
