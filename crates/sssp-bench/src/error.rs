use std::path::PathBuf;

use graph_rs::{GraphError, input::ParseError};
use thiserror::Error;

use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load graph {path}: {source}")]
    Graph {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Node(#[from] GraphError),

    #[error("invalid timing csv: {0}")]
    Csv(String),

    #[error("csv error: {0}")]
    CsvIo(#[from] csv::Error),

    #[error("invalid path file: {0}")]
    PathFile(String),

    #[error("unknown time unit '{0}' (expected s, ms, us or ns)")]
    Unit(String),

    #[error("no graphs to benchmark")]
    NoGraphs,

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type Result<T> = std::result::Result<T, Error>;
