use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a search call.
///
/// Not finding a path is *not* an error. Searches report it as an empty path
/// with `solution_depth = -1`.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A node required by the search is not part of the graph.
    #[error("Node '{0}' not found in graph.")]
    NodeNotFound(String),
    #[error(transparent)]
    Profiling(#[from] ProfilingError),
}

/// The memory/time instrumentation could not be trusted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfilingError {
    #[error(
        "No allocations were observed by PeakAlloc. Install it as the #[global_allocator] to measure memory."
    )]
    AllocatorNotInstalled,
    #[error("A profiling scope is already active in this process.")]
    AlreadyActive,
    #[error("The profiling scope was released before it ended.")]
    NotActive,
}

/// Invalid graph construction.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Edge {a}-{b} has invalid weight {weight}. Weights must be finite and nonnegative.")]
    InvalidWeight { a: String, b: String, weight: f64 },
}

/// Failures while reading a graph from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed reading {path}. {e}")]
    IOError {
        path: PathBuf,
        #[source]
        e: std::io::Error,
    },
    #[error("Failed parsing CSV {path}. {e}")]
    CsvError {
        path: PathBuf,
        #[source]
        e: csv::Error,
    },
    #[error("No {column} column found in {path} (headers: {headers:?}).")]
    MissingColumn {
        column: &'static str,
        path: PathBuf,
        headers: Vec<String>,
    },
    #[error("Invalid {column} value '{value}' for node '{node}' in {path}.")]
    InvalidCoordinate {
        column: &'static str,
        node: String,
        value: String,
        path: PathBuf,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Failures while benchmarking.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("Benchmarks need at least one repetition.")]
    NoRepeats,
    #[error(transparent)]
    Search(#[from] SearchError),
}
