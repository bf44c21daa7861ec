//! Error types for graph construction, solving and result verification.

use thiserror::Error;

/// Errors produced by the graph store, the solver and the post-condition checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MisError {
    /// A graph must have at least one vertex.
    #[error("invalid vertex count {0}: a graph needs at least one vertex")]
    InvalidVertexCount(usize),

    /// An edge endpoint outside `1..=n`.
    #[error("vertex {vertex} out of range 1..={n}")]
    VertexOutOfRange {
        /// Offending endpoint as given by the caller.
        vertex: i64,
        /// Vertex count of the graph.
        n: usize,
    },

    /// The worker pool needs at least one thread.
    #[error("invalid thread count {0}: at least one worker thread is required")]
    InvalidThreadCount(usize),

    /// A round task panicked; the whole solve is abandoned.
    #[error("worker {worker} panicked in stage {stage} ({round}): {message}")]
    WorkerPanicked {
        /// Index of the faulting worker.
        worker: usize,
        /// Stage in which the fault happened.
        stage: u32,
        /// Name of the round.
        round: &'static str,
        /// Panic payload, if it was a string.
        message: String,
    },

    /// Both endpoints of an edge are in the returned set.
    #[error("not independent: edge ({u}, {v}) lies inside the set")]
    NotIndependent {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },

    /// A vertex outside the set has no neighbor inside it.
    #[error("not maximal: vertex {0} could be added to the set")]
    NotMaximal(usize),

    /// A vertex id in a result that does not exist in the graph.
    #[error("unknown vertex {vertex} in result for a graph with {n} vertices")]
    UnknownVertex {
        /// Offending id.
        vertex: usize,
        /// Vertex count of the graph.
        n: usize,
    },

    /// Malformed textual graph input.
    #[error("malformed graph input: {0}")]
    Parse(String),

    /// I/O failure while reading graph input.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MisError {
    fn from(err: std::io::Error) -> Self {
        MisError::Io(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T, E = MisError> = std::result::Result<T, E>;
