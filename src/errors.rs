use thiserror::Error;


/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PathPlannerError>;

/// Errors raised when a route request is malformed
/// An unreachable goal is not an error - engines return an empty path instead
#[derive(Debug, Error)]
pub enum PathPlannerError {
    #[error("vertex index {index} is out of range for a graph of {vertex_count} vertices")]
    InvalidVertex { index: usize, vertex_count: usize },

    #[error("edge {from}-{to} has invalid weight {weight}")]
    InvalidWeight { from: usize, to: usize, weight: f64 },

    #[error("A* needs a position for every vertex, got {given} of {vertex_count}")]
    MissingPositions { given: usize, vertex_count: usize },

    #[error("vertex {index} has a non-finite position ({x}, {y})")]
    InvalidPosition { index: usize, x: f64, y: f64 },

    #[error("unknown node id: {0}")]
    UnknownNode(String),

    #[error("floor plan has no exit node")]
    NoExit,

    #[error("unknown path algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid floor plan document: {0}")]
    Json(#[from] serde_json::Error),
}
