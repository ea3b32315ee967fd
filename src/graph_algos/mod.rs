pub mod adjacency;
pub mod dfs;
pub mod bfs;
pub mod dijkstra;
pub mod a_star;
mod shortest_path;

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use shortest_path::shortest_path;

use crate::errors::{PathPlannerError, Result};
use crate::geometry::Point;

pub use adjacency::AdjacencyMatrix;
pub use a_star::AStar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::{dijkstra, dijkstra_distances};


/// Undirected corridor between two vertex indices
/// Blocked edges are dropped when the adjacency matrix is built
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
    pub blocked: bool,
}

impl Edge {

    /// Open edge with the given weight
    pub fn new(from: usize, to: usize, weight: f64) -> Self {
        Self { from, to, weight, blocked: false }
    }

    /// Blocked edge - never traversed by any engine
    pub fn blocked(from: usize, to: usize, weight: f64) -> Self {
        Self { from, to, weight, blocked: true }
    }
}


/// Ordered vertex indices from start to goal inclusive
/// An empty path means the goal is unreachable
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    vertices: Vec<usize>,
}

impl Path {

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of corridors walked
    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<usize> {
        self.vertices.first().copied()
    }

    pub fn goal(&self) -> Option<usize> {
        self.vertices.last().copied()
    }

    /// Sum of the edge weights along the path
    /// Steps with no edge in the matrix contribute infinity
    pub fn total_weight(&self, matrix: &AdjacencyMatrix) -> f64 {
        self.vertices
            .windows(2)
            .map(|step| matrix.weight(step[0], step[1]).unwrap_or(f64::INFINITY))
            .sum()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.vertices
    }
}

impl From<Vec<usize>> for Path {
    fn from(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }
}


/// Traversal strategy used to compute a route
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Dfs,
    Bfs,
    #[default]
    Dijkstra,
    AStar,
}

impl Algorithm {

    /// Run the selected engine over a prebuilt matrix
    /// positions are only read by A*
    pub fn plan(&self, matrix: &AdjacencyMatrix, start: usize, goal: usize, positions: &[Point]) -> Result<Path> {
        match self {
            Algorithm::Dfs => dfs(matrix, start, goal),
            Algorithm::Bfs => bfs(matrix, start, goal),
            Algorithm::Dijkstra => dijkstra(matrix, start, goal),
            Algorithm::AStar => AStar::new(positions).plan(matrix, start, goal),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        };
        f.write_str(name)
    }
}

impl FromStr for Algorithm {
    type Err = PathPlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "a*" | "astar" | "a_star" => Ok(Algorithm::AStar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            _ => Err(PathPlannerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = PathPlannerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.to_string()
    }
}


/// Build the matrix for this call and run one engine over it
pub fn find_path(
    algorithm: Algorithm,
    edges: &[Edge],
    vertex_count: usize,
    start: usize,
    goal: usize,
    positions: &[Point],
) -> Result<Path> {
    let matrix = AdjacencyMatrix::build(edges, vertex_count)?;
    algorithm.plan(&matrix, start, goal, positions)
}


/// Start and goal must both be vertices of the matrix
pub(crate) fn check_endpoints(matrix: &AdjacencyMatrix, start: usize, goal: usize) -> Result<()> {
    matrix.check_vertex(start)?;
    matrix.check_vertex(goal)
}
