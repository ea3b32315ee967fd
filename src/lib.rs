//! Escape route planning over building floor plans.
//!
//! A floor plan is an undirected graph of rooms, hallways and exits joined by
//! corridors. Corridors carry a weight and may be blocked. Four interchangeable
//! engines compute a route between two vertices:
//!
//! - [`dfs`] - some route, not necessarily the shortest
//! - [`bfs`] - fewest corridors
//! - [`dijkstra`] - lowest total weight
//! - [`AStar`] - lowest total weight, guided by straight-line distance
//!
//! Every engine returns a [`Path`]; an empty path means the goal is unreachable.
//! Malformed requests (out of range vertices, bad weights, missing or non-finite positions)
//! are rejected with a [`PathPlannerError`].
//!
//! ```
//! use egress::{find_path, Algorithm, Edge};
//!
//! fn main() -> egress::Result<()> {
//!     let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0), Edge::blocked(0, 2, 1.0)];
//!     let path = find_path(Algorithm::Dijkstra, &edges, 3, 0, 2, &[])?;
//!     assert_eq!(path.vertices(), &[0, 1, 2]);
//!
//!     // no open corridor reaches vertex 3
//!     let path = find_path(Algorithm::Bfs, &edges, 4, 0, 3, &[])?;
//!     assert!(path.is_empty());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod floor_plan;
mod collections;

pub use errors::{PathPlannerError, Result};
pub use geometry::Point;
pub use graph_algos::{
    bfs, dfs, dijkstra, dijkstra_distances, find_path, AStar, AdjacencyMatrix, Algorithm, Edge, Path,
};
pub use floor_plan::{FloorPlan, Route};
