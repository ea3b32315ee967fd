use crate::errors::Result;
use super::{check_endpoints, shortest_path, AdjacencyMatrix, Path};

use std::collections::VecDeque;
use tracing::debug;


/// Breadth-first search
/// https://en.wikipedia.org/wiki/Breadth-first_search
/// Finds the route with the fewest corridors, edge weights are ignored
/// Ties between equally short routes go to the one discovered first (lowest neighbour index)
/// Returns an empty path when the goal cannot be reached
pub fn bfs(matrix: &AdjacencyMatrix, start: usize, goal: usize) -> Result<Path> {
    check_endpoints(matrix, start, goal)?;

    let vertex_count = matrix.vertex_count();
    let mut visited = vec![false; vertex_count];
    let mut predecessors: Vec<Option<usize>> = vec![None; vertex_count];

    // Frontier - first in, first out
    let mut queue = VecDeque::from([start]);
    visited[start] = true;
    let mut expanded = 0;

    while let Some(vertex) = queue.pop_front() {
        if vertex == goal {
            break;
        }
        expanded += 1;

        for (neighbor, _) in matrix.neighbors(vertex) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                predecessors[neighbor] = Some(vertex);
                queue.push_back(neighbor);
            }
        }
    }

    let path = shortest_path(&predecessors, goal, visited[goal]);
    debug!(start, goal, expanded, path_len = path.vertices().len(), "bfs finished");
    Ok(path)
}
