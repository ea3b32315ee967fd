use crate::errors::Result;
use super::{check_endpoints, shortest_path, AdjacencyMatrix, Path};

use tracing::debug;


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Minimises the total corridor weight from start to goal
/// Returns an empty path when the goal cannot be reached
pub fn dijkstra(matrix: &AdjacencyMatrix, start: usize, goal: usize) -> Result<Path> {
    check_endpoints(matrix, start, goal)?;

    let (distances, predecessors) = build_dijkstra_tree(matrix, start);

    let path = shortest_path(&predecessors, goal, distances[goal].is_finite());
    debug!(start, goal, cost = distances[goal], path_len = path.vertices().len(), "dijkstra finished");
    Ok(path)
}


/// Returns the cost of the cheapest route from start to every vertex
/// Unreachable vertices are infinite
pub fn dijkstra_distances(matrix: &AdjacencyMatrix, start: usize) -> Result<Vec<f64>> {
    matrix.check_vertex(start)?;
    let (distances, _) = build_dijkstra_tree(matrix, start);
    Ok(distances)
}


/// Settles every reachable vertex in order of distance
/// Vertex selection is a linear scan, ties go to the lowest index
/// Returns the distance and predecessor of each vertex
fn build_dijkstra_tree(matrix: &AdjacencyMatrix, start: usize) -> (Vec<f64>, Vec<Option<usize>>) {
    let vertex_count = matrix.vertex_count();

    let mut distances = vec![f64::INFINITY; vertex_count];
    let mut predecessors: Vec<Option<usize>> = vec![None; vertex_count];
    let mut visited = vec![false; vertex_count];
    distances[start] = 0.0;

    for _ in 0..vertex_count {
        // min_by keeps the first of equal elements, so the lowest index wins ties
        let closest = (0..vertex_count)
            .filter(|&vertex| !visited[vertex])
            .min_by(|&a, &b| distances[a].total_cmp(&distances[b]));

        let vertex = match closest {
            Some(vertex) if distances[vertex].is_finite() => vertex,
            // everything left is unreachable
            _ => break,
        };
        visited[vertex] = true;

        for (neighbor, edge_cost) in matrix.neighbors(vertex) {
            let new_cost = distances[vertex] + edge_cost;
            if new_cost < distances[neighbor] {
                distances[neighbor] = new_cost;
                predecessors[neighbor] = Some(vertex);
            }
        }
    }

    (distances, predecessors)
}
