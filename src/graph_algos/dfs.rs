use crate::errors::Result;
use super::{check_endpoints, AdjacencyMatrix, Path};

use tracing::debug;


/// Depth-first search
/// https://en.wikipedia.org/wiki/Depth-first_search
/// Finds some route from start to goal, not necessarily the shortest
/// Neighbours are tried in ascending index order; dead ends are popped and the search backtracks
/// Returns an empty path when the goal cannot be reached
pub fn dfs(matrix: &AdjacencyMatrix, start: usize, goal: usize) -> Result<Path> {
    check_endpoints(matrix, start, goal)?;

    let vertex_count = matrix.vertex_count();
    let mut visited = vec![false; vertex_count];

    // Each frame is (vertex, next neighbour index to try)
    // The frames on the stack are always the path under construction
    let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
    visited[start] = true;
    let mut expanded = 1;

    while let Some(frame) = frames.last_mut() {
        let (vertex, next) = *frame;

        if vertex == goal {
            break;
        }

        let candidate = (next..vertex_count)
            .find(|&neighbor| !visited[neighbor] && matrix.weight(vertex, neighbor).is_some());

        match candidate {
            Some(neighbor) => {
                // resume after this neighbour when we come back to the frame
                frame.1 = neighbor + 1;
                visited[neighbor] = true;
                expanded += 1;
                frames.push((neighbor, 0));
            }
            None => {
                // dead end, backtrack to the parent
                frames.pop();
            }
        }
    }

    let path = Path::from(frames.into_iter().map(|(vertex, _)| vertex).collect::<Vec<_>>());
    debug!(start, goal, expanded, path_len = path.vertices().len(), "dfs finished");
    Ok(path)
}
