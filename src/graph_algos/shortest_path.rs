use super::Path;

/// Construct the path from the start vertex to the goal
/// Walks predecessor links back from the goal and reverses them
/// predecessors: parent of every vertex, None for the start and for undiscovered vertices
/// reached: whether the engine ever assigned the goal a finite cost
pub(crate) fn shortest_path(predecessors: &[Option<usize>], goal: usize, reached: bool) -> Path {
    if !reached {
        return Path::default();
    }

    let mut vertices = Vec::new();
    let mut current = Some(goal);

    // Trace back from goal to start
    while let Some(vertex) = current {
        vertices.push(vertex);
        current = predecessors[vertex];
    }

    // The path is in reverse order, so reverse it
    vertices.reverse();
    Path::from(vertices)
}
