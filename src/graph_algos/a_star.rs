use crate::errors::{PathPlannerError, Result};
use crate::geometry::Point;
use super::{check_endpoints, shortest_path, AdjacencyMatrix, Path};

use std::{
    collections::BinaryHeap,
    cmp::Ordering
};
use tracing::debug;



/// Entry in the open list
#[derive(Debug)]
struct Node {
    index: usize, // vertex index
    f_cost: f64, // Total cost = cost + h(n) aka estimated cost
}

// BinaryHeap pops the largest entry, so the ordering is reversed:
// lowest f_cost first, then lowest vertex index
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Node {}


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// Heuristic is the straight-line distance between vertex positions
///
/// The route is only guaranteed to be the cheapest when the heuristic is admissible,
/// i.e. every corridor weight is at least the straight-line distance between its ends.
/// Nothing checks this; lighter corridors still produce a valid, possibly longer, route.
pub struct AStar<'a> {
    positions: &'a [Point], // one position per vertex index
}

impl<'a> AStar<'a> {

    pub fn new(positions: &'a [Point]) -> Self {
        Self { positions }
    }

    /// From start vertex, expand the open vertex with the lowest estimated total cost until the goal is selected
    /// Ties on estimated cost go to the lowest vertex index
    /// Returns an empty path when the goal cannot be reached
    pub fn plan(&self, matrix: &AdjacencyMatrix, start: usize, goal: usize) -> Result<Path> {
        check_endpoints(matrix, start, goal)?;

        let vertex_count = matrix.vertex_count();
        if self.positions.len() < vertex_count {
            return Err(PathPlannerError::MissingPositions {
                given: self.positions.len(),
                vertex_count,
            });
        }

        if let Some((index, point)) = self.positions[..vertex_count]
            .iter()
            .enumerate()
            .find(|(_, point)| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(PathPlannerError::InvalidPosition { index, x: point.x, y: point.y });
        }

        let (g_score, came_from, expanded) = self.build_graph(matrix, start, goal);

        let path = shortest_path(&came_from, goal, g_score[goal].is_finite());
        debug!(start, goal, expanded, cost = g_score[goal], path_len = path.vertices().len(), "a* finished");
        Ok(path)
    }

    fn heuristic(&self, vertex: usize, goal: usize) -> f64 {
        self.positions[vertex].distance(&self.positions[goal])
    }

    /// Runs the search and returns the best known cost and parent of every vertex,
    /// along with the number of expanded vertices
    fn build_graph(&self, matrix: &AdjacencyMatrix, start: usize, goal: usize) -> (Vec<f64>, Vec<Option<usize>>, usize) {
        let vertex_count = matrix.vertex_count();

        let mut g_score = vec![f64::INFINITY; vertex_count];
        let mut f_score = vec![f64::INFINITY; vertex_count];
        let mut came_from: Vec<Option<usize>> = vec![None; vertex_count];

        // Open set membership, the heap may hold stale entries for a vertex
        let mut in_open = vec![false; vertex_count];
        let mut open_list: BinaryHeap<Node> = BinaryHeap::new();

        g_score[start] = 0.0;
        f_score[start] = self.heuristic(start, goal);
        in_open[start] = true;
        open_list.push(Node { index: start, f_cost: f_score[start] });

        let mut expanded = 0;

        while let Some(Node { index, f_cost }) = open_list.pop() {

            // Skip entries superseded by a cheaper estimate or already expanded
            if !in_open[index] || f_cost != f_score[index] {
                continue;
            }

            if index == goal {
                break;
            }

            in_open[index] = false;
            expanded += 1;

            for (neighbor, edge_cost) in matrix.neighbors(index) {
                // confirmed cost, not heuristic
                let tentative = g_score[index] + edge_cost;

                if tentative < g_score[neighbor] {
                    came_from[neighbor] = Some(index);
                    g_score[neighbor] = tentative;
                    f_score[neighbor] = tentative + self.heuristic(neighbor, goal);
                    in_open[neighbor] = true;
                    open_list.push(Node { index: neighbor, f_cost: f_score[neighbor] });
                }
            }
        }

        (g_score, came_from, expanded)
    }
}



#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_algos::{dijkstra, Edge};

    #[test]
    fn test_a_star_matches_dijkstra_with_zero_heuristic() {
        // Every vertex at the same spot makes A* behave like Dijkstra
        let edges = [
            Edge::new(0, 1, 1.0),
            Edge::new(0, 2, 3.0),
            Edge::new(1, 3, 5.0),
            Edge::new(2, 3, 1.0),
        ];
        let matrix = AdjacencyMatrix::build(&edges, 4).unwrap();
        let positions = vec![Point::default(); 4];

        let path = AStar::new(&positions).plan(&matrix, 0, 3).unwrap();
        assert_eq!(path.vertices(), &[0, 2, 3]);
        assert_eq!(path, dijkstra(&matrix, 0, 3).unwrap());
    }

    #[test]
    fn test_a_star_handles_unreachable_goal() {
        let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0)];
        let matrix = AdjacencyMatrix::build(&edges, 4).unwrap();
        let positions = vec![Point::default(); 4];

        let path = AStar::new(&positions).plan(&matrix, 0, 3).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_a_star_requires_positions() {
        let matrix = AdjacencyMatrix::build(&[Edge::new(0, 1, 1.0)], 3).unwrap();
        let positions = vec![Point::default(); 2];

        let result = AStar::new(&positions).plan(&matrix, 0, 1);
        assert!(matches!(result, Err(PathPlannerError::MissingPositions { given: 2, vertex_count: 3 })));
    }

    #[test]
    fn test_a_star_rejects_non_finite_positions() {
        let matrix = AdjacencyMatrix::build(&[Edge::new(0, 1, 1.0)], 2).unwrap();

        let positions = vec![Point::new(f64::NAN, 0.0), Point::new(1.0, 0.0)];
        let result = AStar::new(&positions).plan(&matrix, 0, 1);
        assert!(matches!(result, Err(PathPlannerError::InvalidPosition { index: 0, .. })));

        let positions = vec![Point::new(0.0, 0.0), Point::new(1.0, f64::INFINITY)];
        let result = AStar::new(&positions).plan(&matrix, 0, 1);
        assert!(matches!(result, Err(PathPlannerError::InvalidPosition { index: 1, .. })));
    }

    #[test]
    fn test_a_star_ignores_positions_past_vertex_count() {
        // Extra entries beyond the graph are never read
        let matrix = AdjacencyMatrix::build(&[Edge::new(0, 1, 1.0)], 2).unwrap();
        let positions = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(f64::NAN, 0.0)];

        let path = AStar::new(&positions).plan(&matrix, 0, 1).unwrap();
        assert_eq!(path.vertices(), &[0, 1]);
    }

    /// Open set kept as a flag per vertex, selection by scanning for the lowest (f, index)
    fn linear_scan_a_star(matrix: &AdjacencyMatrix, positions: &[Point], start: usize, goal: usize) -> (Path, usize) {
        let n = matrix.vertex_count();
        let h = |v: usize| positions[v].distance(&positions[goal]);
        let mut g = vec![f64::INFINITY; n];
        let mut f = vec![f64::INFINITY; n];
        let mut came_from = vec![None; n];
        let mut open = vec![false; n];
        g[start] = 0.0;
        f[start] = h(start);
        open[start] = true;
        let mut expanded = 0;

        while let Some(current) = (0..n).filter(|&v| open[v]).min_by(|&a, &b| f[a].total_cmp(&f[b])) {
            if current == goal {
                break;
            }
            open[current] = false;
            expanded += 1;
            for (neighbor, w) in matrix.neighbors(current) {
                if g[current] + w < g[neighbor] {
                    came_from[neighbor] = Some(current);
                    g[neighbor] = g[current] + w;
                    f[neighbor] = g[neighbor] + h(neighbor);
                    open[neighbor] = true;
                }
            }
        }
        (shortest_path(&came_from, goal, g[goal].is_finite()), expanded)
    }

    #[test]
    fn test_a_star_reopens_improved_closed_vertex() {
        // 1 sits far from the goal so the heuristic overestimates through it
        // 2 is expanded first via the heavy 0-2 corridor, then improved via 1 and expanded again
        //
        // 0(50,0) -1- 1(100,0) -1- 2(0,0) -200- 3(0,0)
        //   \________10__________/
        let positions = vec![
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let edges = [
            Edge::new(0, 1, 1.0),
            Edge::new(1, 2, 1.0),
            Edge::new(0, 2, 10.0),
            Edge::new(2, 3, 200.0),
        ];
        let matrix = AdjacencyMatrix::build(&edges, 4).unwrap();
        let a_star = AStar::new(&positions);

        let (g_score, _, expanded) = a_star.build_graph(&matrix, 0, 3);
        // 0, 2, 1, then 2 again
        assert_eq!(expanded, 4);
        assert_eq!(g_score[2], 2.0);
        assert_eq!(g_score[3], 202.0);

        let path = a_star.plan(&matrix, 0, 3).unwrap();
        assert_eq!(path.vertices(), &[0, 1, 2, 3]);

        let (reference, reference_expanded) = linear_scan_a_star(&matrix, &positions, 0, 3);
        assert_eq!(path, reference);
        assert_eq!(expanded, reference_expanded);
    }

    #[test]
    fn test_a_star_with_distance_weights() {
        // Corridors weighted by their length, so the heuristic is admissible
        //
        // 0(0,0) --- 1(10,0) --- 2(20,0)
        //   \                      |
        //    3(5,-5) ---------- 4(20,-5)
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(5.0, -5.0),
            Point::new(20.0, -5.0),
        ];
        let corridor = |a: usize, b: usize| Edge::new(a, b, positions[a].distance(&positions[b]));
        let edges = [corridor(0, 1), corridor(1, 2), corridor(0, 3), corridor(3, 4), corridor(4, 2)];
        let matrix = AdjacencyMatrix::build(&edges, 5).unwrap();

        let path = AStar::new(&positions).plan(&matrix, 0, 2).unwrap();
        assert_eq!(path.vertices(), &[0, 1, 2]);
        assert!((path.total_weight(&matrix) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_a_star_expands_fewer_vertices_than_dijkstra_would() {
        // Straight hallway with a side wing heading away from the goal
        // 3 <- 0 -> 1 -> 2
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(-1.0, 0.0),
        ];
        let edges = [Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0), Edge::new(0, 3, 1.0)];
        let matrix = AdjacencyMatrix::build(&edges, 4).unwrap();

        let (_, _, expanded) = AStar::new(&positions).build_graph(&matrix, 0, 2);
        // 0 and 1 are expanded, 3 never is
        assert_eq!(expanded, 2);
    }

    #[test]
    fn test_a_star_tie_goes_to_lowest_index() {
        // 1 and 2 sit at the same spot with the same cost
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        let edges = [
            Edge::new(0, 2, 2.0),
            Edge::new(0, 1, 2.0),
            Edge::new(2, 3, 2.0),
            Edge::new(1, 3, 2.0),
        ];
        let matrix = AdjacencyMatrix::build(&edges, 4).unwrap();

        let path = AStar::new(&positions).plan(&matrix, 0, 3).unwrap();
        assert_eq!(path.vertices(), &[0, 1, 3]);
    }

    #[test]
    fn test_node_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(Node { index: 4, f_cost: 2.0 });
        heap.push(Node { index: 1, f_cost: 3.0 });
        heap.push(Node { index: 2, f_cost: 2.0 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|node| node.index)).collect();
        assert_eq!(order, vec![2, 4, 1]);
    }
}
