use crate::errors::{PathPlannerError, Result};
use super::Edge;

use tracing::trace;


/// Dense symmetric weight table
/// Absent and blocked corridors hold infinity
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix {
    vertex_count: usize,
    weights: Vec<f64>, // row-major, vertex_count * vertex_count
}

impl AdjacencyMatrix {

    /// Build the matrix from an undirected edge list
    /// Blocked edges are skipped entirely, duplicate pairs keep the last weight
    pub fn build(edges: &[Edge], vertex_count: usize) -> Result<Self> {
        let mut matrix = Self {
            vertex_count,
            weights: vec![f64::INFINITY; vertex_count * vertex_count],
        };

        for edge in edges {
            matrix.check_vertex(edge.from)?;
            matrix.check_vertex(edge.to)?;

            // blocked corridors are never read, whatever weight they carry
            if edge.blocked {
                continue;
            }

            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(PathPlannerError::InvalidWeight {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }

            matrix.weights[edge.from * vertex_count + edge.to] = edge.weight;
            matrix.weights[edge.to * vertex_count + edge.from] = edge.weight;
        }

        trace!(vertex_count, edge_count = edges.len(), "built adjacency matrix");
        Ok(matrix)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Weight of the corridor between two vertices, None if there is none
    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.vertex_count || to >= self.vertex_count {
            return None;
        }
        let weight = self.weights[from * self.vertex_count + to];
        weight.is_finite().then_some(weight)
    }

    /// Reachable neighbours of a vertex with their edge weights, in ascending index order
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let row: &[f64] = if vertex < self.vertex_count {
            &self.weights[vertex * self.vertex_count..(vertex + 1) * self.vertex_count]
        } else {
            &[]
        };

        row.iter()
            .enumerate()
            .filter(|(_, weight)| weight.is_finite())
            .map(|(neighbor, &weight)| (neighbor, weight))
    }

    pub(crate) fn check_vertex(&self, index: usize) -> Result<()> {
        if index < self.vertex_count {
            Ok(())
        } else {
            Err(PathPlannerError::InvalidVertex { index, vertex_count: self.vertex_count })
        }
    }
}
