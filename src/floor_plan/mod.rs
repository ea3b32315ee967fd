//! Floor plan documents and escape route resolution.
//!
//! A [`FloorPlan`] is the JSON layout produced by the editor: rooms, hallways and
//! exits placed on a canvas and joined by corridors. Route requests name nodes by
//! their string ids; this module maps them onto the dense vertex indices the
//! engines in [`crate::graph_algos`] work with, and maps the result back.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::collections::FxIndexMap;
use crate::errors::{PathPlannerError, Result};
use crate::geometry::Point;
use crate::graph_algos::{AdjacencyMatrix, Algorithm, Edge};


/// Complete floor plan document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub meta: PlanMeta,
    #[serde(default)]
    pub nodes: Vec<FloorNode>,
    #[serde(default)]
    pub edges: Vec<FloorEdge>,
    #[serde(default)]
    pub settings: PlanSettings,
}

/// Canvas size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanMeta {
    pub created_by: String,
    pub created_at: String,
    pub description: String,
}

/// Editor and routing settings stored with the plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanSettings {
    pub show_grid: bool,
    pub snap_to_grid: bool,
    pub path_algorithm: Algorithm,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            snap_to_grid: true,
            path_algorithm: Algorithm::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Room,
    Hallway,
    Exit,
}

/// Room, hallway or exit placed on the canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub hazard: bool,
}

impl FloorNode {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Unknown status strings read as open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    Blocked,
    #[default]
    #[serde(other)]
    Open,
}

/// Corridor between two nodes, referenced by node id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub status: EdgeStatus,
}

fn default_weight() -> f64 {
    1.0
}


/// Route resolved back to node ids
/// Empty node_ids means no escape path exists
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub algorithm: Algorithm,
    pub node_ids: Vec<String>,
    pub total_weight: f64,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
}


impl FloorPlan {

    /// Empty plan with default settings, a fresh v4 id and the current time
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            dimensions: Dimensions { width, height },
            meta: PlanMeta {
                created_by: "User".to_string(),
                created_at: Utc::now().to_rfc3339(),
                description: String::new(),
            },
            nodes: Vec::new(),
            edges: Vec::new(),
            settings: PlanSettings::default(),
        }
    }

    /// Load a layout from its JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: FloorPlan = serde_json::from_str(json)?;
        debug!(plan = %plan.id, nodes = plan.nodes.len(), edges = plan.edges.len(), "loaded floor plan");
        Ok(plan)
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Dense index of every node id, by position in the node list
    /// On duplicate ids the first occurrence wins
    fn vertex_indices(&self) -> FxIndexMap<&str, usize> {
        let mut indices = FxIndexMap::default();
        for (index, node) in self.nodes.iter().enumerate() {
            indices.entry(node.id.as_str()).or_insert(index);
        }
        indices
    }

    fn lookup(indices: &FxIndexMap<&str, usize>, id: &str) -> Result<usize> {
        indices
            .get(id)
            .copied()
            .ok_or_else(|| PathPlannerError::UnknownNode(id.to_string()))
    }

    /// Translate the corridors into index space
    fn graph_edges(&self, indices: &FxIndexMap<&str, usize>) -> Result<Vec<Edge>> {
        self.edges
            .iter()
            .map(|edge| {
                Ok(Edge {
                    from: Self::lookup(indices, &edge.from)?,
                    to: Self::lookup(indices, &edge.to)?,
                    weight: edge.weight,
                    blocked: edge.status == EdgeStatus::Blocked,
                })
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(FloorNode::position).collect()
    }

    /// The first node marked as an exit
    pub fn exit(&self) -> Option<&FloorNode> {
        self.nodes.iter().find(|node| node.kind == NodeKind::Exit)
    }

    /// Escape route from a node to the plan's exit, using the configured algorithm
    pub fn escape_route(&self, start_id: &str) -> Result<Route> {
        self.route_with(self.settings.path_algorithm, start_id)
    }

    /// Escape route from a node to the plan's exit with an explicit algorithm
    /// A* is swapped for Dijkstra when the plan's weights would let the heuristic overestimate
    pub fn route_with(&self, algorithm: Algorithm, start_id: &str) -> Result<Route> {
        let Some(exit) = self.exit() else {
            warn!(plan = %self.id, "floor plan has no exit node");
            return Err(PathPlannerError::NoExit);
        };
        self.route_between(algorithm, start_id, &exit.id)
    }

    /// Route between any two nodes
    pub fn route_between(&self, algorithm: Algorithm, start_id: &str, goal_id: &str) -> Result<Route> {
        let indices = self.vertex_indices();
        let start = Self::lookup(&indices, start_id)?;
        let goal = Self::lookup(&indices, goal_id)?;

        let edges = self.graph_edges(&indices)?;
        let matrix = AdjacencyMatrix::build(&edges, self.nodes.len())?;
        let positions = self.positions();

        // Straight-line distance only bounds the remaining cost when no corridor is shorter than it
        let algorithm = if algorithm == Algorithm::AStar && !distance_bounds_weights(&edges, &positions) {
            warn!(plan = %self.id, "corridor weights undercut straight-line distance, using dijkstra");
            Algorithm::Dijkstra
        } else {
            algorithm
        };

        let path = algorithm.plan(&matrix, start, goal, &positions)?;

        if path.is_empty() {
            warn!(plan = %self.id, start = start_id, goal = goal_id, %algorithm, "no route to goal");
        }

        let total_weight = path.total_weight(&matrix);
        let node_ids = path
            .into_vec()
            .into_iter()
            .map(|index| self.nodes[index].id.clone())
            .collect();

        Ok(Route { algorithm, node_ids, total_weight })
    }
}


/// True when every open corridor is at least as long as the straight line between its ends
fn distance_bounds_weights(edges: &[Edge], positions: &[Point]) -> bool {
    edges
        .iter()
        .filter(|edge| !edge.blocked)
        .all(|edge| edge.weight >= positions[edge.from].distance(&positions[edge.to]))
}
