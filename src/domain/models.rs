use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Affine map from geographic `(lon, lat)` into visualization space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub scale: f64,
}

impl Projection {
    pub const DEFAULT_ORIGIN_LON: f64 = 5.8;
    pub const DEFAULT_ORIGIN_LAT: f64 = 47.0;
    pub const DEFAULT_SCALE: f64 = 50.0;

    pub fn new(origin_lon: f64, origin_lat: f64, scale: f64) -> Self {
        Self { origin_lon, origin_lat, scale }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Point {
        Point {
            x: (lon - self.origin_lon) * self.scale,
            y: (lat - self.origin_lat) * self.scale,
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ORIGIN_LON,
            Self::DEFAULT_ORIGIN_LAT,
            Self::DEFAULT_SCALE,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Deduplicated polyline graph. Node and edge indices of the inner graph are
/// the indices written to the output document.
#[derive(Clone, Debug, Default)]
pub struct BoundaryGraph {
    graph: DiGraph<Point, ()>,
}

impl BoundaryGraph {
    pub(crate) fn from_graph(graph: DiGraph<Point, ()>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &DiGraph<Point, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Point> + '_ {
        self.graph.node_weights()
    }

    pub fn node(&self, index: usize) -> Option<&Point> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Sum of the projected lengths of every edge, repeated segments included.
    pub fn total_distance(&self) -> f64 {
        self.graph
            .edge_references()
            .map(|e| self.graph[e.source()].distance(&self.graph[e.target()]))
            .sum()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut nodes = self.graph.node_weights();
        let first = nodes.next()?;
        let init = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(nodes.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes().map(|&location| NodeRecord { location }).collect(),
            edges: self
                .edges()
                .map(|(source, target)| EdgeRecord { source, target })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub location: Point,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: usize,
    pub target: usize,
}

/// On-disk shape: `{"nodes":[{"location":{..}}],"edges":[{"source":..,"target":..}]}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    pub fn into_graph(self) -> Result<BoundaryGraph> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        for node in self.nodes {
            graph.add_node(node.location);
        }
        let count = graph.node_count();
        for (i, edge) in self.edges.into_iter().enumerate() {
            if edge.source >= count || edge.target >= count {
                return Err(ConvertError::InvalidDocument(format!(
                    "edge {} ({} -> {}) references a missing node, graph has {} nodes",
                    i, edge.source, edge.target, count
                )));
            }
            graph.add_edge(NodeIndex::new(edge.source), NodeIndex::new(edge.target), ());
        }
        Ok(BoundaryGraph::from_graph(graph))
    }
}
