use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use super::models::Point;

/// Maps points to the node that already represents them.
pub trait PointIndex {
    fn find(&self, point: &Point) -> Option<NodeIndex>;
    fn insert(&mut self, point: Point, index: NodeIndex);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MergePolicy {
    /// Points merge only when numerically equal.
    #[default]
    Exact,
    /// Points merge into an existing node strictly closer than the radius.
    Tolerance(f64),
}

impl MergePolicy {
    pub fn index(&self) -> Box<dyn PointIndex> {
        match *self {
            MergePolicy::Exact => Box::new(ExactIndex::default()),
            MergePolicy::Tolerance(radius) => Box::new(ToleranceIndex::new(radius)),
        }
    }
}

/// Bit-exact key; `-0.0` and `0.0` share a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointKey(u64, u64);

impl From<&Point> for PointKey {
    fn from(p: &Point) -> Self {
        fn bits(v: f64) -> u64 {
            if v == 0.0 { 0 } else { v.to_bits() }
        }
        PointKey(bits(p.x), bits(p.y))
    }
}

#[derive(Debug, Default)]
pub struct ExactIndex {
    map: HashMap<PointKey, NodeIndex>,
}

impl PointIndex for ExactIndex {
    fn find(&self, point: &Point) -> Option<NodeIndex> {
        self.map.get(&PointKey::from(point)).copied()
    }

    fn insert(&mut self, point: Point, index: NodeIndex) {
        self.map.insert(PointKey::from(&point), index);
    }
}

/// A graph node as stored in the R-tree used for tolerance merging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialNode {
    pub position: [f64; 2],
    pub index: NodeIndex,
}

impl RTreeObject for SpatialNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for SpatialNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        (self.position[0] - point[0]).powi(2) + (self.position[1] - point[1]).powi(2)
    }
}

pub struct ToleranceIndex {
    radius: f64,
    tree: RTree<SpatialNode>,
}

impl ToleranceIndex {
    pub fn new(radius: f64) -> Self {
        Self { radius, tree: RTree::new() }
    }
}

impl PointIndex for ToleranceIndex {
    fn find(&self, point: &Point) -> Option<NodeIndex> {
        let r2 = self.radius * self.radius;
        let query = [point.x, point.y];
        // lowest index wins so the result does not depend on tree layout
        self.tree
            .locate_within_distance(query, r2)
            .filter(|n| n.distance_2(&query) < r2)
            .map(|n| n.index)
            .min()
    }

    fn insert(&mut self, point: Point, index: NodeIndex) {
        self.tree.insert(SpatialNode { position: [point.x, point.y], index });
    }
}
