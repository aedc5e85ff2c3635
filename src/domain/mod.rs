pub mod dedup;
pub mod models;

pub use dedup::{ExactIndex, MergePolicy, PointIndex, PointKey, SpatialNode, ToleranceIndex};
pub use models::{BoundaryGraph, Bounds, EdgeRecord, GraphDocument, NodeRecord, Point, Projection};
