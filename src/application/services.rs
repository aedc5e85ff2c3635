use std::fmt;
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::{BoundaryGraph, Bounds, MergePolicy, Point, PointIndex, Projection};
use crate::error::{ConvertError, Result};
use crate::infrastructure::read_lines;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConvertOptions {
    pub projection: Projection,
    pub merge: MergePolicy,
}

/// Parses one `lon,lat,lon,lat,...` line into coordinate pairs.
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line_no: usize, line: &str) -> Result<Vec<(f64, f64)>> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }
    let values = line
        .split(',')
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(ConvertError::MalformedLine {
                    line: line_no,
                    reason: format!("value {} `{}` is not a finite number", i + 1, token),
                }),
            }
        })
        .collect::<Result<Vec<f64>>>()?;
    if values.len() % 2 != 0 {
        return Err(ConvertError::MalformedLine {
            line: line_no,
            reason: format!("odd number of values ({})", values.len()),
        });
    }
    Ok(values.chunks_exact(2).map(|c| (c[0], c[1])).collect())
}

/// Accumulates polylines into a deduplicated graph.
pub struct GraphBuilder {
    projection: Projection,
    graph: DiGraph<Point, ()>,
    index: Box<dyn PointIndex>,
}

impl GraphBuilder {
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            projection: options.projection,
            graph: DiGraph::new(),
            index: options.merge.index(),
        }
    }

    fn node_for(&mut self, point: Point) -> NodeIndex {
        if let Some(idx) = self.index.find(&point) {
            return idx;
        }
        let idx = self.graph.add_node(point);
        self.index.insert(point, idx);
        idx
    }

    /// Adds one polyline and returns the number of edges it contributed.
    /// Fewer than two points contribute neither nodes nor edges. A point that
    /// projects outside the finite range fails the line before the graph is
    /// touched.
    pub fn add_polyline(&mut self, line_no: usize, coords: &[(f64, f64)]) -> Result<usize> {
        if coords.len() < 2 {
            return Ok(0);
        }
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, &(lon, lat))| {
                let point = self.projection.project(lon, lat);
                if point.x.is_finite() && point.y.is_finite() {
                    Ok(point)
                } else {
                    Err(ConvertError::MalformedLine {
                        line: line_no,
                        reason: format!(
                            "point {} ({}, {}) projects to non-finite ({}, {})",
                            i + 1,
                            lon,
                            lat,
                            point.x,
                            point.y
                        ),
                    })
                }
            })
            .collect::<Result<Vec<Point>>>()?;
        let nodes: Vec<NodeIndex> = points.into_iter().map(|p| self.node_for(p)).collect();
        for pair in nodes.windows(2) {
            self.graph.add_edge(pair[0], pair[1], ());
        }
        trace!(points = coords.len(), edges = nodes.len() - 1, "polyline");
        Ok(nodes.len() - 1)
    }

    pub fn finish(self) -> BoundaryGraph {
        BoundaryGraph::from_graph(self.graph)
    }
}

/// Converts every line, failing on the first malformed one.
#[tracing::instrument(skip_all)]
pub fn convert_lines<I, S>(lines: I, options: &ConvertOptions) -> Result<BoundaryGraph>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GraphBuilder::new(options);
    let mut polylines = 0;
    for (i, line) in lines.into_iter().enumerate() {
        let line_no = i + 1;
        let coords = parse_line(line_no, line.as_ref())?;
        if builder.add_polyline(line_no, &coords)? > 0 {
            polylines += 1;
        }
    }
    let graph = builder.finish();
    info!(
        polylines,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built graph"
    );
    Ok(graph)
}

#[tracing::instrument(skip(options), fields(path = %path.display()))]
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<BoundaryGraph> {
    let lines = read_lines(path)?;
    convert_lines(&lines, options)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub total_distance: f64,
    pub bounds: Option<Bounds>,
}

pub fn summarize(graph: &BoundaryGraph) -> GraphSummary {
    GraphSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        total_distance: graph.total_distance(),
        bounds: graph.bounds(),
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} edges, total length {:.3}",
            self.nodes, self.edges, self.total_distance
        )?;
        if let Some(b) = self.bounds {
            write!(
                f,
                ", extent x {:.3}..{:.3} y {:.3}..{:.3}",
                b.min_x, b.max_x, b.min_y, b.max_y
            )?;
        }
        Ok(())
    }
}
