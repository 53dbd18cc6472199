//! Minimal node/data-storage abstraction the predicates evaluate against.
//!
//! The surrounding application owns the real data objects; this module only
//! pins the capability the geometry predicates need (`GeometrySource`) and a
//! small storage with subset queries. Nodes hold their data behind `Arc`s
//! that are treated as read-only; the caller retains primary ownership.

use std::sync::Arc;

use crate::frame::SpatialFrame;
use crate::predicate::NodePredicate;
use crate::timegeom::{TimeIndexedGeometry, TimeStep};

/// Capability of a data object: per-step frames plus the whole time
/// geometry.
pub trait GeometrySource {
    /// Frame at `step`, `None` out of range.
    fn geometry(&self, step: TimeStep) -> Option<&SpatialFrame>;
    /// The full time-indexed geometry.
    fn time_geometry(&self) -> &TimeIndexedGeometry;
}

/// A bare time geometry is a valid data object.
impl GeometrySource for TimeIndexedGeometry {
    fn geometry(&self, step: TimeStep) -> Option<&SpatialFrame> {
        self.geometry_for_time_step(step)
    }

    fn time_geometry(&self) -> &TimeIndexedGeometry {
        self
    }
}

/// Node wrapping an optional data object. A node without data is a normal
/// state (predicates evaluate it to `false`), not an error.
pub struct DataNode {
    name: String,
    data: Option<Arc<dyn GeometrySource + Send + Sync>>,
}

impl DataNode {
    pub fn new(name: impl Into<String>, data: Arc<dyn GeometrySource + Send + Sync>) -> Self {
        Self {
            name: name.into(),
            data: Some(data),
        }
    }

    pub fn without_data(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn data(&self) -> Option<&(dyn GeometrySource + Send + Sync)> {
        self.data.as_deref()
    }
}

impl std::fmt::Debug for DataNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataNode")
            .field("name", &self.name)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// Flat node collection with predicate-filtered subset queries.
#[derive(Debug, Default)]
pub struct DataStorage {
    nodes: Vec<Arc<DataNode>>,
}

impl DataStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: DataNode) -> Arc<DataNode> {
        let node = Arc::new(node);
        self.nodes.push(Arc::clone(&node));
        node
    }

    #[inline]
    pub fn nodes(&self) -> &[Arc<DataNode>] {
        &self.nodes
    }

    /// Nodes for which `predicate.check` returns true.
    pub fn get_subset(&self, predicate: &dyn NodePredicate) -> Vec<Arc<DataNode>> {
        self.nodes
            .iter()
            .filter(|node| predicate.check(node))
            .cloned()
            .collect()
    }
}
