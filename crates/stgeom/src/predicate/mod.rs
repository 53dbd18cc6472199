//! Boolean node predicates over geometry compatibility.
//!
//! Purpose
//! - Leaf predicates (`GeometryEqualityPredicate`, `SubGeometryPredicate`)
//!   compare a node's geometry against a reference supplied at construction
//!   time; AND/OR/NOT composites combine arbitrary predicates into a tree
//!   evaluated by `DataStorage::get_subset`.
//!
//! Ownership
//! - References are held as `Arc`s documented read-only: the predicate never
//!   mutates them and the caller retains primary ownership. Construction
//!   rejects references that can never match (degenerate frame, empty time
//!   geometry) with `GeomError::InvalidReference`.
//!
//! Evaluation is stateless; tolerances are configuration. Reusing a
//! predicate from several threads is fine as long as nobody reconfigures the
//! tolerances concurrently.


use std::sync::Arc;

use crate::compat::{
    are_equal, are_equal_time, is_sub_geometry, DEFAULT_COORDINATE_EPS, DEFAULT_DIRECTION_EPS,
};
use crate::error::GeomError;
use crate::frame::SpatialFrame;
use crate::storage::DataNode;
use crate::timegeom::{TimeIndexedGeometry, TimePoint, TimeStep};

/// Boolean query over a node. Leaves compare geometry; composites expose
/// their children.
pub trait NodePredicate {
    fn check(&self, node: &DataNode) -> bool;

    /// Child predicates of composite variants; leaves return an empty slice.
    fn children(&self) -> &[Box<dyn NodePredicate>] {
        &[]
    }
}

/// Reference the leaf predicates compare against.
enum GeometryReference {
    /// Single frame, optionally pinned to an explicit time point of the
    /// node (first step when `None`).
    Frame {
        frame: Arc<SpatialFrame>,
        time_point: Option<TimePoint>,
    },
    /// Whole time geometry, compared step by step.
    TimeGeometry(Arc<TimeIndexedGeometry>),
}

impl GeometryReference {
    /// Step of `node`'s data the single-frame forms compare at.
    fn resolve_step(
        time_point: Option<TimePoint>,
        data: &(dyn crate::storage::GeometrySource + Send + Sync),
    ) -> Option<TimeStep> {
        match time_point {
            None => Some(0),
            Some(t) => {
                let tg = data.time_geometry();
                if !tg.is_valid_time_point(t) {
                    return None;
                }
                Some(tg.time_point_to_time_step(t))
            }
        }
    }
}

/// Matches nodes whose geometry equals the reference within the configured
/// tolerances.
pub struct GeometryEqualityPredicate {
    reference: GeometryReference,
    coordinate_eps: f64,
    direction_eps: f64,
}

impl GeometryEqualityPredicate {
    /// Compare against one frame, at `time_point` of the node if given,
    /// otherwise at its first time step.
    pub fn from_frame(
        frame: Arc<SpatialFrame>,
        time_point: Option<TimePoint>,
    ) -> Result<Self, GeomError> {
        if !frame.is_valid() {
            return Err(GeomError::InvalidReference);
        }
        Ok(Self {
            reference: GeometryReference::Frame { frame, time_point },
            coordinate_eps: DEFAULT_COORDINATE_EPS,
            direction_eps: DEFAULT_DIRECTION_EPS,
        })
    }

    /// Compare against a whole time geometry, step by step.
    pub fn from_time_geometry(time_geometry: Arc<TimeIndexedGeometry>) -> Result<Self, GeomError> {
        if time_geometry.is_empty() {
            return Err(GeomError::InvalidReference);
        }
        Ok(Self {
            reference: GeometryReference::TimeGeometry(time_geometry),
            coordinate_eps: DEFAULT_COORDINATE_EPS,
            direction_eps: DEFAULT_DIRECTION_EPS,
        })
    }

    pub fn set_coordinate_precision(&mut self, eps: f64) {
        self.coordinate_eps = eps;
    }

    pub fn set_direction_precision(&mut self, eps: f64) {
        self.direction_eps = eps;
    }

    /// Set both tolerances at once.
    pub fn set_precision(&mut self, eps: f64) {
        self.coordinate_eps = eps;
        self.direction_eps = eps;
    }
}

impl NodePredicate for GeometryEqualityPredicate {
    fn check(&self, node: &DataNode) -> bool {
        let Some(data) = node.data() else {
            return false;
        };
        match &self.reference {
            GeometryReference::TimeGeometry(reference) => are_equal_time(
                data.time_geometry(),
                reference,
                self.coordinate_eps,
                self.direction_eps,
                false,
            ),
            GeometryReference::Frame { frame, time_point } => {
                let Some(step) = GeometryReference::resolve_step(*time_point, data) else {
                    return false;
                };
                match data.geometry(step) {
                    Some(node_frame) => are_equal(
                        node_frame,
                        frame,
                        self.coordinate_eps,
                        self.direction_eps,
                        false,
                    ),
                    None => false,
                }
            }
        }
    }
}

/// Matches nodes whose geometry is a grid-aligned sub-region of the
/// reference frame. Single-frame reference form only.
pub struct SubGeometryPredicate {
    frame: Arc<SpatialFrame>,
    time_point: Option<TimePoint>,
    coordinate_eps: f64,
    direction_eps: f64,
}

impl SubGeometryPredicate {
    pub fn from_frame(
        frame: Arc<SpatialFrame>,
        time_point: Option<TimePoint>,
    ) -> Result<Self, GeomError> {
        if !frame.is_valid() {
            return Err(GeomError::InvalidReference);
        }
        Ok(Self {
            frame,
            time_point,
            coordinate_eps: DEFAULT_COORDINATE_EPS,
            direction_eps: DEFAULT_DIRECTION_EPS,
        })
    }

    pub fn set_coordinate_precision(&mut self, eps: f64) {
        self.coordinate_eps = eps;
    }

    pub fn set_direction_precision(&mut self, eps: f64) {
        self.direction_eps = eps;
    }

    /// Set both tolerances at once.
    pub fn set_precision(&mut self, eps: f64) {
        self.coordinate_eps = eps;
        self.direction_eps = eps;
    }
}

impl NodePredicate for SubGeometryPredicate {
    fn check(&self, node: &DataNode) -> bool {
        let Some(data) = node.data() else {
            return false;
        };
        let Some(step) = GeometryReference::resolve_step(self.time_point, data) else {
            return false;
        };
        match data.geometry(step) {
            Some(candidate) => is_sub_geometry(
                candidate,
                &self.frame,
                self.coordinate_eps,
                self.direction_eps,
                false,
            ),
            None => false,
        }
    }
}

/// True iff every child matches. An empty conjunction matches everything.
#[derive(Default)]
pub struct AndPredicate {
    children: Vec<Box<dyn NodePredicate>>,
}

impl AndPredicate {
    pub fn new(children: Vec<Box<dyn NodePredicate>>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: Box<dyn NodePredicate>) {
        self.children.push(child);
    }
}

impl NodePredicate for AndPredicate {
    fn check(&self, node: &DataNode) -> bool {
        self.children.iter().all(|child| child.check(node))
    }

    fn children(&self) -> &[Box<dyn NodePredicate>] {
        &self.children
    }
}

/// True iff at least one child matches.
#[derive(Default)]
pub struct OrPredicate {
    children: Vec<Box<dyn NodePredicate>>,
}

impl OrPredicate {
    pub fn new(children: Vec<Box<dyn NodePredicate>>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: Box<dyn NodePredicate>) {
        self.children.push(child);
    }
}

impl NodePredicate for OrPredicate {
    fn check(&self, node: &DataNode) -> bool {
        self.children.iter().any(|child| child.check(node))
    }

    fn children(&self) -> &[Box<dyn NodePredicate>] {
        &self.children
    }
}

/// Negates its single child.
pub struct NotPredicate {
    child: Vec<Box<dyn NodePredicate>>,
}

impl NotPredicate {
    pub fn new(child: Box<dyn NodePredicate>) -> Self {
        Self { child: vec![child] }
    }
}

impl NodePredicate for NotPredicate {
    fn check(&self, node: &DataNode) -> bool {
        !self.child[0].check(node)
    }

    fn children(&self) -> &[Box<dyn NodePredicate>] {
        &self.child
    }
}
