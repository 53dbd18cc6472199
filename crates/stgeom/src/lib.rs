//! Spatio-temporal geometry for volumetric datasets.
//!
//! Purpose
//! - Model a per-timestep spatial coordinate frame (origin, spacing,
//!   orientation, index bounds) and a time-indexed sequence of such frames
//!   with continuous-time ↔ discrete-step mapping.
//! - Provide tolerance-based compatibility checks (exact equality, sub-grid
//!   containment) and boolean node predicates built on them, used to filter
//!   data-storage nodes by spatial compatibility.
//!
//! Why this design
//! - Frames are plain value types over `nalgebra`; all maps are explicit
//!   affine maps with `Option`/`Result` on the fallible seams.
//! - Time conversions are total functions (they extrapolate rather than
//!   fail); range *queries* return `None` out of range, range *setters*
//!   return errors. See `timegeom` for the exact clamping rules.
//! - Single-threaded, synchronous evaluation: readers may overlap, writers
//!   must be externally serialized per instance. No internal locking.

pub mod compat;
pub mod error;
pub mod frame;
pub mod gen;
pub mod predicate;
pub mod storage;
pub mod timegeom;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::GeomError;
pub use frame::{AffineMap, BoundingBox, FrameOp, SpatialFrame};
pub use timegeom::{TimeIndexedGeometry, TimePoint, TimeStep};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::compat::{
        are_equal, are_equal_time, is_sub_geometry, DEFAULT_COORDINATE_EPS, DEFAULT_DIRECTION_EPS,
    };
    pub use crate::error::GeomError;
    pub use crate::frame::{AffineMap, BoundingBox, FrameOp, SpatialFrame};
    pub use crate::predicate::{
        AndPredicate, GeometryEqualityPredicate, NodePredicate, NotPredicate, OrPredicate,
        SubGeometryPredicate,
    };
    pub use crate::storage::{DataNode, DataStorage, GeometrySource};
    pub use crate::timegeom::{TimeIndexedGeometry, TimePoint, TimeStep};
    pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};
}
