//! Filter a data storage by geometric compatibility.
//!
//! Purpose
//! - Show the intended end-to-end flow: load a few nodes with different
//!   geometries, build a predicate tree against a reference volume, and
//!   query the subset of compatible nodes.
//! - Run with `RUST_LOG=debug` to see the verbose mismatch diagnostics from
//!   the compatibility checks.

use std::sync::Arc;

use nalgebra::Vector3;
use stgeom::compat::{are_equal, DEFAULT_COORDINATE_EPS, DEFAULT_DIRECTION_EPS};
use stgeom::frame::BoundingBox;
use stgeom::gen::{proportional_volume, volume_frame};
use stgeom::predicate::{
    AndPredicate, GeometryEqualityPredicate, NodePredicate, NotPredicate, SubGeometryPredicate,
};
use stgeom::storage::{DataNode, DataStorage};
use stgeom::{SpatialFrame, TimeIndexedGeometry};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let dims = [30, 25, 20];
    let spacing = [0.5, 0.33, 0.78];
    let reference = Arc::new(volume_frame(dims, spacing));

    let mut storage = DataStorage::new();
    storage.add(DataNode::new(
        "ct-volume",
        Arc::new(proportional_volume(dims, spacing, 5)),
    ));
    storage.add(DataNode::new(
        "segmentation-roi",
        Arc::new(TimeIndexedGeometry::uniform(interior_region(spacing), 1)),
    ));
    let mut misregistered = volume_frame(dims, spacing);
    misregistered.translate(Vector3::new(12.0, 0.0, 0.0));
    storage.add(DataNode::new(
        "misregistered",
        Arc::new(TimeIndexedGeometry::uniform(misregistered.clone(), 1)),
    ));
    storage.add(DataNode::without_data("placeholder"));

    // Emit the mismatch diagnostics for the misregistered node.
    are_equal(
        &misregistered,
        &reference,
        DEFAULT_COORDINATE_EPS,
        DEFAULT_DIRECTION_EPS,
        true,
    );

    let same_grid = SubGeometryPredicate::from_frame(Arc::clone(&reference), None)
        .expect("reference frame is valid");
    let exact = GeometryEqualityPredicate::from_frame(Arc::clone(&reference), None)
        .expect("reference frame is valid");

    // Proper sub-regions: on the reference grid but not the whole volume.
    let proper_sub = AndPredicate::new(vec![
        Box::new(same_grid),
        Box::new(NotPredicate::new(Box::new(exact))),
    ]);

    for node in storage.get_subset(&proper_sub) {
        tracing::info!(node = node.name(), "proper sub-region of the reference");
    }
}

/// A region one voxel inside the reference volume on every side.
fn interior_region(spacing: [f64; 3]) -> SpatialFrame {
    SpatialFrame::axis_aligned(
        Vector3::new(spacing[0], spacing[1], spacing[2]),
        Vector3::new(spacing[0], spacing[1], spacing[2]),
        BoundingBox::new(Vector3::repeat(-0.5), Vector3::new(27.5, 22.5, 17.5)),
    )
    .expect("spacing is positive")
}
