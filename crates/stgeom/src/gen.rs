//! Fixture generators for volumes and time series.
//!
//! Purpose
//! - Provide the deterministic frames the test-suite and benches are built
//!   on, plus seeded random frames for property tests. Seeds make every
//!   sample reproducible.
//!
//! Conventions
//! - A generated volume of `dims` voxels has index bounds
//!   `[-0.5, dim − 0.5]` per axis and origin 0, so that index `(0,0,0)`
//!   addresses the *center* of the first voxel and the world envelope runs
//!   from `-0.5·spacing` to `(dim − 0.5)·spacing`.

use nalgebra::{Rotation3, Unit, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::{BoundingBox, SpatialFrame};
use crate::timegeom::TimeIndexedGeometry;

/// Axis-aligned frame for a `dims` voxel volume with the given spacing.
pub fn volume_frame(dims: [u32; 3], spacing: [f64; 3]) -> SpatialFrame {
    let min = Vector3::repeat(-0.5);
    let max = Vector3::new(
        f64::from(dims[0]) - 0.5,
        f64::from(dims[1]) - 0.5,
        f64::from(dims[2]) - 0.5,
    );
    let spacing = Vector3::new(spacing[0], spacing[1], spacing[2]);
    SpatialFrame::axis_aligned(Vector3::zeros(), spacing, BoundingBox::new(min, max))
        .expect("generator spacing is positive")
}

/// Proportional time geometry over `steps` clones of a volume frame
/// (first time point 0, step duration 1 ms).
pub fn proportional_volume(
    dims: [u32; 3],
    spacing: [f64; 3],
    steps: usize,
) -> TimeIndexedGeometry {
    TimeIndexedGeometry::uniform(volume_frame(dims, spacing), steps)
}

/// Reproducible random frame: random origin, spacing, rotation and extent.
/// Spacing stays well away from zero so every sample is invertible.
pub fn random_frame(seed: u64) -> SpatialFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let origin = Vector3::new(
        rng.gen_range(-100.0..=100.0),
        rng.gen_range(-100.0..=100.0),
        rng.gen_range(-100.0..=100.0),
    );
    let spacing = Vector3::new(
        rng.gen_range(0.1..=3.0),
        rng.gen_range(0.1..=3.0),
        rng.gen_range(0.1..=3.0),
    );
    let axis = loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if v.norm() > 0.1 {
            break v;
        }
    };
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let direction = *Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle).matrix();
    let max = Vector3::new(
        rng.gen_range(4.0..=64.0_f64).floor() - 0.5,
        rng.gen_range(4.0..=64.0_f64).floor() - 0.5,
        rng.gen_range(4.0..=64.0_f64).floor() - 0.5,
    );
    let bounds = BoundingBox::new(Vector3::repeat(-0.5), max);
    SpatialFrame::new(origin, spacing, direction, bounds)
        .expect("generator frames satisfy the invariants")
}
