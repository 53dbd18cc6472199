//! Spatial coordinate frames: index ↔ world affine maps over a voxel grid.
//!
//! Purpose
//! - `SpatialFrame` maps discrete index coordinates to world coordinates via
//!   `world = direction · diag(spacing) · index + origin` and owns an
//!   index-space bounding box.
//!
//! Assumptions and conventions
//! - `spacing` components are strictly positive; `direction` columns are the
//!   unit axis vectors. Both invariants are maintained by the setters:
//!   arbitrary index-to-world matrices are decomposed into unit columns plus
//!   column-norm spacing on the way in.
//! - In-place mutation (`translate`, `rotate`, `compose`) is local to the
//!   frame; owners holding an aggregate bounding box must recompute it.
//! - Degenerate maps are a programming-time precondition violation and are
//!   reported as `GeomError::DegenerateTransform`, never a panic.

mod types;


pub use types::{AffineMap, BoundingBox};

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

use crate::error::GeomError;

/// Affine coordinate frame (origin, spacing, orientation) plus index bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialFrame {
    origin: Vector3<f64>,
    spacing: Vector3<f64>,
    direction: Matrix3<f64>,
    bounds: BoundingBox,
}

impl Default for SpatialFrame {
    fn default() -> Self {
        Self {
            origin: Vector3::zeros(),
            spacing: Vector3::repeat(1.0),
            direction: Matrix3::identity(),
            bounds: BoundingBox::new(Vector3::zeros(), Vector3::repeat(1.0)),
        }
    }
}

/// Interactive transform applied uniformly to all time steps of a series.
#[derive(Clone, Copy, Debug)]
pub enum FrameOp {
    Translate {
        offset: Vector3<f64>,
    },
    /// Rotation of `angle_degrees` about `axis` through `center` (world).
    Rotate {
        center: Vector3<f64>,
        axis: Vector3<f64>,
        angle_degrees: f64,
    },
}

impl SpatialFrame {
    /// Build a frame from explicit components. The direction columns are
    /// re-normalized; their norms must be non-zero.
    pub fn new(
        origin: Vector3<f64>,
        spacing: Vector3<f64>,
        direction: Matrix3<f64>,
        bounds: BoundingBox,
    ) -> Result<Self, GeomError> {
        check_spacing(spacing)?;
        let (direction, scale) = decompose_columns(&direction)?;
        // Fold any residual column scale into the spacing.
        let spacing = spacing.component_mul(&scale);
        Ok(Self {
            origin,
            spacing,
            direction,
            bounds,
        })
    }

    /// Axis-aligned frame (identity orientation).
    pub fn axis_aligned(
        origin: Vector3<f64>,
        spacing: Vector3<f64>,
        bounds: BoundingBox,
    ) -> Result<Self, GeomError> {
        check_spacing(spacing)?;
        Ok(Self {
            origin,
            spacing,
            direction: Matrix3::identity(),
            bounds,
        })
    }

    #[inline]
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    #[inline]
    pub fn spacing(&self) -> Vector3<f64> {
        self.spacing
    }

    #[inline]
    pub fn direction(&self) -> &Matrix3<f64> {
        &self.direction
    }

    /// Index-space bounds.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    #[inline]
    pub fn set_origin(&mut self, origin: Vector3<f64>) {
        self.origin = origin;
    }

    pub fn set_spacing(&mut self, spacing: Vector3<f64>) -> Result<(), GeomError> {
        check_spacing(spacing)?;
        self.spacing = spacing;
        Ok(())
    }

    #[inline]
    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    /// The index→world map `p ↦ direction · diag(spacing) · p + origin`.
    #[inline]
    pub fn affine_map(&self) -> AffineMap {
        AffineMap::new(
            self.direction * Matrix3::from_diagonal(&self.spacing),
            self.origin,
        )
    }

    /// Replace the full index→world transform. The matrix is decomposed into
    /// unit direction columns and column-norm spacing.
    pub fn set_index_to_world_transform(&mut self, map: &AffineMap) -> Result<(), GeomError> {
        let (direction, spacing) = decompose_columns(&map.m)?;
        self.direction = direction;
        self.spacing = spacing;
        self.origin = map.t;
        Ok(())
    }

    #[inline]
    pub fn index_to_world(&self, index: Vector3<f64>) -> Vector3<f64> {
        self.affine_map().apply(index)
    }

    /// Inverse map. Fails only for a degenerate transform, which the setters
    /// reject; reaching the error here means an invariant was bypassed.
    pub fn world_to_index(&self, world: Vector3<f64>) -> Result<Vector3<f64>, GeomError> {
        let inv = self
            .affine_map()
            .inverse()
            .ok_or(GeomError::DegenerateTransform)?;
        Ok(inv.apply(world))
    }

    /// World-space axis vector: direction column scaled by spacing.
    #[inline]
    pub fn axis_vector(&self, axis: usize) -> Vector3<f64> {
        self.direction.column(axis) * self.spacing[axis]
    }

    /// Index-space extent along `axis`.
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.bounds.extent(axis)
    }

    /// World-space extent along `axis`.
    #[inline]
    pub fn extent_in_world(&self, axis: usize) -> f64 {
        self.axis_vector(axis).norm() * self.extent(axis)
    }

    /// Envelope of the eight index-bound corners mapped through `transform`
    /// (identity if `None`).
    pub fn bounding_box_relative_to(&self, transform: Option<&AffineMap>) -> BoundingBox {
        let identity = AffineMap::identity();
        let map = transform.unwrap_or(&identity);
        let mut envelope = BoundingBox::empty();
        for corner in 0..8 {
            envelope.expand_to(map.apply(self.bounds.corner(corner)));
        }
        envelope
    }

    /// Axis-aligned envelope of the frame in world space.
    #[inline]
    pub fn world_bounding_box(&self) -> BoundingBox {
        self.bounding_box_relative_to(Some(&self.affine_map()))
    }

    /// Move the origin by `offset` (world units).
    #[inline]
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.origin += offset;
    }

    /// Rotate the frame by `angle_degrees` about `axis` through `center`.
    /// Orientation and origin move together; spacing is unchanged.
    pub fn rotate(&mut self, center: Vector3<f64>, axis: Vector3<f64>, angle_degrees: f64) {
        let rotation = Rotation3::from_axis_angle(
            &Unit::new_normalize(axis),
            angle_degrees.to_radians(),
        );
        self.direction = rotation.matrix() * self.direction;
        self.origin = center + rotation * (self.origin - center);
    }

    /// Left-multiply a linear transform onto the index→world map, then
    /// re-decompose into direction and spacing. The origin is transformed as
    /// a point of the linear map.
    pub fn compose(&mut self, m: &Matrix3<f64>) -> Result<(), GeomError> {
        let combined = m * (self.direction * Matrix3::from_diagonal(&self.spacing));
        let (direction, spacing) = decompose_columns(&combined)?;
        self.direction = direction;
        self.spacing = spacing;
        self.origin = m * self.origin;
        Ok(())
    }

    /// Apply an interactive operation in place.
    pub fn apply(&mut self, op: &FrameOp) {
        match *op {
            FrameOp::Translate { offset } => self.translate(offset),
            FrameOp::Rotate {
                center,
                axis,
                angle_degrees,
            } => self.rotate(center, axis, angle_degrees),
        }
    }

    /// True if the frame satisfies its invariants (positive spacing,
    /// invertible map). Frames built through the public constructors always
    /// do; this is the check predicates run on their references.
    pub fn is_valid(&self) -> bool {
        check_spacing(self.spacing).is_ok() && self.affine_map().inverse().is_some()
    }
}

#[inline]
fn check_spacing(spacing: Vector3<f64>) -> Result<(), GeomError> {
    if (0..3).all(|i| spacing[i].is_finite() && spacing[i] > 0.0) {
        Ok(())
    } else {
        Err(GeomError::NonPositiveSpacing)
    }
}

/// Split a matrix into unit columns plus column norms. Fails if any column
/// is (numerically) zero or non-finite.
fn decompose_columns(m: &Matrix3<f64>) -> Result<(Matrix3<f64>, Vector3<f64>), GeomError> {
    let mut direction = *m;
    let mut norms = Vector3::zeros();
    for i in 0..3 {
        let len = m.column(i).norm();
        if !len.is_finite() || len <= f64::EPSILON {
            return Err(GeomError::DegenerateTransform);
        }
        norms[i] = len;
        direction.set_column(i, &(m.column(i) / len));
    }
    Ok((direction, norms))
}
