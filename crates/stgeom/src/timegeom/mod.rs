//! Time-indexed geometry: an ordered sequence of spatial frames, one per
//! time step, with a proportional continuous-time ↔ step mapping.
//!
//! Purpose
//! - Hold one `SpatialFrame` per time step (insertion order = chronological
//!   order) plus the aggregate world bounding box over all steps.
//! - Map between time points (milliseconds) and discrete steps:
//!   `time_point(step) = first + step · duration`.
//!
//! Conversion rules (pinned, asymmetric on purpose)
//! - `time_step_to_time_point` never clamps: out-of-range steps yield
//!   extrapolated time points.
//! - `time_point_to_time_step` floors `(t − first) / duration` and clamps
//!   the result below to step 0; it does not clamp above. Callers that need
//!   range safety go through `geometry_for_time_point`, which validates the
//!   time point before converting.
//! - A single-frame geometry is *static*: valid at every finite time point,
//!   with `±∞` time bounds.
//!
//! Concurrency: no internal locking. Readers may overlap; writers must be
//! externally serialized against all other access to the same instance.


use nalgebra::{Matrix3, Vector3};

use crate::error::GeomError;
use crate::frame::{BoundingBox, FrameOp, SpatialFrame};

/// Continuous instant in milliseconds.
pub type TimePoint = f64;
/// Discrete index into the frame sequence.
pub type TimeStep = usize;

/// Ordered sequence of spatial frames with proportional time assignment.
#[derive(Clone, Debug)]
pub struct TimeIndexedGeometry {
    frames: Vec<SpatialFrame>,
    first_time_point: TimePoint,
    step_duration: f64,
    bounding_box: BoundingBox,
}

impl TimeIndexedGeometry {
    /// Build from frames with an explicit time origin and step duration.
    pub fn new(frames: Vec<SpatialFrame>, first_time_point: TimePoint, step_duration: f64) -> Self {
        debug_assert!(
            step_duration.is_finite() && step_duration > 0.0,
            "step duration must be positive"
        );
        let mut out = Self {
            frames,
            first_time_point,
            step_duration,
            bounding_box: BoundingBox::empty(),
        };
        out.update_bounding_box();
        out
    }

    /// Frames with the default proportional model (first = 0, duration = 1).
    pub fn from_frames(frames: Vec<SpatialFrame>) -> Self {
        Self::new(frames, 0.0, 1.0)
    }

    /// `steps` clones of one frame (the usual shape of a loaded 4D volume).
    pub fn uniform(frame: SpatialFrame, steps: usize) -> Self {
        Self::from_frames(vec![frame; steps])
    }

    #[inline]
    pub fn number_of_time_steps(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn first_time_point(&self) -> TimePoint {
        self.first_time_point
    }

    #[inline]
    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    /// Lower time bound; `−∞` for a static (single-frame) geometry.
    pub fn minimum_time_point(&self) -> TimePoint {
        if self.frames.len() == 1 {
            f64::NEG_INFINITY
        } else {
            self.first_time_point
        }
    }

    /// Upper time bound; `+∞` for a static (single-frame) geometry.
    pub fn maximum_time_point(&self) -> TimePoint {
        if self.frames.len() == 1 {
            f64::INFINITY
        } else {
            self.first_time_point + self.frames.len() as f64 * self.step_duration
        }
    }

    #[inline]
    pub fn time_bounds(&self) -> (TimePoint, TimePoint) {
        (self.minimum_time_point(), self.maximum_time_point())
    }

    /// True iff `min ≤ t ≤ max` (always true for finite `t` on a static
    /// geometry).
    #[inline]
    pub fn is_valid_time_point(&self, time_point: TimePoint) -> bool {
        self.minimum_time_point() <= time_point && time_point <= self.maximum_time_point()
    }

    #[inline]
    pub fn is_valid_time_step(&self, step: TimeStep) -> bool {
        step < self.frames.len()
    }

    /// Proportional formula, never clamped: out-of-range steps extrapolate.
    #[inline]
    pub fn time_step_to_time_point(&self, step: TimeStep) -> TimePoint {
        self.first_time_point + step as f64 * self.step_duration
    }

    /// Floor of the proportional inverse, clamped below to step 0. Not
    /// clamped above: a time point past the upper bound yields an
    /// out-of-range step (which the frame accessors then reject).
    #[inline]
    pub fn time_point_to_time_step(&self, time_point: TimePoint) -> TimeStep {
        if time_point < self.first_time_point {
            return 0;
        }
        ((time_point - self.first_time_point) / self.step_duration).floor() as TimeStep
    }

    /// Shared reference to the frame at `step`; `None` out of range.
    #[inline]
    pub fn geometry_for_time_step(&self, step: TimeStep) -> Option<&SpatialFrame> {
        self.frames.get(step)
    }

    /// Mutable access to one frame. The aggregate bounding box is stale
    /// afterwards; call `update_bounding_box`.
    #[inline]
    pub fn geometry_for_time_step_mut(&mut self, step: TimeStep) -> Option<&mut SpatialFrame> {
        self.frames.get_mut(step)
    }

    /// Frame covering `time_point`, or `None` if the time point is outside
    /// the valid bounds or maps to a missing step.
    pub fn geometry_for_time_point(&self, time_point: TimePoint) -> Option<&SpatialFrame> {
        if !time_point.is_finite() || !self.is_valid_time_point(time_point) {
            return None;
        }
        self.geometry_for_time_step(self.time_point_to_time_step(time_point))
    }

    /// Independent copy of the frame at `step`; mutations do not affect the
    /// stored frame.
    #[inline]
    pub fn geometry_clone_for_time_step(&self, step: TimeStep) -> Option<SpatialFrame> {
        self.frames.get(step).cloned()
    }

    /// Replace the slot at `step` and recompute the aggregate box.
    pub fn set_time_step_geometry(
        &mut self,
        frame: SpatialFrame,
        step: TimeStep,
    ) -> Result<(), GeomError> {
        let count = self.frames.len();
        let slot = self
            .frames
            .get_mut(step)
            .ok_or(GeomError::TimeStepOutOfRange { step, count })?;
        *slot = frame;
        self.update_bounding_box();
        Ok(())
    }

    /// Grow the sequence to `new_count` slots, cloning the last frame into
    /// the new ones. Shrinking is not supported; smaller counts are ignored.
    pub fn expand(&mut self, new_count: usize) {
        if new_count <= self.frames.len() {
            return;
        }
        let template = self.frames.last().cloned().unwrap_or_default();
        self.frames.resize(new_count, template);
        self.update_bounding_box();
    }

    /// Recompute the aggregate world box as the union of all per-step world
    /// boxes. Must be called after mutating a frame through
    /// `geometry_for_time_step_mut`.
    pub fn update_bounding_box(&mut self) {
        self.bounding_box = self
            .frames
            .iter()
            .fold(BoundingBox::empty(), |acc, frame| {
                acc.union(&frame.world_bounding_box())
            });
    }

    /// Left-multiply a linear transform onto every frame, then recompute the
    /// aggregate box.
    pub fn apply_transform_to_all_time_steps(
        &mut self,
        m: &Matrix3<f64>,
    ) -> Result<(), GeomError> {
        for frame in &mut self.frames {
            frame.compose(m)?;
        }
        self.update_bounding_box();
        Ok(())
    }

    /// Apply a rotate/translate operation to every time step. This is how an
    /// interactive transform propagates consistently across a 4D object.
    pub fn execute_operation(&mut self, op: &FrameOp) {
        for frame in &mut self.frames {
            frame.apply(op);
        }
        self.update_bounding_box();
    }

    /// Aggregate world bounding box over all time steps.
    #[inline]
    pub fn bounds_in_world(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Corner of the aggregate box, numbered as in `BoundingBox::corner`.
    #[inline]
    pub fn corner_point_in_world(&self, corner: u8) -> Vector3<f64> {
        self.bounding_box.corner(corner)
    }

    /// Corner by side selection; `true` picks the min ("front") side.
    #[inline]
    pub fn corner_point_from_sides(
        &self,
        x_front: bool,
        y_front: bool,
        z_front: bool,
    ) -> Vector3<f64> {
        self.bounding_box.corner_from_sides(x_front, y_front, z_front)
    }

    #[inline]
    pub fn center_in_world(&self) -> Vector3<f64> {
        self.bounding_box.center()
    }

    #[inline]
    pub fn diagonal_length2_in_world(&self) -> f64 {
        self.bounding_box.diagonal2()
    }

    #[inline]
    pub fn diagonal_length_in_world(&self) -> f64 {
        self.bounding_box.diagonal()
    }

    #[inline]
    pub fn extent_in_world(&self, axis: usize) -> f64 {
        self.bounding_box.extent(axis)
    }

    /// Axis-aligned containment in the aggregate world box.
    #[inline]
    pub fn is_world_point_inside(&self, point: Vector3<f64>) -> bool {
        self.bounding_box.contains(point)
    }
}
