//! Geometry compatibility: tolerance-based equality and sub-grid checks.
//!
//! Purpose
//! - Decide whether two frames occupy "the same" region of space
//!   (`are_equal`) or a grid-aligned sub-region (`is_sub_geometry`).
//! - Both checks take independent coordinate and direction tolerances:
//!   coordinate drift between real-world datasets is expected and benign,
//!   orientation drift is not, so the direction default is much tighter.
//!
//! The `verbose` flag only controls diagnostic output (a `tracing::debug!`
//! event naming the first mismatching component); it never changes the
//! result.

#[cfg(test)]
mod tests;

use nalgebra::Vector3;
use tracing::debug;

use crate::frame::SpatialFrame;
use crate::timegeom::TimeIndexedGeometry;

/// Default coordinate tolerance (origin, spacing, bounds), in world units.
pub const DEFAULT_COORDINATE_EPS: f64 = 1e-4;
/// Default tolerance for direction-matrix elements.
pub const DEFAULT_DIRECTION_EPS: f64 = 1e-6;

#[inline]
fn max_abs_diff(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    (a - b).amax()
}

/// Component-wise equality of two frames: origin, spacing and index bounds
/// within `coordinate_eps`, direction matrix elements within
/// `direction_eps`. All four checks must pass.
pub fn are_equal(
    a: &SpatialFrame,
    b: &SpatialFrame,
    coordinate_eps: f64,
    direction_eps: f64,
    verbose: bool,
) -> bool {
    if max_abs_diff(a.origin(), b.origin()) > coordinate_eps {
        if verbose {
            debug!(
                left = ?a.origin(),
                right = ?b.origin(),
                eps = coordinate_eps,
                "frames differ in origin"
            );
        }
        return false;
    }
    if max_abs_diff(a.spacing(), b.spacing()) > coordinate_eps {
        if verbose {
            debug!(
                left = ?a.spacing(),
                right = ?b.spacing(),
                eps = coordinate_eps,
                "frames differ in spacing"
            );
        }
        return false;
    }
    if (a.direction() - b.direction()).amax() > direction_eps {
        if verbose {
            debug!(
                left = ?a.direction(),
                right = ?b.direction(),
                eps = direction_eps,
                "frames differ in orientation"
            );
        }
        return false;
    }
    let (ab, bb) = (a.bounds(), b.bounds());
    if max_abs_diff(ab.min, bb.min) > coordinate_eps || max_abs_diff(ab.max, bb.max) > coordinate_eps
    {
        if verbose {
            debug!(
                left = ?ab,
                right = ?bb,
                eps = coordinate_eps,
                "frames differ in index bounds"
            );
        }
        return false;
    }
    true
}

/// Equality of two time geometries: equal step counts and pairwise-equal
/// per-step frames. Short-circuits on the first mismatch.
pub fn are_equal_time(
    a: &TimeIndexedGeometry,
    b: &TimeIndexedGeometry,
    coordinate_eps: f64,
    direction_eps: f64,
    verbose: bool,
) -> bool {
    if a.number_of_time_steps() != b.number_of_time_steps() {
        if verbose {
            debug!(
                left = a.number_of_time_steps(),
                right = b.number_of_time_steps(),
                "time geometries differ in step count"
            );
        }
        return false;
    }
    for step in 0..a.number_of_time_steps() {
        // Both lookups are in range by construction.
        let (fa, fb) = match (a.geometry_for_time_step(step), b.geometry_for_time_step(step)) {
            (Some(fa), Some(fb)) => (fa, fb),
            _ => return false,
        };
        if !are_equal(fa, fb, coordinate_eps, direction_eps, verbose) {
            if verbose {
                debug!(step, "time geometries differ at step");
            }
            return false;
        }
    }
    true
}

/// True iff `candidate` lies on the voxel grid of `reference` and its world
/// extent is contained in the reference's.
///
/// Three conditions, checked in order:
/// 1. spacing within `coordinate_eps` and orientation within
///    `direction_eps` (same grid, different extents allowed);
/// 2. the origin offset, decomposed along each reference axis, is an
///    integer multiple of that axis's spacing within `coordinate_eps`;
/// 3. the candidate's world bounding box is contained in the reference's,
///    per axis, each bound looser by at most `coordinate_eps`.
pub fn is_sub_geometry(
    candidate: &SpatialFrame,
    reference: &SpatialFrame,
    coordinate_eps: f64,
    direction_eps: f64,
    verbose: bool,
) -> bool {
    if max_abs_diff(candidate.spacing(), reference.spacing()) > coordinate_eps {
        if verbose {
            debug!(
                candidate = ?candidate.spacing(),
                reference = ?reference.spacing(),
                eps = coordinate_eps,
                "sub-geometry check: spacing differs"
            );
        }
        return false;
    }
    if (candidate.direction() - reference.direction()).amax() > direction_eps {
        if verbose {
            debug!(
                candidate = ?candidate.direction(),
                reference = ?reference.direction(),
                eps = direction_eps,
                "sub-geometry check: orientation differs"
            );
        }
        return false;
    }
    let offset = candidate.origin() - reference.origin();
    for axis in 0..3 {
        let along = reference.direction().column(axis).dot(&offset);
        let steps = along / reference.spacing()[axis];
        let off_grid = (steps - steps.round()).abs() * reference.spacing()[axis];
        if off_grid > coordinate_eps {
            if verbose {
                debug!(
                    axis,
                    off_grid,
                    eps = coordinate_eps,
                    "sub-geometry check: origin off the reference grid"
                );
            }
            return false;
        }
    }
    let candidate_box = candidate.world_bounding_box();
    let reference_box = reference.world_bounding_box();
    if !reference_box.contains_box(&candidate_box, coordinate_eps) {
        if verbose {
            debug!(
                candidate = ?candidate_box,
                reference = ?reference_box,
                eps = coordinate_eps,
                "sub-geometry check: candidate exceeds reference bounds"
            );
        }
        return false;
    }
    true
}
