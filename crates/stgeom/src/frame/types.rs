//! Affine maps and axis-aligned boxes shared by the frame and time modules.
//!
//! - `AffineMap`: 3D affine map `x ↦ M x + t` with explicit inversion.
//! - `BoundingBox`: axis-aligned box used both for index-space bounds and
//!   world-space envelopes. The empty box is `min = +∞, max = −∞` so that
//!   unions and point-expansion need no special case.

use nalgebra::{Matrix3, Vector3};

/// 3D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMap {
    pub m: Matrix3<f64>,
    pub t: Vector3<f64>,
}

impl AffineMap {
    #[inline]
    pub fn new(m: Matrix3<f64>, t: Vector3<f64>) -> Self {
        Self { m, t }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
            t: Vector3::zeros(),
        }
    }

    /// Pure linear map (no translation).
    #[inline]
    pub fn linear(m: Matrix3<f64>) -> Self {
        Self {
            m,
            t: Vector3::zeros(),
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector3<f64>) -> Vector3<f64> {
        self.m * p + self.t
    }

    /// Inverse map if `M` is invertible.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
}

/// Axis-aligned box `[min, max]` per axis (inclusive on both sides).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundingBox {
    #[inline]
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Box from `[min_x, max_x, min_y, max_y, min_z, max_z]`.
    #[inline]
    pub fn from_extents(b: [f64; 6]) -> Self {
        Self {
            min: Vector3::new(b[0], b[2], b[4]),
            max: Vector3::new(b[1], b[3], b[5]),
        }
    }

    /// The neutral element of `union`: contains nothing.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Vector3::repeat(f64::INFINITY),
            max: Vector3::repeat(f64::NEG_INFINITY),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Grow to contain `p`.
    #[inline]
    pub fn expand_to(&mut self, p: Vector3<f64>) {
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
    }

    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Corner by index 0..8. Bit 2 selects the x side, bit 1 y, bit 0 z
    /// (z toggles fastest); a set bit selects the max side. Corner 0 is
    /// `(min, min, min)`, corner 7 is `(max, max, max)`.
    #[inline]
    pub fn corner(&self, index: u8) -> Vector3<f64> {
        debug_assert!(index < 8, "corner index must be in 0..8");
        let pick = |bit: u8, axis: usize| {
            if index >> bit & 1 == 1 {
                self.max[axis]
            } else {
                self.min[axis]
            }
        };
        Vector3::new(pick(2, 0), pick(1, 1), pick(0, 2))
    }

    /// Corner by side selection; `true` picks the min ("front") side.
    #[inline]
    pub fn corner_from_sides(&self, x_front: bool, y_front: bool, z_front: bool) -> Vector3<f64> {
        let index =
            (u8::from(!x_front) << 2) | (u8::from(!y_front) << 1) | u8::from(!z_front);
        self.corner(index)
    }

    #[inline]
    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Squared length of the main diagonal.
    #[inline]
    pub fn diagonal2(&self) -> f64 {
        (self.max - self.min).norm_squared()
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).norm()
    }

    /// Inclusive containment test for a point.
    #[inline]
    pub fn contains(&self, p: Vector3<f64>) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Per-axis containment of `inner`, each bound allowed to be looser by
    /// at most `eps` (tighter by any amount).
    #[inline]
    pub fn contains_box(&self, inner: &Self, eps: f64) -> bool {
        (0..3).all(|i| inner.min[i] >= self.min[i] - eps && inner.max[i] <= self.max[i] + eps)
    }
}
