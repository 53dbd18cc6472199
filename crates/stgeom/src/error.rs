//! Error type shared across the crate.

use thiserror::Error;

/// Failures surfaced by frame/time-geometry mutation and predicate
/// construction. Range *queries* never produce these; they return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeomError {
    /// The index-to-world map is not invertible (zero/non-finite column).
    #[error("index-to-world transform is degenerate (not invertible)")]
    DegenerateTransform,
    /// Spacing components must be strictly positive and finite.
    #[error("spacing components must be strictly positive")]
    NonPositiveSpacing,
    /// A setter was handed a slot outside `[0, count)`.
    #[error("time step {step} is out of range for {count} time steps")]
    TimeStepOutOfRange { step: usize, count: usize },
    /// A predicate reference that can never be evaluated against
    /// (degenerate frame or empty time geometry).
    #[error("reference geometry is degenerate or empty")]
    InvalidReference,
}
