//! Shared error types used across submodules.

use thiserror::Error;

use crate::input::InputError;
use crate::math::Scalar;

/// Rejected computational preconditions, detected before any evaluation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// No charges were supplied.
    #[error("at least one charge is required")]
    EmptyCharges,
    /// A charge has a non-finite coordinate or magnitude (1-based index).
    #[error("charge {index}: x, y and q must be finite numbers")]
    NonFiniteCharge {
        /// Position of the offending charge in the input, starting at 1.
        index: usize,
    },
    /// A grid bound is NaN or infinite, or `max - min` overflows.
    #[error("grid bounds and their span must be finite (min={min}, max={max})")]
    NonFiniteBound {
        /// Requested lower bound.
        min: Scalar,
        /// Requested upper bound.
        max: Scalar,
    },
    /// The lower grid bound is not strictly below the upper one.
    #[error("grid min must be less than max (min={min}, max={max})")]
    InvertedBounds {
        /// Requested lower bound.
        min: Scalar,
        /// Requested upper bound.
        max: Scalar,
    },
    /// The grid has no sample points.
    #[error("grid point count must be positive")]
    EmptyGrid,
    /// Streamline density is not a positive finite number.
    #[error("streamline density must be positive and finite, got {0}")]
    InvalidDensity(Scalar),
    /// Clamp radius squared is not a positive finite number.
    #[error("clamp radius squared must be positive and finite, got {0}")]
    InvalidClamp(Scalar),
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Wraps precondition failures.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Wraps text-input parsing failures.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Raised for numerically degenerate configurations when a caller opts to
    /// treat them as failures; the core itself returns an empty trace instead.
    #[error("numerically degenerate field: {0}")]
    NumericDegenerate(String),
    /// Raised when drawing the figure fails.
    #[error("render error: {0}")]
    Render(String),
}

impl FieldError {
    /// True when the error stems from rejected input rather than a numeric or
    /// output failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Input(_))
    }
}
