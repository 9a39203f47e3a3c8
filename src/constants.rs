//! Numerical constants and default plot parameters.
//!
//! ## Units
//!
//! The field is evaluated in normalised units: the Coulomb prefactor
//! `1 / (4π ε₀)` is taken as one, so a unit charge at distance `r` produces a
//! field of magnitude `1 / r²`. Positions share the units of the grid bounds.

use crate::math::Scalar;

/// Squared exclusion radius around each point charge, in grid units squared.
///
/// Wherever `r² < CLAMP_RADIUS_SQUARED` the distance is replaced by this floor
/// before the inverse-cube weight is applied. The value is fixed and does not
/// scale with the grid extent.
pub const CLAMP_RADIUS_SQUARED: Scalar = 0.1;

/// Field magnitudes below this value are treated as zero by the tracer.
pub const MIN_FIELD_MAGNITUDE: Scalar = 1.0e-12;

/// Lower domain bound used when none is given.
pub const DEFAULT_GRID_MIN: Scalar = -10.0;
/// Upper domain bound used when none is given.
pub const DEFAULT_GRID_MAX: Scalar = 10.0;
/// Samples per axis used when none is given.
pub const DEFAULT_GRID_POINTS: usize = 200;
/// Streamline seeding density used when none is given.
pub const DEFAULT_DENSITY: Scalar = 1.5;

/// Occupancy mask cells per axis at `density = 1`.
pub const MASK_CELLS_PER_UNIT_DENSITY: Scalar = 30.0;

/// Upper bound on occupancy mask cells per axis, reached at `density = 10`.
pub const MAX_MASK_CELLS: usize = 300;

/// Hard cap on integration steps for each half (backward/forward) of a streamline.
pub const MAX_STEPS_PER_HALF: usize = 4_000;

/// Streamlines shorter than this fraction of the domain span are discarded.
pub const MIN_LENGTH_FRACTION: Scalar = 0.1;
