//! Square sampling domain shared by the evaluator and the tracer.

use crate::constants::{DEFAULT_GRID_MAX, DEFAULT_GRID_MIN, DEFAULT_GRID_POINTS};
use crate::errors::ValidationError;
use crate::math::{linspace, Scalar, R2};

/// Square domain `[min, max]²` sampled at `count` evenly spaced points per axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Lower bound on both axes.
    pub min: Scalar,
    /// Upper bound on both axes.
    pub max: Scalar,
    /// Samples per axis (`count²` in total).
    pub count: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_MIN, DEFAULT_GRID_MAX, DEFAULT_GRID_POINTS)
    }
}

impl GridSpec {
    /// Creates a grid specification without validating it.
    #[must_use]
    pub const fn new(min: Scalar, max: Scalar, count: usize) -> Self {
        Self { min, max, count }
    }

    /// Checks `min < max` (both finite, with a finite span) and `count >= 1`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.min.is_finite() || !self.max.is_finite() || !self.span().is_finite() {
            return Err(ValidationError::NonFiniteBound {
                min: self.min,
                max: self.max,
            });
        }
        if self.min >= self.max {
            return Err(ValidationError::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.count == 0 {
            return Err(ValidationError::EmptyGrid);
        }
        Ok(())
    }

    /// Sample coordinates along either axis.
    #[must_use]
    pub fn axis(&self) -> Vec<Scalar> {
        linspace(self.min, self.max, self.count)
    }

    /// Domain side length.
    #[inline]
    #[must_use]
    pub fn span(&self) -> Scalar {
        self.max - self.min
    }

    /// Distance between neighbouring samples; the full span for a single-point grid.
    #[must_use]
    pub fn spacing(&self) -> Scalar {
        if self.count > 1 {
            self.span() / (self.count as Scalar - 1.0)
        } else {
            self.span()
        }
    }

    /// True when `p` lies inside the closed domain.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: &R2) -> bool {
        (self.min..=self.max).contains(&p.x) && (self.min..=self.max).contains(&p.y)
    }

    /// Point where the segment `inside -> outside` crosses the domain boundary.
    ///
    /// `inside` must lie in the domain. The result is snapped onto the boundary
    /// so it never leaves `[min, max]²` through rounding.
    #[must_use]
    pub fn clip_segment(&self, inside: &R2, outside: &R2) -> R2 {
        let d = outside - inside;
        let mut t: Scalar = 1.0;
        for axis in 0..2 {
            let (from, delta) = (inside[axis], d[axis]);
            if delta > 0.0 && from + delta > self.max {
                t = t.min((self.max - from) / delta);
            } else if delta < 0.0 && from + delta < self.min {
                t = t.min((self.min - from) / delta);
            }
        }
        let p = inside + d * t.max(0.0);
        R2::new(p.x.clamp(self.min, self.max), p.y.clamp(self.min, self.max))
    }
}
