use crate::charges::Charge;
use crate::constants::MIN_FIELD_MAGNITUDE;
use crate::grid::GridSpec;
use crate::math::{Grid2, Scalar, R2};

/// Sampled electric field over a square grid.
///
/// Entry `(j, i)` of [`ex`](Self::ex) and [`ey`](Self::ey) is the field at
/// `(xs[i], ys[j])`: rows follow the vertical axis, columns the horizontal one.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    grid: GridSpec,
    xs: Vec<Scalar>,
    ys: Vec<Scalar>,
    ex: Grid2,
    ey: Grid2,
    sources: Vec<Charge>,
    clamp_r2: Scalar,
}

impl VectorField {
    pub(crate) fn from_parts(
        grid: GridSpec,
        axis: Vec<Scalar>,
        ex: Grid2,
        ey: Grid2,
        sources: Vec<Charge>,
        clamp_r2: Scalar,
    ) -> Self {
        debug_assert_eq!(ex.shape(), (grid.count, grid.count));
        debug_assert_eq!(ey.shape(), (grid.count, grid.count));
        Self {
            grid,
            xs: axis.clone(),
            ys: axis,
            ex,
            ey,
            sources,
            clamp_r2,
        }
    }

    /// Grid the field was sampled on.
    #[must_use]
    pub const fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Horizontal sample coordinates.
    #[must_use]
    pub fn xs(&self) -> &[Scalar] {
        &self.xs
    }

    /// Vertical sample coordinates.
    #[must_use]
    pub fn ys(&self) -> &[Scalar] {
        &self.ys
    }

    /// Horizontal field component.
    #[must_use]
    pub const fn ex(&self) -> &Grid2 {
        &self.ex
    }

    /// Vertical field component.
    #[must_use]
    pub const fn ey(&self) -> &Grid2 {
        &self.ey
    }

    /// Charges that contributed to the field (zero charges excluded), in input order.
    #[must_use]
    pub fn sources(&self) -> &[Charge] {
        &self.sources
    }

    /// Squared exclusion radius used during evaluation.
    #[must_use]
    pub const fn clamp_radius_squared(&self) -> Scalar {
        self.clamp_r2
    }

    /// Field vector at grid node `(i, j)` (column `i`, row `j`).
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> R2 {
        R2::new(self.ex[(j, i)], self.ey[(j, i)])
    }

    /// Field magnitude `|E|` at every grid node.
    #[must_use]
    pub fn magnitude(&self) -> Grid2 {
        self.ex.zip_map(&self.ey, Scalar::hypot)
    }

    /// Largest field magnitude on the grid.
    #[must_use]
    pub fn max_magnitude(&self) -> Scalar {
        self.ex
            .iter()
            .zip(self.ey.iter())
            .map(|(&x, &y)| x.hypot(y))
            .fold(0.0, Scalar::max)
    }

    /// True when the field is zero everywhere within numerical tolerance.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max_magnitude() < MIN_FIELD_MAGNITUDE
    }

    /// True when `p` lies strictly inside the exclusion radius of a source.
    #[must_use]
    pub fn near_source(&self, p: &R2) -> bool {
        self.sources
            .iter()
            .any(|c| (p - c.position()).norm_squared() < self.clamp_r2)
    }

    /// Bilinear interpolation of the field at `p`.
    ///
    /// Returns `None` outside the domain or when the grid has a single sample
    /// per axis.
    #[must_use]
    pub fn sample(&self, p: &R2) -> Option<R2> {
        let n = self.grid.count;
        if n < 2 || !self.grid.contains(p) {
            return None;
        }
        let h = self.grid.spacing();
        let last = (n - 1) as Scalar;
        let fx = ((p.x - self.grid.min) / h).clamp(0.0, last);
        let fy = ((p.y - self.grid.min) / h).clamp(0.0, last);
        let i0 = (fx.floor() as usize).min(n - 2);
        let j0 = (fy.floor() as usize).min(n - 2);
        let tx = fx - i0 as Scalar;
        let ty = fy - j0 as Scalar;

        let lerp = |m: &Grid2| {
            let lower = m[(j0, i0)] * (1.0 - tx) + m[(j0, i0 + 1)] * tx;
            let upper = m[(j0 + 1, i0)] * (1.0 - tx) + m[(j0 + 1, i0 + 1)] * tx;
            lower * (1.0 - ty) + upper * ty
        };
        Some(R2::new(lerp(&self.ex), lerp(&self.ey)))
    }
}
