use log::debug;

use crate::charges::{validate_charges, Charge};
use crate::constants::CLAMP_RADIUS_SQUARED;
use crate::errors::{FieldError, ValidationError};
use crate::grid::GridSpec;
use crate::math::{Grid2, Scalar, R2};

use super::VectorField;

/// Contribution `q · d / |d|³` of one charge at offset `(dx, dy)`, with `|d|²`
/// floored at `clamp_r2`.
#[inline]
fn coulomb_term(dx: Scalar, dy: Scalar, q: Scalar, clamp_r2: Scalar) -> (Scalar, Scalar) {
    let mut r2 = dx * dx + dy * dy;
    if r2 < clamp_r2 {
        r2 = clamp_r2;
    }
    let r = r2.sqrt();
    (q * dx / (r2 * r), q * dy / (r2 * r))
}

/// Electric field at an arbitrary `point` due to `charges`, using the same
/// exclusion-radius clamp as [`evaluate`].
#[must_use]
pub fn field_at(charges: &[Charge], point: R2, clamp_r2: Scalar) -> R2 {
    let mut e = R2::zeros();
    for c in charges.iter().filter(|c| c.q != 0.0) {
        let (ex, ey) = coulomb_term(point.x - c.x, point.y - c.y, c.q, clamp_r2);
        e.x += ex;
        e.y += ey;
    }
    e
}

/// Fills one grid column (fixed `x`, all `ys`). Charges are summed in input
/// order so every evaluation path produces identical bits.
fn fill_column(
    x: Scalar,
    ys: &[Scalar],
    sources: &[Charge],
    clamp_r2: Scalar,
    ex_col: &mut [Scalar],
    ey_col: &mut [Scalar],
) {
    for c in sources {
        let dx = x - c.x;
        for ((&y, ex), ey) in ys.iter().zip(ex_col.iter_mut()).zip(ey_col.iter_mut()) {
            let (tx, ty) = coulomb_term(dx, y - c.y, c.q, clamp_r2);
            *ex += tx;
            *ey += ty;
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_grid(axis: &[Scalar], sources: &[Charge], clamp_r2: Scalar, ex: &mut Grid2, ey: &mut Grid2) {
    let n = axis.len();
    ex.as_mut_slice()
        .chunks_mut(n)
        .zip(ey.as_mut_slice().chunks_mut(n))
        .zip(axis)
        .for_each(|((ex_col, ey_col), &x)| fill_column(x, axis, sources, clamp_r2, ex_col, ey_col));
}

#[cfg(feature = "parallel")]
fn fill_grid(axis: &[Scalar], sources: &[Charge], clamp_r2: Scalar, ex: &mut Grid2, ey: &mut Grid2) {
    use rayon::prelude::*;

    let n = axis.len();
    ex.as_mut_slice()
        .par_chunks_mut(n)
        .zip(ey.as_mut_slice().par_chunks_mut(n))
        .zip(axis.par_iter())
        .for_each(|((ex_col, ey_col), &x)| fill_column(x, axis, sources, clamp_r2, ex_col, ey_col));
}

/// Evaluates the superposed field of `charges` on every node of `grid`.
///
/// Inside the exclusion radius of a charge (`r² < 0.1`) the squared distance is
/// clamped to [`CLAMP_RADIUS_SQUARED`], so the result never contains `NaN` or
/// infinities. All preconditions are checked before any work is done.
pub fn evaluate(charges: &[Charge], grid: &GridSpec) -> Result<VectorField, FieldError> {
    evaluate_with_clamp(charges, grid, CLAMP_RADIUS_SQUARED)
}

/// Same as [`evaluate`] with a caller-chosen squared exclusion radius.
pub fn evaluate_with_clamp(
    charges: &[Charge],
    grid: &GridSpec,
    clamp_r2: Scalar,
) -> Result<VectorField, FieldError> {
    validate_charges(charges)?;
    grid.validate()?;
    if !(clamp_r2.is_finite() && clamp_r2 > 0.0) {
        return Err(ValidationError::InvalidClamp(clamp_r2).into());
    }

    let axis = grid.axis();
    let n = grid.count;
    let sources: Vec<Charge> = charges.iter().copied().filter(|c| c.q != 0.0).collect();
    let mut ex = Grid2::zeros(n, n);
    let mut ey = Grid2::zeros(n, n);

    fill_grid(&axis, &sources, clamp_r2, &mut ex, &mut ey);
    debug!(
        "evaluated {} source(s) on a {n}x{n} grid over [{}, {}]",
        sources.len(),
        grid.min,
        grid.max
    );

    Ok(VectorField::from_parts(*grid, axis, ex, ey, sources, clamp_r2))
}
