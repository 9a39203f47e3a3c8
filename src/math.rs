//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DMatrix, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (points and field values).
pub type R2 = Vector2<Scalar>;
/// Dense real matrix used for sampled field components.
pub type Grid2 = DMatrix<Scalar>;

/// Generates `n` linearly spaced samples in `[start, stop]`.
///
/// The last sample is exactly `stop` so both endpoints are reproduced without
/// rounding drift.
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            let mut out: Vec<Scalar> = (0..n).map(|i| start + step * i as Scalar).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Returns the unit vector along `v` and its length, or `None` when the length
/// is below `min_norm`.
#[inline]
#[must_use]
pub fn unit_and_norm(v: &R2, min_norm: Scalar) -> Option<(R2, Scalar)> {
    let m = v.norm();
    if m.is_finite() && m >= min_norm {
        Some((v / m, m))
    } else {
        None
    }
}

/// Median of a slice of finite values; `0.0` for an empty slice.
#[must_use]
pub fn median(values: &[Scalar]) -> Scalar {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(Scalar::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn linspace_single_point_is_start() {
        assert_eq!(linspace(-3.0, 7.0, 1), vec![-3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn linspace_hits_endpoints_exactly() {
        let v = linspace(-10.0, 10.0, 200);
        assert_eq!(v[0], -10.0);
        assert_eq!(v[199], 10.0);
    }

    #[test]
    fn unit_and_norm_rejects_small_vectors() {
        assert!(unit_and_norm(&R2::new(1.0e-20, 0.0), 1.0e-12).is_none());
        let (u, m) = unit_and_norm(&R2::new(3.0, 4.0), 1.0e-12).unwrap();
        assert_relative_eq!(m, 5.0, epsilon = 1.0e-12);
        assert_relative_eq!(u.norm(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn median_of_even_and_odd_sets() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }
}
