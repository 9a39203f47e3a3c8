use log::{debug, warn};

use crate::constants::{
    DEFAULT_DENSITY, MASK_CELLS_PER_UNIT_DENSITY, MAX_MASK_CELLS, MAX_STEPS_PER_HALF,
    MIN_FIELD_MAGNITUDE, MIN_LENGTH_FRACTION,
};
use crate::fields::VectorField;
use crate::grid::GridSpec;
use crate::math::{median, unit_and_norm, Scalar, R2};

use super::mask::{Cell, OccupancyMask, SpiralCells};
use super::Streamline;

/// Bounds on the adaptive step relative to the base step.
const MIN_STEP_FACTOR: Scalar = 0.25;
const MAX_STEP_FACTOR: Scalar = 2.0;
/// A step advancing less than this fraction of its length is stuck at a null point.
const MIN_PROGRESS: Scalar = 0.05;

/// Tuning knobs for [`trace_with`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Seeding density; `1.0` keeps lines roughly 1/30 of the domain apart.
    pub density: Scalar,
    /// Integration step budget for each half of a line.
    pub max_steps_per_half: usize,
    /// Lines shorter than this fraction of the domain span are dropped.
    pub min_length_fraction: Scalar,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self::with_density(DEFAULT_DENSITY)
    }
}

impl TraceOptions {
    /// Default options with the given density.
    #[must_use]
    pub const fn with_density(density: Scalar) -> Self {
        Self {
            density,
            max_steps_per_half: MAX_STEPS_PER_HALF,
            min_length_fraction: MIN_LENGTH_FRACTION,
        }
    }

    /// Mask cells per axis, capped at [`MAX_MASK_CELLS`].
    fn mask_size(&self) -> usize {
        let cells = (MASK_CELLS_PER_UNIT_DENSITY * self.density).round();
        cells.clamp(1.0, MAX_MASK_CELLS as Scalar) as usize
    }
}

/// Traces field lines through `field` with the given seeding `density`.
///
/// Lines run along the field (from positive charges toward negative charges or
/// the domain edge). A zero field, a single-sample grid or an unusable density
/// yield an empty set.
#[must_use]
pub fn trace(field: &VectorField, grid: &GridSpec, density: Scalar) -> Vec<Streamline> {
    trace_with(field, grid, &TraceOptions::with_density(density))
}

/// Same as [`trace`] with explicit [`TraceOptions`].
#[must_use]
pub fn trace_with(field: &VectorField, grid: &GridSpec, options: &TraceOptions) -> Vec<Streamline> {
    if !(options.density.is_finite() && options.density > 0.0) {
        warn!("streamline density must be positive, got {}; nothing traced", options.density);
        return Vec::new();
    }
    if MASK_CELLS_PER_UNIT_DENSITY * options.density > MAX_MASK_CELLS as Scalar {
        warn!(
            "streamline density {} exceeds the mask limit; using {MAX_MASK_CELLS} cells per axis",
            options.density
        );
    }
    if field.grid() != grid {
        warn!("field was sampled on {:?}, not on {:?}; nothing traced", field.grid(), grid);
        return Vec::new();
    }
    if grid.count < 2 {
        debug!("grid has a single sample per axis; nothing to interpolate");
        return Vec::new();
    }
    if field.is_degenerate() {
        debug!("field vanishes on the whole grid; no streamlines");
        return Vec::new();
    }

    let mut tracer = Tracer::new(field, grid, options);
    let lines = tracer.run();
    debug!(
        "traced {} streamline(s), {} of {} mask cells occupied",
        lines.len(),
        tracer.mask.occupied(),
        tracer.mask.size() * tracer.mask.size()
    );
    lines
}

struct Tracer<'a> {
    field: &'a VectorField,
    grid: &'a GridSpec,
    mask: OccupancyMask,
    base_step: Scalar,
    reference_magnitude: Scalar,
    max_steps: usize,
    min_length: Scalar,
}

impl<'a> Tracer<'a> {
    fn new(field: &'a VectorField, grid: &'a GridSpec, options: &TraceOptions) -> Self {
        let mask = OccupancyMask::new(grid, options.mask_size());
        let base_step = 0.5 * grid.spacing().min(mask.cell_size());
        let magnitudes: Vec<Scalar> = field.magnitude().iter().copied().collect();
        Self {
            field,
            grid,
            mask,
            base_step,
            reference_magnitude: median(&magnitudes),
            max_steps: options.max_steps_per_half,
            min_length: options.min_length_fraction * grid.span(),
        }
    }

    fn run(&mut self) -> Vec<Streamline> {
        let mut lines = Vec::new();
        for cell in SpiralCells::new(self.mask.size()) {
            if !self.mask.is_free(cell) {
                continue;
            }
            let seed = self.mask.centre(cell);
            if self.field.near_source(&seed) || self.direction(&seed, 1.0).is_none() {
                continue;
            }
            if let Some(line) = self.integrate(seed, cell, lines.len()) {
                lines.push(line);
            }
        }
        lines
    }

    /// Traces both halves from `seed` and joins them in field direction.
    fn integrate(&mut self, seed: R2, cell: Cell, id: usize) -> Option<Streamline> {
        self.mask.claim(cell, id);
        let backward = self.half(seed, cell, id, -1.0);
        let forward = self.half(seed, cell, id, 1.0);

        let mut points: Vec<R2> = backward.into_iter().rev().collect();
        points.extend(forward.into_iter().skip(1));
        let line = Streamline::new(points);

        if line.len() < 2 || line.length() < self.min_length {
            self.mask.rollback();
            None
        } else {
            self.mask.commit();
            Some(line)
        }
    }

    /// Integrates from `seed` along `sign · E`; the first point is the seed.
    fn half(&mut self, seed: R2, seed_cell: Cell, id: usize, sign: Scalar) -> Vec<R2> {
        let mut points = vec![seed];
        let mut p = seed;
        let mut cell = seed_cell;

        for _ in 0..self.max_steps {
            let Some((dir, magnitude)) = self.direction(&p, sign) else {
                break;
            };
            let h = self.step_length(magnitude);
            let next = self.rk4(&p, dir, h, sign);
            if !next.iter().all(|v| v.is_finite()) {
                break;
            }
            if !self.grid.contains(&next) {
                points.push(self.grid.clip_segment(&p, &next));
                break;
            }
            if (next - p).norm() < MIN_PROGRESS * h {
                break;
            }
            let next_cell = self.mask.cell_of(&next);
            if next_cell != cell {
                if !self.mask.claim(next_cell, id) {
                    break;
                }
                cell = next_cell;
            }
            points.push(next);
            if self.field.near_source(&next) {
                break;
            }
            p = next;
        }
        points
    }

    /// Unit direction of `sign · E` at `p` and the field magnitude there.
    fn direction(&self, p: &R2, sign: Scalar) -> Option<(R2, Scalar)> {
        let e = self.field.sample(p)?;
        let (unit, magnitude) = unit_and_norm(&e, MIN_FIELD_MAGNITUDE)?;
        Some((unit * sign, magnitude))
    }

    /// Shorter steps where the field is strong, longer where it is weak.
    fn step_length(&self, magnitude: Scalar) -> Scalar {
        let factor = if self.reference_magnitude > 0.0 {
            (self.reference_magnitude / magnitude)
                .sqrt()
                .clamp(MIN_STEP_FACTOR, MAX_STEP_FACTOR)
        } else {
            1.0
        };
        self.base_step * factor
    }

    /// Classic RK4 on the normalised direction field. Falls back to an Euler
    /// step when an intermediate stage leaves the domain or hits a null.
    fn rk4(&self, p: &R2, k1: R2, h: Scalar, sign: Scalar) -> R2 {
        let euler = p + k1 * h;
        let Some((k2, _)) = self.direction(&(p + k1 * (0.5 * h)), sign) else {
            return euler;
        };
        let Some((k3, _)) = self.direction(&(p + k2 * (0.5 * h)), sign) else {
            return euler;
        };
        let Some((k4, _)) = self.direction(&(p + k3 * h), sign) else {
            return euler;
        };
        p + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charges::Charge;
    use crate::constants::CLAMP_RADIUS_SQUARED;
    use crate::fields::evaluate;

    fn on_boundary(grid: &GridSpec, p: &R2) -> bool {
        [p.x, p.y]
            .iter()
            .any(|&v| (v - grid.min).abs() < 1.0e-9 || (v - grid.max).abs() < 1.0e-9)
    }

    #[test]
    fn vanishing_field_gives_no_lines() {
        let grid = GridSpec::new(-5.0, 5.0, 51);
        let neutral = evaluate(&[Charge::new(0.0, 0.0, 0.0)], &grid).unwrap();
        assert!(trace(&neutral, &grid, 1.0).is_empty());

        let cancelling = evaluate(&[Charge::new(1.0, 1.0, 1.0), Charge::new(1.0, 1.0, -1.0)], &grid).unwrap();
        assert!(cancelling.is_degenerate());
        assert!(trace(&cancelling, &grid, 1.0).is_empty());
    }

    #[test]
    fn unusable_inputs_give_no_lines() {
        let grid = GridSpec::new(-5.0, 5.0, 51);
        let field = evaluate(&[Charge::new(0.0, 0.0, 1.0)], &grid).unwrap();
        assert!(trace(&field, &grid, 0.0).is_empty());
        assert!(trace(&field, &grid, -1.0).is_empty());
        assert!(trace(&field, &grid, Scalar::NAN).is_empty());
        assert!(trace(&field, &GridSpec::new(-4.0, 4.0, 51), 1.0).is_empty());

        let tiny = GridSpec::new(-5.0, 5.0, 1);
        let single = evaluate(&[Charge::new(0.0, 0.0, 1.0)], &tiny).unwrap();
        assert!(trace(&single, &tiny, 1.0).is_empty());
    }

    #[test]
    fn lines_leave_a_source_and_stop_at_the_boundary() {
        let grid = GridSpec::new(-10.0, 10.0, 101);
        let field = evaluate(&[Charge::new(0.0, 0.0, 1.0)], &grid).unwrap();
        let lines = trace(&field, &grid, 1.5);
        assert!(!lines.is_empty());

        for line in &lines {
            assert!(line.len() >= 2);
            assert!(line.points().iter().all(|p| grid.contains(p)));
            // radially outward away from the charge
            for w in line.points().windows(2) {
                if w[0].norm() > 1.0 {
                    assert!(w[1].norm() >= w[0].norm() - 1.0e-9);
                }
            }
        }

        // first seed sits in the corner cell: it reaches the charge upstream
        // and is clipped at the domain edge downstream
        let first = &lines[0];
        assert!(first.start().unwrap().norm_squared() < CLAMP_RADIUS_SQUARED);
        assert!(on_boundary(&grid, &first.end().unwrap()));
    }

    #[test]
    fn lines_terminate_inside_a_sink() {
        let grid = GridSpec::new(-10.0, 10.0, 101);
        let field = evaluate(&[Charge::new(0.0, 0.0, -2.0)], &grid).unwrap();
        let lines = trace(&field, &grid, 1.5);
        let first = &lines[0];
        assert!(on_boundary(&grid, &first.start().unwrap()));
        assert!(first.end().unwrap().norm_squared() < CLAMP_RADIUS_SQUARED);
    }

    #[test]
    fn dipole_lines_follow_the_field() {
        let grid = GridSpec::new(-10.0, 10.0, 101);
        let charges = [Charge::new(-2.0, 0.0, 1.0), Charge::new(2.0, 0.0, -1.0)];
        let field = evaluate(&charges, &grid).unwrap();
        let lines = trace(&field, &grid, 1.0);
        assert!(lines.len() > 10);

        let (mut along, mut total) = (0usize, 0usize);
        for line in &lines {
            for w in line.points().windows(2) {
                let step = w[1] - w[0];
                if step.norm() == 0.0 {
                    continue;
                }
                total += 1;
                if step.dot(&field.sample(&w[0]).unwrap()) > 0.0 {
                    along += 1;
                }
            }
        }
        assert!(along as Scalar >= 0.99 * total as Scalar, "{along} of {total} steps along E");

        let positive = charges[0].position();
        assert!((lines[0].start().unwrap() - positive).norm_squared() < CLAMP_RADIUS_SQUARED);
    }

    #[test]
    fn higher_density_gives_more_lines() {
        let grid = GridSpec::new(-10.0, 10.0, 101);
        let field = evaluate(&[Charge::new(1.0, -0.5, 1.0)], &grid).unwrap();
        let sparse = trace(&field, &grid, 0.5);
        let dense = trace(&field, &grid, 2.0);
        assert!(!sparse.is_empty());
        assert!(dense.len() > sparse.len());
    }

    #[test]
    fn huge_density_is_capped() {
        assert_eq!(TraceOptions::with_density(1.0e9).mask_size(), MAX_MASK_CELLS);
        assert_eq!(TraceOptions::with_density(Scalar::MAX).mask_size(), MAX_MASK_CELLS);
        assert_eq!(TraceOptions::with_density(1.0e-9).mask_size(), 1);
        assert_eq!(TraceOptions::with_density(1.5).mask_size(), 45);

        let grid = GridSpec::new(-10.0, 10.0, 21);
        let field = evaluate(&[Charge::new(0.0, 0.0, 1.0)], &grid).unwrap();
        let lines = trace(&field, &grid, 1.0e9);
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.points().iter().all(|p| grid.contains(p))));
    }

    #[test]
    fn tracing_is_deterministic_and_respects_min_length() {
        let grid = GridSpec::new(-6.0, 6.0, 61);
        let charges = [Charge::new(-1.0, 1.0, 2.0), Charge::new(1.5, -1.0, -1.0)];
        let field = evaluate(&charges, &grid).unwrap();
        let options = TraceOptions::with_density(1.2);
        let a = trace_with(&field, &grid, &options);
        let b = trace_with(&field, &grid, &options);
        assert_eq!(a, b);
        let min_length = options.min_length_fraction * grid.span();
        assert!(a.iter().all(|l| l.length() >= min_length));
    }
}
