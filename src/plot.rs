//! One render request: evaluate, trace, classify.

use std::time::Instant;

use log::{debug, info};

use crate::charges::{classify_markers, validate_charges, Charge, ChargeMarker};
use crate::errors::{FieldError, ValidationError};
use crate::fields::{evaluate, VectorField};
use crate::grid::GridSpec;
use crate::input::{parse_charges, parse_grid};
use crate::math::Scalar;
use crate::stream::{trace, Streamline};

/// Everything a renderer needs to draw one field plot.
#[derive(Debug, Clone)]
pub struct FieldPlot {
    /// Domain the plot covers.
    pub grid: GridSpec,
    /// Sampled field.
    pub field: VectorField,
    /// Field lines, each ordered along the field.
    pub streamlines: Vec<Streamline>,
    /// One marker per input charge, in input order.
    pub markers: Vec<ChargeMarker>,
}

impl FieldPlot {
    /// Validates all inputs, then evaluates the field, traces lines and
    /// classifies markers. Nothing is computed if any input is rejected.
    pub fn build(charges: &[Charge], grid: &GridSpec, density: Scalar) -> Result<Self, FieldError> {
        validate_charges(charges)?;
        grid.validate()?;
        if !(density.is_finite() && density > 0.0) {
            return Err(ValidationError::InvalidDensity(density).into());
        }

        let started = Instant::now();
        let field = evaluate(charges, grid)?;
        let evaluated = started.elapsed();
        let streamlines = trace(&field, grid, density);
        let traced = started.elapsed() - evaluated;
        let markers = classify_markers(charges);

        debug!("field evaluation took {evaluated:?}, tracing took {traced:?}");
        info!(
            "plot ready: {} charge(s), {} streamline(s) on a {}x{} grid",
            charges.len(),
            streamlines.len(),
            grid.count,
            grid.count
        );

        Ok(Self {
            grid: *grid,
            field,
            streamlines,
            markers,
        })
    }

    /// Parses form text (one `x y q` charge per line, grid bounds and point
    /// count) and builds the plot.
    pub fn from_text(
        charges: &str,
        grid_min: &str,
        grid_max: &str,
        grid_points: &str,
        density: Scalar,
    ) -> Result<Self, FieldError> {
        let charges = parse_charges(charges)?;
        let grid = parse_grid(grid_min, grid_max, grid_points)?;
        Self::build(&charges, &grid, density)
    }

    /// Labelled markers with their legend text, in input order.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&ChargeMarker, &'static str)> + '_ {
        self.markers.iter().filter_map(|m| m.label().map(|label| (m, label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charges::Polarity;
    use crate::constants::DEFAULT_DENSITY;

    #[test]
    fn builds_a_complete_plot() {
        let charges = [
            Charge::new(0.0, 0.0, 1.0),
            Charge::new(1.0, 0.0, -1.0),
            Charge::new(2.0, 0.0, 1.0),
        ];
        let plot = FieldPlot::build(&charges, &GridSpec::new(-5.0, 5.0, 51), DEFAULT_DENSITY).unwrap();
        assert_eq!(plot.markers.len(), 3);
        assert!(!plot.streamlines.is_empty());

        let legend: Vec<_> = plot.legend_entries().map(|(m, label)| (m.polarity, label)).collect();
        assert_eq!(
            legend,
            vec![
                (Polarity::Positive, "Positive charge"),
                (Polarity::Negative, "Negative charge")
            ]
        );
    }

    #[test]
    fn rejects_bad_density_before_computing() {
        let charges = [Charge::new(0.0, 0.0, 1.0)];
        let grid = GridSpec::new(-1.0, 1.0, 11);
        assert!(matches!(
            FieldPlot::build(&charges, &grid, 0.0),
            Err(FieldError::Validation(ValidationError::InvalidDensity(_)))
        ));
        assert!(matches!(
            FieldPlot::build(&[], &grid, 1.0),
            Err(FieldError::Validation(ValidationError::EmptyCharges))
        ));
    }

    #[test]
    fn from_text_surfaces_parse_errors() {
        let err = FieldPlot::from_text("0 0", "-10", "10", "200", 1.5).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "line 1: expected three values (x y q), found 2");

        let err = FieldPlot::from_text("0 0 1", "10", "-10", "200", 1.5).unwrap_err();
        assert!(err.to_string().starts_with("grid parameters: "));
    }

    #[test]
    fn all_neutral_charges_render_without_lines() {
        let plot = FieldPlot::from_text("0 0 0\n1 1 0", "-2", "2", "21", 1.0).unwrap();
        assert!(plot.streamlines.is_empty());
        assert_eq!(plot.legend_entries().count(), 0);
    }
}
