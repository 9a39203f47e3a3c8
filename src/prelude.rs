//! Convenience re-exports for building field plots.

pub use crate::charges::{classify_markers, validate_charges, Charge, ChargeMarker, Polarity};
pub use crate::constants::*;
pub use crate::errors::{FieldError, ValidationError};
pub use crate::fields::{evaluate, evaluate_with_clamp, field_at, VectorField};
pub use crate::grid::GridSpec;
pub use crate::input::{parse_charges, parse_grid, GridInputError, InputError};
pub use crate::math::{linspace, Grid2, Scalar, R2};
pub use crate::plot::FieldPlot;
pub use crate::stream::{trace, trace_with, Streamline, TraceOptions};

#[cfg(feature = "config")]
pub use crate::config::{ConfigError, OutputConfig, PlotConfig};
#[cfg(feature = "plot")]
pub use crate::render::{render_svg, render_svg_string, PlotStyle};
