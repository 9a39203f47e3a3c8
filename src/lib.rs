#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Numerical constants and default plot parameters.
pub mod constants;
/// Shared mathematical utilities (vectors, matrices, sampling).
pub mod math;
/// Square sampling domain.
pub mod grid;
/// Point charges and marker classification.
pub mod charges;
/// Superposed point-charge field evaluation.
pub mod fields;
/// Field-line tracing.
pub mod stream;
/// Render-request orchestration.
pub mod plot;
/// Text input parsing for charges and grid parameters.
pub mod input;
/// TOML plot configuration (feature = "config").
#[cfg(feature = "config")]
pub mod config;
/// SVG rendering (feature = "plot").
#[cfg(feature = "plot")]
pub mod render;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use charges::{classify_markers, Charge, ChargeMarker, Polarity};
pub use errors::{FieldError, ValidationError};
pub use fields::{evaluate, VectorField};
pub use grid::GridSpec;
pub use stream::{trace, Streamline};
