//! Point-charge field evaluation on a sampling grid.

mod electrostatic;
mod vector_field;

pub use electrostatic::{evaluate, evaluate_with_clamp, field_at};
pub use vector_field::VectorField;
