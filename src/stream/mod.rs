//! Field-line tracing over a sampled [`VectorField`](crate::fields::VectorField).
//!
//! Seeds are laid out on a coarse occupancy mask whose resolution is set by the
//! requested density. Each seed is integrated backward and forward with RK4 on
//! the normalised, bilinearly interpolated field, and stops at the domain edge,
//! inside a charge's exclusion radius, in a vanishing field, or on reaching a
//! mask cell already taken by another line.

mod mask;
mod streamline;
mod tracer;

pub use streamline::Streamline;
pub use tracer::{trace, trace_with, TraceOptions};
