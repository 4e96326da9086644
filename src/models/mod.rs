//! Curve family implementations.
//!
//! Models are implemented as small, pure functions over a coefficient slice so
//! that the estimators, reports, plots, and exports share one definition of
//! each curve.

pub mod model;

pub use model::*;
