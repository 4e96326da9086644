//! Curve fitting.
//!
//! Responsibilities:
//!
//! - the five estimators and the `fit` dispatcher
//! - fitting every family on one dataset and ranking them by r² (parallel)

pub mod estimators;
pub mod selection;

pub use estimators::*;
pub use selection::*;
