//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - input observations (`Point`) and estimator options (`FitOptions`)
//! - fit outputs (`FitResult`, `FittedPoint`, `FitWarning`)
//! - run configuration (`FitConfig`, `SampleConfig`) and the curve file schema

pub mod types;

pub use types::*;
