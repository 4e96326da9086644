//! `curve-fit` library crate.
//!
//! The binary (`cfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the estimators are usable directly from other Rust code
//!
//! The core API is re-exported at the crate root:
//!
//! ```
//! use curve_fit::{FitOptions, Point, linear};
//!
//! let points = [Point::new(1.0, 3.0), Point::new(2.0, 5.0), Point::new(3.0, 7.0)];
//! let result = linear(&points, &FitOptions::default());
//! assert_eq!(result.coefficients, vec![2.0, 1.0]);
//! assert_eq!(result.equation, "y = 2x + 1");
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use domain::{FitKind, FitOptions, FitResult, FitWarning, FittedPoint, Point};
pub use error::AppError;
pub use fit::{exponential, fit, fit_and_rank, linear, logarithmic, polynomial, power};
pub use math::{determination_coefficient, gaussian_elimination, round};
