//! Numerical building blocks: rounding, r², and the Gaussian solver.

pub mod determination;
pub mod gauss;
pub mod round;

pub use determination::*;
pub use gauss::*;
pub use round::*;
