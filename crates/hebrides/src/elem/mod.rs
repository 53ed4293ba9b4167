//! Scalar element types: [`Real`], [`Complex`] and [`Angle`].

mod angle;
mod complex;
mod real;

pub use angle::{display_in, Angle, AngleUnit};
pub use complex::Complex;
pub use real::{Real, DEFAULT_TOLERANCE};
