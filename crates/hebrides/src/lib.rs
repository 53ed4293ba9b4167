//! `hebrides`: real, complex and angular numbers.
//!
//! [`Real`] wraps an `f64` and turns out-of-domain inputs of transcendental
//! functions into [`DomainError`]s instead of NaN. [`Complex`] offers the
//! principal branch of every elementary function, and [`Angle`] keeps a
//! measure in radians with explicit unit conversions. The [`linal`] module
//! builds vectors and matrices over these scalars, and [`registry`] exposes
//! every scalar operation by name for tooling such as the CLI.

#![deny(rust_2018_idioms)]

pub mod elem;
pub mod error;
pub mod format;
pub mod linal;
pub mod registry;

pub use elem::{Angle, AngleUnit, Complex, Real, DEFAULT_TOLERANCE};
pub use error::{
    ConversionError, ConversionErrorKind, DimensionError, DomainError, DomainReason, MathError,
    MathResult,
};
pub use linal::{Matrix, Scalar, Vector};
pub use registry::{Operation, Value, ValueKind};
