//! Linear algebra over the scalar types.
//!
//! [`Vector`] and [`Matrix`] store any `T`; the numeric operations (dot
//! products, norms, products, determinants) are available when `T` is a
//! [`Scalar`], which is implemented for [`Real`] and [`Complex`].

mod matrix;
mod vector;

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::elem::{Complex, Real};

pub use matrix::Matrix;
pub use vector::Vector;

/// A field element usable in vectors and matrices.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Sum
{
    const ZERO: Self;
    const ONE: Self;

    fn conjugate(self) -> Self;

    /// `|x|`
    fn modulus(self) -> f64;

    fn from_real(value: Real) -> Self;
}

impl Scalar for Real {
    const ZERO: Self = Real::ZERO;
    const ONE: Self = Real::ONE;

    fn conjugate(self) -> Self {
        self
    }

    fn modulus(self) -> f64 {
        self.value().abs()
    }

    fn from_real(value: Real) -> Self {
        value
    }
}

impl Scalar for Complex {
    const ZERO: Self = Complex::ZERO;
    const ONE: Self = Complex::ONE;

    fn conjugate(self) -> Self {
        self.conj()
    }

    fn modulus(self) -> f64 {
        self.norm().value()
    }

    fn from_real(value: Real) -> Self {
        Complex::from(value)
    }
}
