//! `Complex`: Cartesian complex numbers built from two `Real` parts.
//!
//! Transcendental functions evaluate principal branches through
//! `num_complex`, with the usual branch cuts (argument in `(-π, π]`). Points
//! where a function is singular (`ln 0`, `atan ±i`, `atanh ±1`) are reported
//! as `DomainError` rather than returned as infinities.

use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_complex::Complex64;

use crate::elem::{Angle, Real, DEFAULT_TOLERANCE};
use crate::error::{ConversionError, ConversionErrorKind, DomainError, DomainReason};
use crate::format;

/// A complex number `re + im·i`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    re: Real,
    im: Real,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const I: Complex = Complex::new(0.0, 1.0);

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Complex {
            re: Real::new(re),
            im: Real::new(im),
        }
    }

    #[inline]
    pub const fn from_parts(re: Real, im: Real) -> Self {
        Complex { re, im }
    }

    pub fn from_real(re: impl Into<Real>) -> Self {
        Complex::from_parts(re.into(), Real::ZERO)
    }

    pub fn from_imag(im: impl Into<Real>) -> Self {
        Complex::from_parts(Real::ZERO, im.into())
    }

    pub fn from_polar(norm: Real, arg: Angle) -> Self {
        let (sin, cos) = arg.radians().sin_cos();
        Complex::new(norm.value() * cos, norm.value() * sin)
    }

    /// `cos θ + i sin θ`.
    pub fn cis(arg: Angle) -> Self {
        Complex::from_polar(Real::ONE, arg)
    }

    #[inline]
    pub fn re(&self) -> Real {
        self.re
    }

    #[inline]
    pub fn im(&self) -> Real {
        self.im
    }

    #[inline]
    fn parts(self) -> (f64, f64) {
        (self.re.value(), self.im.value())
    }

    #[inline]
    fn to_c64(self) -> Complex64 {
        Complex64::new(self.re.value(), self.im.value())
    }

    fn is_at(self, re: f64, im: f64) -> bool {
        self.re.value() == re && self.im.value() == im
    }

    fn nan() -> Complex {
        Complex::new(f64::NAN, f64::NAN)
    }

    // ---- queries ----

    /// Modulus `|z|`, computed without intermediate overflow.
    pub fn norm(&self) -> Real {
        self.re.hypot(self.im)
    }

    pub fn norm_sqr(&self) -> Real {
        let (re, im) = self.parts();
        Real::new(re * re + im * im)
    }

    /// Principal argument in `(-π, π]`; `arg(0) = 0`.
    pub fn arg(&self) -> Angle {
        let (re, im) = self.parts();
        if re == 0.0 && im == 0.0 {
            return Angle::ZERO;
        }
        // -0.0 + 0.0 is +0.0, keeping the negative real axis at π
        Angle::from_radians((im + 0.0).atan2(re))
    }

    pub fn to_polar(&self) -> (Real, Angle) {
        (self.norm(), self.arg())
    }

    pub fn conj(&self) -> Complex {
        Complex::from_parts(self.re, -self.im)
    }

    pub fn recip(&self) -> Complex {
        Complex::ONE / *self
    }

    pub fn recip_checked(&self) -> Result<Complex, DomainError> {
        Complex::ONE.checked_div(*self)
    }

    pub fn checked_div(self, divisor: Complex) -> Result<Complex, DomainError> {
        if divisor.is_zero() {
            return Err(DomainError::new("div", DomainReason::ZeroDivisor, self));
        }
        Ok(self / divisor)
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn is_imaginary(&self) -> bool {
        self.re.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_nan() && (self.re.is_infinite() || self.im.is_infinite())
    }

    /// Unit complex pointing the same way as `self`; zero stays zero.
    pub fn signum(&self) -> Complex {
        let (re, im) = self.parts();
        if re == 0.0 && im == 0.0 {
            return Complex::ZERO;
        }
        if self.is_nan() {
            return Complex::nan();
        }
        if self.is_infinite() {
            let re = if re.is_infinite() { re.signum() } else { 0.0 };
            let im = if im.is_infinite() { im.signum() } else { 0.0 };
            let norm = re.hypot(im);
            return Complex::new(re / norm, im / norm);
        }
        let norm = re.hypot(im);
        Complex::new(re / norm, im / norm)
    }

    /// Zeroes either part whose magnitude is below `tolerance`.
    pub fn chop(&self, tolerance: f64) -> Complex {
        Complex::from_parts(self.re.chop(tolerance), self.im.chop(tolerance))
    }

    pub fn approx_eq(&self, other: Complex, tolerance: f64) -> bool {
        self.re.approx_eq(other.re, tolerance) && self.im.approx_eq(other.im, tolerance)
    }

    // ---- exponential and logarithmic ----

    pub fn exp(self) -> Complex {
        self.to_c64().exp().into()
    }

    /// Principal natural logarithm. Zero is a singularity.
    pub fn ln(self) -> Result<Complex, DomainError> {
        if self.is_nan() {
            return Ok(Complex::nan());
        }
        if self.is_zero() {
            return Err(DomainError::new("ln", DomainReason::Singularity, self));
        }
        let (re, im) = self.parts();
        Ok(Complex::new(re.hypot(im).ln(), im.atan2(re)))
    }

    pub fn log(self, base: Real) -> Result<Complex, DomainError> {
        if base.is_nan() {
            return Ok(Complex::nan());
        }
        if base.value() <= 0.0 || base.value() == 1.0 {
            return Err(DomainError::new("log", DomainReason::InvalidBase, base));
        }
        let ln = self.ln().map_err(|_| rename("log", self))?;
        Ok(ln / base.value().ln())
    }

    pub fn log2(self) -> Result<Complex, DomainError> {
        let ln = self.ln().map_err(|_| rename("log2", self))?;
        Ok(ln / std::f64::consts::LN_2)
    }

    pub fn log10(self) -> Result<Complex, DomainError> {
        let ln = self.ln().map_err(|_| rename("log10", self))?;
        Ok(ln / std::f64::consts::LN_10)
    }

    // ---- powers and roots ----

    /// Principal square root, with the result in the right half-plane.
    pub fn sqrt(self) -> Complex {
        self.to_c64().sqrt().into()
    }

    /// Principal cube root.
    pub fn cbrt(self) -> Complex {
        self.to_c64().cbrt().into()
    }

    /// Integer power by repeated squaring.
    pub fn powi(self, exponent: i32) -> Result<Complex, DomainError> {
        if exponent < 0 && self.is_zero() {
            return Err(DomainError::new(
                "powi",
                DomainReason::Singularity,
                format_args!("({self})^{exponent}"),
            ));
        }
        let mut base = self;
        let mut n = exponent.unsigned_abs();
        let mut acc = Complex::ONE;
        while n > 0 {
            if n & 1 == 1 {
                acc *= base;
            }
            base *= base;
            n >>= 1;
        }
        Ok(if exponent < 0 { acc.recip() } else { acc })
    }

    pub fn powf(self, exponent: Real) -> Result<Complex, DomainError> {
        self.powc(Complex::from_real(exponent))
            .map_err(|_| zero_power("powf", self, exponent))
    }

    /// Principal power `exp(w ln z)`. `0^0 = 1`, `0^w = 0` for `Re w > 0`;
    /// other powers of zero are singular.
    pub fn powc(self, exponent: Complex) -> Result<Complex, DomainError> {
        if self.is_nan() || exponent.is_nan() {
            return Ok(Complex::nan());
        }
        if self.is_zero() {
            if exponent.is_zero() {
                return Ok(Complex::ONE);
            }
            if exponent.re.is_positive() {
                return Ok(Complex::ZERO);
            }
            return Err(zero_power("powc", self, exponent));
        }
        Ok(self.to_c64().powc(exponent.to_c64()).into())
    }

    // ---- trigonometric ----

    pub fn sin(self) -> Complex {
        self.to_c64().sin().into()
    }

    pub fn cos(self) -> Complex {
        self.to_c64().cos().into()
    }

    pub fn tan(self) -> Complex {
        self.to_c64().tan().into()
    }

    pub fn asin(self) -> Complex {
        self.to_c64().asin().into()
    }

    pub fn acos(self) -> Complex {
        self.to_c64().acos().into()
    }

    /// Singular at `±i`.
    pub fn atan(self) -> Result<Complex, DomainError> {
        if self.is_at(0.0, 1.0) || self.is_at(0.0, -1.0) {
            return Err(DomainError::new("atan", DomainReason::Singularity, self));
        }
        Ok(self.to_c64().atan().into())
    }

    // ---- hyperbolic ----

    pub fn sinh(self) -> Complex {
        self.to_c64().sinh().into()
    }

    pub fn cosh(self) -> Complex {
        self.to_c64().cosh().into()
    }

    pub fn tanh(self) -> Complex {
        self.to_c64().tanh().into()
    }

    pub fn asinh(self) -> Complex {
        self.to_c64().asinh().into()
    }

    pub fn acosh(self) -> Complex {
        self.to_c64().acosh().into()
    }

    /// Singular at `±1`.
    pub fn atanh(self) -> Result<Complex, DomainError> {
        if self.is_at(1.0, 0.0) || self.is_at(-1.0, 0.0) {
            return Err(DomainError::new("atanh", DomainReason::Singularity, self));
        }
        Ok(self.to_c64().atanh().into())
    }
}

fn rename(operation: &'static str, input: Complex) -> DomainError {
    DomainError::new(operation, DomainReason::Singularity, input)
}

fn zero_power(operation: &'static str, base: Complex, exponent: impl fmt::Display) -> DomainError {
    DomainError::new(
        operation,
        DomainReason::Singularity,
        format_args!("({base})^({exponent})"),
    )
}

// ---- conversions ----

impl From<Real> for Complex {
    fn from(re: Real) -> Self {
        Complex::from_real(re)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Complex::new(re, 0.0)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((re, im): (f64, f64)) -> Self {
        Complex::new(re, im)
    }
}

impl From<Angle> for Complex {
    fn from(angle: Angle) -> Self {
        Complex::cis(angle)
    }
}

impl From<Complex64> for Complex {
    fn from(z: Complex64) -> Self {
        Complex::new(z.re, z.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(z: Complex) -> Self {
        z.to_c64()
    }
}

impl TryFrom<Complex> for Real {
    type Error = ConversionError;

    /// Succeeds when the imaginary part is zero within [`DEFAULT_TOLERANCE`].
    fn try_from(z: Complex) -> Result<Self, Self::Error> {
        let im = z.im.value();
        if im.is_nan() {
            return Err(ConversionError::new(
                "Complex",
                "Real",
                ConversionErrorKind::NotFinite,
                z,
            ));
        }
        if im.abs() > DEFAULT_TOLERANCE {
            return Err(ConversionError::new(
                "Complex",
                "Real",
                ConversionErrorKind::NonZeroImaginary,
                z,
            ));
        }
        Ok(z.re)
    }
}

impl FromStr for Complex {
    type Err = ConversionError;

    /// Accepts `a`, `bi`, `a+bi`, `a-bi`, `i` and `-i`; `j` may stand in
    /// for `i` and whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || ConversionError::new("str", "Complex", ConversionErrorKind::Parse, s);
        let text: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if text.is_empty() {
            return Err(parse_error());
        }
        if let Ok(re) = text.parse::<Real>() {
            return Ok(Complex::from_real(re));
        }
        let body = text
            .strip_suffix('i')
            .or_else(|| text.strip_suffix('j'))
            .ok_or_else(parse_error)?;

        // The split is the last sign that does not belong to an exponent.
        let bytes = body.as_bytes();
        let split = (1..bytes.len())
            .rev()
            .find(|&idx| {
                matches!(bytes[idx], b'+' | b'-') && !matches!(bytes[idx - 1], b'e' | b'E')
            });
        let (re_text, im_text) = match split {
            Some(idx) => (&body[..idx], &body[idx..]),
            None => ("", body),
        };
        let re = if re_text.is_empty() {
            Real::ZERO
        } else {
            re_text.parse::<Real>().map_err(|_| parse_error())?
        };
        let im = match im_text {
            "" | "+" => Real::ONE,
            "-" => Real::new(-1.0),
            other => other.parse::<Real>().map_err(|_| parse_error())?,
        };
        Ok(Complex::from_parts(re, im))
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = self.parts();
        f.write_str(&format::format_complex(re, im, f.precision()))
    }
}

// ---- operators ----

impl Add for Complex {
    type Output = Complex;
    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        Complex::from_parts(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;
    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::from_parts(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        let (a, b) = self.parts();
        let (c, d) = rhs.parts();
        Complex::new(a * c - b * d, a * d + b * c)
    }
}

impl Div for Complex {
    type Output = Complex;

    /// Smith's algorithm: scales by the larger divisor component so the
    /// intermediate products cannot overflow. Division by zero yields NaN
    /// parts; use [`Complex::checked_div`] to get an error instead.
    fn div(self, rhs: Complex) -> Complex {
        let (a, b) = self.parts();
        let (c, d) = rhs.parts();
        if c.abs() >= d.abs() {
            let r = d / c;
            let den = c + d * r;
            Complex::new((a + b * r) / den, (b - a * r) / den)
        } else {
            let r = c / d;
            let den = c * r + d;
            Complex::new((a * r + b) / den, (b * r - a) / den)
        }
    }
}

impl Neg for Complex {
    type Output = Complex;
    #[inline]
    fn neg(self) -> Complex {
        Complex::from_parts(-self.re, -self.im)
    }
}

macro_rules! complex_assign {
    ($($trait:ident $method:ident $op:tt;)+) => {$(
        complex_assign!(@impl $trait $method $op Complex);
        complex_assign!(@impl $trait $method $op Real);
        complex_assign!(@impl $trait $method $op f64);
    )+};
    (@impl $trait:ident $method:ident $op:tt $rhs:ty) => {
        impl $trait<$rhs> for Complex {
            #[inline]
            fn $method(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

complex_assign! {
    AddAssign add_assign +;
    SubAssign sub_assign -;
    MulAssign mul_assign *;
    DivAssign div_assign /;
}

macro_rules! complex_scalar_ops {
    ($($scalar:ty),+) => {$(
        impl Add<$scalar> for Complex {
            type Output = Complex;
            #[inline]
            fn add(self, rhs: $scalar) -> Complex {
                Complex::from_parts(self.re + f64::from(rhs), self.im)
            }
        }

        impl Add<Complex> for $scalar {
            type Output = Complex;
            #[inline]
            fn add(self, rhs: Complex) -> Complex {
                rhs + self
            }
        }

        impl Sub<$scalar> for Complex {
            type Output = Complex;
            #[inline]
            fn sub(self, rhs: $scalar) -> Complex {
                Complex::from_parts(self.re - f64::from(rhs), self.im)
            }
        }

        impl Sub<Complex> for $scalar {
            type Output = Complex;
            #[inline]
            fn sub(self, rhs: Complex) -> Complex {
                Complex::from_parts(f64::from(self) - rhs.re, -rhs.im)
            }
        }

        impl Mul<$scalar> for Complex {
            type Output = Complex;
            #[inline]
            fn mul(self, rhs: $scalar) -> Complex {
                let k = f64::from(rhs);
                Complex::from_parts(self.re * k, self.im * k)
            }
        }

        impl Mul<Complex> for $scalar {
            type Output = Complex;
            #[inline]
            fn mul(self, rhs: Complex) -> Complex {
                rhs * self
            }
        }

        impl Div<$scalar> for Complex {
            type Output = Complex;
            #[inline]
            fn div(self, rhs: $scalar) -> Complex {
                let k = f64::from(rhs);
                Complex::from_parts(self.re / k, self.im / k)
            }
        }

        impl Div<Complex> for $scalar {
            type Output = Complex;
            #[inline]
            fn div(self, rhs: Complex) -> Complex {
                Complex::from_real(f64::from(self)) / rhs
            }
        }
    )+};
}

complex_scalar_ops!(Real, f64);

impl Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Complex> for Complex {
    fn sum<I: Iterator<Item = &'a Complex>>(iter: I) -> Complex {
        iter.copied().sum()
    }
}

impl Product for Complex {
    fn product<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ONE, Mul::mul)
    }
}
