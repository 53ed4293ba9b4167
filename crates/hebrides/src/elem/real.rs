//! `Real`: a single IEEE-754 double with checked transcendental functions.
//!
//! Functions whose real domain is restricted (`ln`, `sqrt`, `asin`, ...)
//! return `Result<Real, DomainError>` instead of silently producing NaN. The
//! `*_complex` variants evaluate the same function at `x + 0i` and never fail,
//! so values outside the real domain are promoted to complex results.
//!
//! NaN is never a domain error: it propagates through every operation.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use num_complex::Complex64;

use crate::elem::Complex;
use crate::error::{ConversionError, ConversionErrorKind, DomainError, DomainReason};
use crate::format;

/// Tolerance used when deciding whether a computed imaginary part is zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

const UNIT_INTERVAL: DomainReason = DomainReason::OutOfRange {
    lower: -1.0,
    upper: 1.0,
    closed: true,
};

/// A real number.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Real(f64);

impl Real {
    pub const ZERO: Real = Real(0.0);
    pub const ONE: Real = Real(1.0);
    pub const PI: Real = Real(std::f64::consts::PI);
    pub const TAU: Real = Real(std::f64::consts::TAU);
    pub const E: Real = Real(std::f64::consts::E);
    pub const EPSILON: Real = Real(f64::EPSILON);
    pub const NAN: Real = Real(f64::NAN);
    pub const INFINITY: Real = Real(f64::INFINITY);
    pub const NEG_INFINITY: Real = Real(f64::NEG_INFINITY);

    #[inline]
    pub const fn new(value: f64) -> Self {
        Real(value)
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Evaluates `f` when `admissible` holds, passing NaN through untouched.
    fn guarded(
        self,
        operation: &'static str,
        admissible: bool,
        reason: DomainReason,
        f: impl FnOnce(f64) -> f64,
    ) -> Result<Real, DomainError> {
        if self.0.is_nan() {
            return Ok(Real::NAN);
        }
        if !admissible {
            return Err(DomainError::new(operation, reason, self));
        }
        Ok(Real(f(self.0)))
    }

    // ---- comparison ----

    pub fn total_cmp(&self, other: &Real) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Equal within `tolerance`, absolute for small magnitudes and relative
    /// for large ones. Infinities compare equal only to themselves.
    pub fn approx_eq(self, other: Real, tolerance: f64) -> bool {
        if self.0 == other.0 {
            return true;
        }
        if !self.0.is_finite() || !other.0.is_finite() {
            return false;
        }
        let diff = (self.0 - other.0).abs();
        diff <= tolerance || diff <= tolerance * self.0.abs().max(other.0.abs())
    }

    pub fn min(self, other: Real) -> Real {
        Real(self.0.min(other.0))
    }

    pub fn max(self, other: Real) -> Real {
        Real(self.0.max(other.0))
    }

    /// Restricts `self` to `[lower, upper]`. Unlike `f64::clamp` this never
    /// panics; inverted bounds yield `upper`.
    pub fn clamp(self, lower: Real, upper: Real) -> Real {
        Real(self.0.max(lower.0).min(upper.0))
    }

    /// Zero when `|self| < tolerance`.
    pub fn chop(self, tolerance: f64) -> Real {
        if self.0.abs() < tolerance {
            Real::ZERO
        } else {
            self
        }
    }

    // ---- sign queries ----

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_sign_positive(self) -> bool {
        self.0.is_sign_positive()
    }

    pub fn is_sign_negative(self) -> bool {
        self.0.is_sign_negative()
    }

    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }

    pub fn is_integer(self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    /// `-1`, `0` or `1`. Zero of either sign maps to `0`, NaN stays NaN.
    pub fn signum(self) -> Real {
        if self.0 > 0.0 {
            Real::ONE
        } else if self.0 < 0.0 {
            Real(-1.0)
        } else if self.0 == 0.0 {
            Real::ZERO
        } else {
            self
        }
    }

    pub fn abs(self) -> Real {
        Real(self.0.abs())
    }

    pub fn copysign(self, sign: Real) -> Real {
        Real(self.0.copysign(sign.0))
    }

    // ---- arithmetic helpers ----

    pub fn checked_div(self, divisor: Real) -> Result<Real, DomainError> {
        if divisor.0 == 0.0 {
            return Err(DomainError::new("div", DomainReason::ZeroDivisor, self));
        }
        Ok(Real(self.0 / divisor.0))
    }

    pub fn recip(self) -> Real {
        Real(self.0.recip())
    }

    pub fn recip_checked(self) -> Result<Real, DomainError> {
        if self.0 == 0.0 {
            return Err(DomainError::new("recip", DomainReason::ZeroDivisor, self));
        }
        Ok(self.recip())
    }

    pub fn rem_euclid(self, divisor: Real) -> Real {
        Real(self.0.rem_euclid(divisor.0))
    }

    /// `self * a + b` with a single rounding.
    pub fn mul_add(self, a: Real, b: Real) -> Real {
        Real(self.0.mul_add(a.0, b.0))
    }

    pub fn hypot(self, other: Real) -> Real {
        Real(self.0.hypot(other.0))
    }

    // ---- rounding ----

    pub fn floor(self) -> Real {
        Real(self.0.floor())
    }

    pub fn ceil(self) -> Real {
        Real(self.0.ceil())
    }

    /// Rounds half away from zero.
    pub fn round(self) -> Real {
        Real(self.0.round())
    }

    /// Rounds half to even (banker's rounding).
    pub fn round_half_even(self) -> Real {
        let rounded = self.0.round();
        if (rounded - self.0).abs() == 0.5 {
            Real(2.0 * (self.0 / 2.0).round())
        } else {
            Real(rounded)
        }
    }

    pub fn trunc(self) -> Real {
        Real(self.0.trunc())
    }

    pub fn fract(self) -> Real {
        Real(self.0.fract())
    }

    /// Rounds to `decimals` digits after the point; negative values round to
    /// tens, hundreds and so on.
    pub fn round_to(self, decimals: i32) -> Real {
        if !self.0.is_finite() {
            return self;
        }
        Real(round_scaled(self.0, decimals))
    }

    /// Rounds to `digits` significant digits.
    pub fn round_significant(self, digits: u32) -> Result<Real, DomainError> {
        if digits == 0 {
            return Err(DomainError::new(
                "round_significant",
                DomainReason::InvalidArgument("significant digits must be at least 1"),
                digits,
            ));
        }
        if !self.0.is_finite() || self.0 == 0.0 {
            return Ok(self);
        }
        let order = self.0.abs().log10().floor() as i32;
        let scale_power = digits.min(400) as i32 - 1 - order;
        Ok(Real(round_scaled(self.0, scale_power)))
    }

    // ---- exponential and logarithmic ----

    pub fn exp(self) -> Real {
        Real(self.0.exp())
    }

    pub fn exp2(self) -> Real {
        Real(self.0.exp2())
    }

    /// `e^x - 1`, accurate near zero.
    pub fn exp_m1(self) -> Real {
        Real(self.0.exp_m1())
    }

    pub fn ln(self) -> Result<Real, DomainError> {
        self.guarded("ln", self.0 > 0.0, DomainReason::NonPositive, f64::ln)
    }

    pub fn log2(self) -> Result<Real, DomainError> {
        self.guarded("log2", self.0 > 0.0, DomainReason::NonPositive, f64::log2)
    }

    pub fn log10(self) -> Result<Real, DomainError> {
        self.guarded("log10", self.0 > 0.0, DomainReason::NonPositive, f64::log10)
    }

    pub fn log(self, base: Real) -> Result<Real, DomainError> {
        if base.0.is_nan() {
            return Ok(Real::NAN);
        }
        if base.0 <= 0.0 || base.0 == 1.0 {
            return Err(DomainError::new("log", DomainReason::InvalidBase, base));
        }
        self.guarded("log", self.0 > 0.0, DomainReason::NonPositive, |x| {
            x.ln() / base.0.ln()
        })
    }

    /// `ln(1 + x)`, accurate near zero.
    pub fn ln_1p(self) -> Result<Real, DomainError> {
        self.guarded(
            "ln_1p",
            self.0 > -1.0,
            DomainReason::OutOfRange {
                lower: -1.0,
                upper: f64::INFINITY,
                closed: false,
            },
            f64::ln_1p,
        )
    }

    // ---- powers and roots ----

    pub fn sqrt(self) -> Result<Real, DomainError> {
        self.guarded("sqrt", self.0 >= 0.0, DomainReason::Negative, f64::sqrt)
    }

    pub fn cbrt(self) -> Real {
        Real(self.0.cbrt())
    }

    pub fn powi(self, exponent: i32) -> Real {
        Real(self.0.powi(exponent))
    }

    /// Real power. Fails where the result would be complex (negative base
    /// with a non-integral exponent) or where it has a pole (zero base with
    /// a negative exponent).
    pub fn powf(self, exponent: Real) -> Result<Real, DomainError> {
        let (base, exp) = (self.0, exponent.0);
        if base.is_nan() || exp.is_nan() {
            return Ok(Real(base.powf(exp)));
        }
        if base < 0.0 && exp.is_finite() && exp.fract() != 0.0 {
            return Err(DomainError::new(
                "powf",
                DomainReason::Negative,
                format_args!("{self}^{exponent}"),
            ));
        }
        if base == 0.0 && exp < 0.0 {
            return Err(DomainError::new(
                "powf",
                DomainReason::Singularity,
                format_args!("{self}^{exponent}"),
            ));
        }
        Ok(Real(base.powf(exp)))
    }

    // ---- trigonometric ----

    pub fn sin(self) -> Real {
        Real(self.0.sin())
    }

    pub fn cos(self) -> Real {
        Real(self.0.cos())
    }

    pub fn tan(self) -> Real {
        Real(self.0.tan())
    }

    pub fn sin_cos(self) -> (Real, Real) {
        let (s, c) = self.0.sin_cos();
        (Real(s), Real(c))
    }

    pub fn asin(self) -> Result<Real, DomainError> {
        self.guarded("asin", (-1.0..=1.0).contains(&self.0), UNIT_INTERVAL, f64::asin)
    }

    pub fn acos(self) -> Result<Real, DomainError> {
        self.guarded("acos", (-1.0..=1.0).contains(&self.0), UNIT_INTERVAL, f64::acos)
    }

    pub fn atan(self) -> Real {
        Real(self.0.atan())
    }

    /// Four-quadrant arctangent of `self / x`, in `(-π, π]`.
    pub fn atan2(self, x: Real) -> Real {
        Real(self.0.atan2(x.0))
    }

    // ---- hyperbolic ----

    pub fn sinh(self) -> Real {
        Real(self.0.sinh())
    }

    pub fn cosh(self) -> Real {
        Real(self.0.cosh())
    }

    pub fn tanh(self) -> Real {
        Real(self.0.tanh())
    }

    pub fn asinh(self) -> Real {
        Real(self.0.asinh())
    }

    pub fn acosh(self) -> Result<Real, DomainError> {
        self.guarded(
            "acosh",
            self.0 >= 1.0,
            DomainReason::OutOfRange {
                lower: 1.0,
                upper: f64::INFINITY,
                closed: true,
            },
            f64::acosh,
        )
    }

    pub fn atanh(self) -> Result<Real, DomainError> {
        self.guarded(
            "atanh",
            self.0 > -1.0 && self.0 < 1.0,
            DomainReason::OutOfRange {
                lower: -1.0,
                upper: 1.0,
                closed: false,
            },
            f64::atanh,
        )
    }

    // ---- complex promotion ----

    pub fn sqrt_complex(self) -> Complex {
        if self.0 < 0.0 {
            Complex::new(0.0, (-self.0).sqrt())
        } else {
            Complex::new(self.0.sqrt(), 0.0)
        }
    }

    /// Principal logarithm; negative inputs get an imaginary part of `π`
    /// and zero maps to `-∞`.
    pub fn ln_complex(self) -> Complex {
        if self.0 == 0.0 {
            return Complex::new(f64::NEG_INFINITY, 0.0);
        }
        promote(self, Complex64::ln)
    }

    pub fn asin_complex(self) -> Complex {
        promote(self, Complex64::asin)
    }

    pub fn acos_complex(self) -> Complex {
        promote(self, Complex64::acos)
    }

    pub fn acosh_complex(self) -> Complex {
        promote(self, Complex64::acosh)
    }

    pub fn atanh_complex(self) -> Complex {
        promote(self, Complex64::atanh)
    }

    pub fn powf_complex(self, exponent: Real) -> Complex {
        if self.0 >= 0.0 || self.0.is_nan() {
            return Complex::new(self.0.powf(exponent.0), 0.0);
        }
        promote(self, |z| z.powf(exponent.0))
    }
}

/// Rounds `x` at the `10^-power` place. Negative powers divide by an exact
/// power of ten instead of multiplying by an inexact one.
fn round_scaled(x: f64, power: i32) -> f64 {
    let factor = 10f64.powi(power.saturating_abs());
    if !factor.is_finite() {
        // Saturated scale: rounding has no effect.
        return if power > 0 { x } else { 0.0f64.copysign(x) };
    }
    if power >= 0 {
        let scaled = x * factor;
        if !scaled.is_finite() {
            return x;
        }
        scaled.round() / factor
    } else {
        (x / factor).round() * factor
    }
}

/// Evaluates `f` at `x + 0i`, zeroing imaginary noise below
/// [`DEFAULT_TOLERANCE`].
fn promote(x: Real, f: impl FnOnce(Complex64) -> Complex64) -> Complex {
    let out = f(Complex64::new(x.0, 0.0));
    let im = if out.im.abs() < DEFAULT_TOLERANCE {
        0.0
    } else {
        out.im
    };
    Complex::new(out.re, im)
}

// ---- conversions ----

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Real(value)
    }
}

impl From<f32> for Real {
    fn from(value: f32) -> Self {
        Real(value as f64)
    }
}

impl From<i32> for Real {
    fn from(value: i32) -> Self {
        Real(value as f64)
    }
}

impl From<u32> for Real {
    fn from(value: u32) -> Self {
        Real(value as f64)
    }
}

impl From<Real> for f64 {
    fn from(value: Real) -> Self {
        value.0
    }
}

macro_rules! try_into_integer {
    ($($int:ty => $name:literal, $lower:expr, $upper:expr;)+) => {$(
        impl TryFrom<Real> for $int {
            type Error = ConversionError;

            fn try_from(value: Real) -> Result<Self, Self::Error> {
                let x = value.0;
                let kind = if !x.is_finite() {
                    Some(ConversionErrorKind::NotFinite)
                } else if x.fract() != 0.0 {
                    Some(ConversionErrorKind::NotIntegral)
                } else if x < $lower || x >= $upper {
                    Some(ConversionErrorKind::OutOfRange)
                } else {
                    None
                };
                match kind {
                    Some(kind) => Err(ConversionError::new("Real", $name, kind, value)),
                    None => Ok(x as $int),
                }
            }
        }
    )+};
}

// Upper bounds are exclusive powers of two, exactly representable in f64.
try_into_integer! {
    i64 => "i64", -9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0;
    i32 => "i32", -2_147_483_648.0, 2_147_483_648.0;
    u64 => "u64", 0.0, 18_446_744_073_709_551_616.0;
}

impl FromStr for Real {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let named = match body.to_ascii_lowercase().as_str() {
            "pi" | "π" => Some(std::f64::consts::PI),
            "tau" | "τ" => Some(std::f64::consts::TAU),
            "e" => Some(std::f64::consts::E),
            _ => None,
        };
        if let Some(value) = named {
            return Ok(Real(if negative { -value } else { value }));
        }
        text.parse::<f64>()
            .map(Real)
            .map_err(|_| ConversionError::new("str", "Real", ConversionErrorKind::Parse, s))
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_with(self.0, f.precision()))
    }
}

// ---- operators ----

macro_rules! real_binop {
    ($($trait:ident $method:ident $assign_trait:ident $assign_method:ident $op:tt;)+) => {$(
        impl $trait for Real {
            type Output = Real;
            #[inline]
            fn $method(self, rhs: Real) -> Real {
                Real(self.0 $op rhs.0)
            }
        }

        impl $trait<f64> for Real {
            type Output = Real;
            #[inline]
            fn $method(self, rhs: f64) -> Real {
                Real(self.0 $op rhs)
            }
        }

        impl $trait<Real> for f64 {
            type Output = Real;
            #[inline]
            fn $method(self, rhs: Real) -> Real {
                Real(self $op rhs.0)
            }
        }

        impl $assign_trait for Real {
            #[inline]
            fn $assign_method(&mut self, rhs: Real) {
                self.0 = self.0 $op rhs.0;
            }
        }

        impl $assign_trait<f64> for Real {
            #[inline]
            fn $assign_method(&mut self, rhs: f64) {
                self.0 = self.0 $op rhs;
            }
        }
    )+};
}

real_binop! {
    Add add AddAssign add_assign +;
    Sub sub SubAssign sub_assign -;
    Mul mul MulAssign mul_assign *;
    Div div DivAssign div_assign /;
    Rem rem RemAssign rem_assign %;
}

impl Neg for Real {
    type Output = Real;
    #[inline]
    fn neg(self) -> Real {
        Real(-self.0)
    }
}

impl PartialEq<f64> for Real {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Real {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl Sum for Real {
    fn sum<I: Iterator<Item = Real>>(iter: I) -> Real {
        iter.fold(Real::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Real> for Real {
    fn sum<I: Iterator<Item = &'a Real>>(iter: I) -> Real {
        iter.copied().sum()
    }
}

impl Product for Real {
    fn product<I: Iterator<Item = Real>>(iter: I) -> Real {
        iter.fold(Real::ONE, Mul::mul)
    }
}
