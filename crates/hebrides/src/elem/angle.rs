//! `Angle`: an angular measure stored in radians.
//!
//! Degrees, turns and gradians are views computed on demand, so converting
//! back and forth never accumulates more than one rounding. Comparison works
//! on the raw radian value; use [`Angle::normalized`] or
//! [`Angle::same_direction`] when a full turn should not matter.

use std::cmp::Ordering;
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::elem::{Complex, Real};
use crate::error::{ConversionError, ConversionErrorKind, DomainError};
use crate::format;

/// Unit in which an angle is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
    Turns,
    Gradians,
}

impl AngleUnit {
    /// How many of this unit make up a full turn.
    pub fn per_turn(self) -> f64 {
        match self {
            AngleUnit::Radians => TAU,
            AngleUnit::Degrees => 360.0,
            AngleUnit::Turns => 1.0,
            AngleUnit::Gradians => 400.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            AngleUnit::Radians => "rad",
            AngleUnit::Degrees => "°",
            AngleUnit::Turns => "turn",
            AngleUnit::Gradians => "grad",
        }
    }
}

impl FromStr for AngleUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rad" | "rads" | "radian" | "radians" => Ok(AngleUnit::Radians),
            "deg" | "degs" | "degree" | "degrees" | "°" => Ok(AngleUnit::Degrees),
            "turn" | "turns" | "rev" | "revolutions" => Ok(AngleUnit::Turns),
            "grad" | "grads" | "gon" | "gradian" | "gradians" => Ok(AngleUnit::Gradians),
            _ => Err(ConversionError::new(
                "str",
                "AngleUnit",
                ConversionErrorKind::Parse,
                s,
            )),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AngleUnit::Radians => "radians",
            AngleUnit::Degrees => "degrees",
            AngleUnit::Turns => "turns",
            AngleUnit::Gradians => "gradians",
        };
        f.write_str(name)
    }
}

/// An angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const RIGHT: Angle = Angle(std::f64::consts::FRAC_PI_2);
    pub const STRAIGHT: Angle = Angle(PI);
    pub const FULL: Angle = Angle(TAU);

    pub const fn from_radians(radians: f64) -> Self {
        Angle(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Angle(degrees.to_radians())
    }

    pub fn from_turns(turns: f64) -> Self {
        Angle(turns * TAU)
    }

    pub fn from_gradians(gradians: f64) -> Self {
        Angle(gradians * (PI / 200.0))
    }

    pub fn new(value: f64, unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Radians => Angle::from_radians(value),
            AngleUnit::Degrees => Angle::from_degrees(value),
            AngleUnit::Turns => Angle::from_turns(value),
            AngleUnit::Gradians => Angle::from_gradians(value),
        }
    }

    pub const fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn turns(self) -> f64 {
        self.0 / TAU
    }

    pub fn gradians(self) -> f64 {
        self.0 * (200.0 / PI)
    }

    pub fn to_unit(self, unit: AngleUnit) -> f64 {
        match unit {
            AngleUnit::Radians => self.radians(),
            AngleUnit::Degrees => self.degrees(),
            AngleUnit::Turns => self.turns(),
            AngleUnit::Gradians => self.gradians(),
        }
    }

    /// The equivalent angle in `(-π, π]`.
    pub fn normalized(self) -> Angle {
        if !self.0.is_finite() {
            return self;
        }
        let mut r = self.0.rem_euclid(TAU);
        if r > PI {
            r -= TAU;
        }
        Angle(r)
    }

    /// The equivalent angle in `[0, 2π)`.
    pub fn normalized_positive(self) -> Angle {
        if !self.0.is_finite() {
            return self;
        }
        let r = self.0.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        Angle(if r >= TAU { 0.0 } else { r })
    }

    pub fn is_normalized(self) -> bool {
        self.0 > -PI && self.0 <= PI
    }

    // ---- trigonometry ----

    pub fn sin(self) -> Real {
        Real::new(self.0.sin())
    }

    pub fn cos(self) -> Real {
        Real::new(self.0.cos())
    }

    pub fn tan(self) -> Real {
        Real::new(self.0.tan())
    }

    pub fn sin_cos(self) -> (Real, Real) {
        Real::new(self.0).sin_cos()
    }

    pub fn asin(x: Real) -> Result<Angle, DomainError> {
        x.asin().map(Angle::from)
    }

    pub fn acos(x: Real) -> Result<Angle, DomainError> {
        x.acos().map(Angle::from)
    }

    pub fn atan(x: Real) -> Angle {
        Angle::from(x.atan())
    }

    pub fn atan2(y: Real, x: Real) -> Angle {
        Angle::from(y.atan2(x))
    }

    /// The unit complex `cos θ + i sin θ`.
    pub fn to_complex(self) -> Complex {
        Complex::cis(self)
    }

    // ---- comparison ----

    pub fn approx_eq(self, other: Angle, tolerance: f64) -> bool {
        Real::new(self.0).approx_eq(Real::new(other.0), tolerance)
    }

    /// True when both angles point the same way, ignoring whole turns.
    pub fn same_direction(self, other: Angle, tolerance: f64) -> bool {
        let diff = (self - other).normalized().0.abs();
        diff <= tolerance
    }

    pub fn total_cmp(&self, other: &Angle) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    pub fn abs(self) -> Angle {
        Angle(self.0.abs())
    }
}

impl From<Real> for Angle {
    /// Interprets the real as radians.
    fn from(radians: Real) -> Self {
        Angle(radians.value())
    }
}

impl From<Angle> for Real {
    fn from(angle: Angle) -> Self {
        Real::new(angle.0)
    }
}

impl TryFrom<Complex> for Angle {
    type Error = ConversionError;

    /// The argument of a nonzero finite complex number.
    fn try_from(z: Complex) -> Result<Self, Self::Error> {
        if !z.is_finite() {
            return Err(ConversionError::new(
                "Complex",
                "Angle",
                ConversionErrorKind::NotFinite,
                z,
            ));
        }
        if z.is_zero() {
            return Err(ConversionError::new(
                "Complex",
                "Angle",
                ConversionErrorKind::Undefined,
                z,
            ));
        }
        Ok(z.arg())
    }
}

impl FromStr for Angle {
    type Err = ConversionError;

    /// Parses `<number><unit>` such as `30deg`, `1.5 rad`, `45°` or
    /// `0.25turn`. A bare number is taken as radians.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let split = text
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphabetic() || *c == '°')
            .last()
            .map(|(idx, _)| idx);
        let (number, unit) = match split {
            Some(idx) if idx > 0 => {
                let unit = text[idx..].parse::<AngleUnit>();
                match unit {
                    Ok(unit) => (text[..idx].trim_end(), unit),
                    // Not a unit: maybe a named constant such as `pi`
                    Err(_) => (text, AngleUnit::Radians),
                }
            }
            _ => (text, AngleUnit::Radians),
        };
        let value = number
            .parse::<Real>()
            .map_err(|_| ConversionError::new("str", "Angle", ConversionErrorKind::Parse, s))?;
        Ok(Angle::new(value.value(), unit))
    }
}

impl fmt::Display for Angle {
    /// Radians by default; the alternate flag (`{:#}`) prints degrees.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if f.alternate() {
            AngleUnit::Degrees
        } else {
            AngleUnit::Radians
        };
        write!(f, "{}", display_in(*self, unit, f.precision()))
    }
}

/// Renders `angle` in `unit`, using fixed decimals when `precision` is set.
pub fn display_in(angle: Angle, unit: AngleUnit, precision: Option<usize>) -> String {
    let value = format::format_with(angle.to_unit(unit), precision);
    match unit {
        AngleUnit::Degrees => format!("{value}{}", unit.suffix()),
        _ => format!("{value} {}", unit.suffix()),
    }
}

// ---- operators ----

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;
    fn mul(self, rhs: Angle) -> Angle {
        Angle(self * rhs.0)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl Div for Angle {
    type Output = f64;
    fn div(self, rhs: Angle) -> f64 {
        self.0 / rhs.0
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        self.0 -= rhs.0;
    }
}

impl MulAssign<f64> for Angle {
    fn mul_assign(&mut self, rhs: f64) {
        self.0 *= rhs;
    }
}

impl DivAssign<f64> for Angle {
    fn div_assign(&mut self, rhs: f64) {
        self.0 /= rhs;
    }
}

impl Sum for Angle {
    fn sum<I: Iterator<Item = Angle>>(iter: I) -> Angle {
        iter.fold(Angle::ZERO, Add::add)
    }
}
