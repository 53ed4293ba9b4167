//! Catalogue of named scalar operations.
//!
//! Every operation is registered at link time with [`inventory`] and can be
//! looked up by receiver kind and name, or invoked through [`call`], which
//! dispatches on the kind of the first argument.

use std::fmt;
use std::str::FromStr;

pub use inventory;

use crate::elem::{display_in, Angle, AngleUnit, Complex, Real};
use crate::error::{ConversionError, ConversionErrorKind, MathError, MathResult};

/// The kind of a [`Value`], which is also the receiver of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Real,
    Complex,
    Angle,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Real => "Real",
            ValueKind::Complex => "Complex",
            ValueKind::Angle => "Angle",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Ok(ValueKind::Real),
            "complex" => Ok(ValueKind::Complex),
            "angle" => Ok(ValueKind::Angle),
            _ => Err(ConversionError::new(
                "str",
                "ValueKind",
                ConversionErrorKind::Parse,
                s,
            )),
        }
    }
}

/// Broad grouping used when listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Arithmetic,
    Exponential,
    Trigonometric,
    Hyperbolic,
    Rounding,
    Sign,
    Conversion,
    Complex,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Arithmetic => "arithmetic",
            Category::Exponential => "exponential",
            Category::Trigonometric => "trigonometric",
            Category::Hyperbolic => "hyperbolic",
            Category::Rounding => "rounding",
            Category::Sign => "sign",
            Category::Conversion => "conversion",
            Category::Complex => "complex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        [
            Category::Arithmetic,
            Category::Exponential,
            Category::Trigonometric,
            Category::Hyperbolic,
            Category::Rounding,
            Category::Sign,
            Category::Conversion,
            Category::Complex,
        ]
        .into_iter()
        .find(|c| c.name() == lower)
        .ok_or_else(|| ConversionError::new("str", "Category", ConversionErrorKind::Parse, s))
    }
}

/// A scalar argument or result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Real(Real),
    Complex(Complex),
    Angle(Angle),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Real(_) => ValueKind::Real,
            Value::Complex(_) => ValueKind::Complex,
            Value::Angle(_) => ValueKind::Angle,
        }
    }

    /// Sets reals and complex parts smaller than `tolerance` to zero.
    /// Angles are left alone.
    pub fn chop(self, tolerance: f64) -> Value {
        match self {
            Value::Real(x) => Value::Real(x.chop(tolerance)),
            Value::Complex(z) => Value::Complex(z.chop(tolerance)),
            Value::Angle(a) => Value::Angle(a),
        }
    }

    /// Text form with fixed decimals when `precision` is set; angles are
    /// shown in `unit`.
    pub fn render(&self, precision: Option<usize>, unit: AngleUnit) -> String {
        match (self, precision) {
            (Value::Angle(a), _) => display_in(*a, unit, precision),
            (Value::Real(x), Some(p)) => format!("{x:.p$}"),
            (Value::Complex(z), Some(p)) => format!("{z:.p$}"),
            (Value::Real(x), None) => x.to_string(),
            (Value::Complex(z), None) => z.to_string(),
        }
    }
}

impl From<Real> for Value {
    fn from(x: Real) -> Self {
        Value::Real(x)
    }
}

impl From<Complex> for Value {
    fn from(z: Complex) -> Self {
        Value::Complex(z)
    }
}

impl From<Angle> for Value {
    fn from(a: Angle) -> Self {
        Value::Angle(a)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(x) => fmt::Display::fmt(x, f),
            Value::Complex(z) => fmt::Display::fmt(z, f),
            Value::Angle(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl FromStr for Value {
    type Err = ConversionError;

    /// Reals first (`2.5`, `-pi`), then complexes (`1-2i`, `3j`), then
    /// angles with a unit suffix (`30deg`, `1.2 rad`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(x) = s.parse::<Real>() {
            return Ok(Value::Real(x));
        }
        let text = s.trim();
        if text.ends_with(&['i', 'j'][..]) {
            if let Ok(z) = text.parse::<Complex>() {
                return Ok(Value::Complex(z));
            }
        }
        text.parse::<Angle>()
            .map(Value::Angle)
            .map_err(|_| ConversionError::new("str", "Value", ConversionErrorKind::Parse, s))
    }
}

/// A registered operation.
#[derive(Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub receiver: ValueKind,
    pub category: Category,
    pub summary: &'static str,
    pub arity: usize,
    pub eval: fn(&[Value]) -> MathResult<Value>,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("receiver", &self.receiver)
            .field("category", &self.category)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl Operation {
    /// Checks the argument count, then evaluates.
    pub fn invoke(&self, args: &[Value]) -> MathResult<Value> {
        if args.len() != self.arity {
            return Err(arity_error(self.name, self.arity, args.len()));
        }
        log::trace!(
            target: "hebrides::registry",
            "{}::{} on {} argument(s)",
            self.receiver,
            self.name,
            args.len()
        );
        (self.eval)(args)
    }
}

inventory::collect!(Operation);

/// All operations, ordered by receiver then name.
pub fn operations() -> Vec<&'static Operation> {
    let mut ops: Vec<_> = inventory::iter::<Operation>().collect();
    ops.sort_by(|a, b| (a.receiver, a.name).cmp(&(b.receiver, b.name)));
    ops
}

pub fn operations_for(kind: ValueKind) -> Vec<&'static Operation> {
    operations()
        .into_iter()
        .filter(|op| op.receiver == kind)
        .collect()
}

pub fn find_operation(kind: ValueKind, name: &str) -> Option<&'static Operation> {
    inventory::iter::<Operation>().find(|op| op.receiver == kind && op.name == name)
}

/// Invokes `name` on the receiver kind of the first argument.
///
/// A real receiver is promoted to complex when any argument is complex, or
/// when only the complex receiver has `name`. Real arguments are promoted
/// along with it, so `add(1, 2i)` and `add(2i, 1)` agree.
pub fn call(name: &str, args: &[Value]) -> MathResult<Value> {
    let Some(first) = args.first() else {
        return match inventory::iter::<Operation>().find(|op| op.name == name) {
            Some(op) => Err(arity_error(op.name, op.arity, 0)),
            None => Err(unknown(name, "no arguments")),
        };
    };
    let kind = first.kind();
    let has_complex = args.iter().any(|v| v.kind() == ValueKind::Complex);
    if kind == ValueKind::Real && has_complex {
        if let Some(op) = find_operation(ValueKind::Complex, name) {
            return op.invoke(&promote_reals(args));
        }
    }
    if let Some(op) = find_operation(kind, name) {
        return op.invoke(args);
    }
    if kind == ValueKind::Real {
        if let Some(op) = find_operation(ValueKind::Complex, name) {
            return op.invoke(&promote_reals(args));
        }
    }
    Err(unknown(name, kind.name()))
}

fn promote_reals(args: &[Value]) -> Vec<Value> {
    args.iter()
        .map(|v| match v {
            Value::Real(x) => Value::Complex(Complex::from(*x)),
            other => *other,
        })
        .collect()
}

fn arity_error(operation: &str, expected: usize, found: usize) -> MathError {
    MathError::Arity {
        operation: operation.to_string(),
        expected,
        found,
    }
}

fn unknown(name: &str, receiver: &str) -> MathError {
    MathError::UnknownOperation {
        name: name.to_string(),
        receiver: receiver.to_string(),
    }
}

// ---- argument coercion ----

fn incompatible(value: &Value, to: &'static str) -> ConversionError {
    ConversionError::new(
        value.kind().name(),
        to,
        ConversionErrorKind::Incompatible,
        value,
    )
}

fn real(value: &Value) -> Result<Real, ConversionError> {
    match value {
        Value::Real(x) => Ok(*x),
        Value::Complex(z) => Real::try_from(*z),
        Value::Angle(_) => Err(incompatible(value, "Real")),
    }
}

fn complex(value: &Value) -> Result<Complex, ConversionError> {
    match value {
        Value::Real(x) => Ok(Complex::from(*x)),
        Value::Complex(z) => Ok(*z),
        Value::Angle(_) => Err(incompatible(value, "Complex")),
    }
}

/// Bare reals count as radians.
fn angle(value: &Value) -> Result<Angle, ConversionError> {
    match value {
        Value::Angle(a) => Ok(*a),
        Value::Real(x) => Ok(Angle::from(*x)),
        Value::Complex(_) => Err(incompatible(value, "Angle")),
    }
}

fn int(value: &Value) -> Result<i32, ConversionError> {
    i32::try_from(real(value)?)
}

fn count(value: &Value) -> Result<u32, ConversionError> {
    let n = int(value)?;
    u32::try_from(n)
        .map_err(|_| ConversionError::new("Real", "u32", ConversionErrorKind::OutOfRange, n))
}

trait Outcome {
    fn into_value(self) -> MathResult<Value>;
}

macro_rules! plain_outcome {
    ($($ty:ty),+) => {$(
        impl Outcome for $ty {
            fn into_value(self) -> MathResult<Value> {
                Ok(self.into())
            }
        }
    )+};
}

plain_outcome!(Real, Complex, Angle);

impl<T: Into<Value>, E: Into<MathError>> Outcome for Result<T, E> {
    fn into_value(self) -> MathResult<Value> {
        self.map(Into::into).map_err(Into::into)
    }
}

macro_rules! count_args {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count_args!($($tail)*) };
}

macro_rules! register {
    ($(
        $receiver:ident $name:literal [$category:ident] $summary:literal
            |$($arg:ident: $conv:ident),+| $body:expr;
    )+) => {$(
        inventory::submit! {
            Operation {
                name: $name,
                receiver: ValueKind::$receiver,
                category: Category::$category,
                summary: $summary,
                arity: count_args!($($arg)+),
                eval: |args: &[Value]| -> MathResult<Value> {
                    let [$($arg),+] = args else {
                        return Err(arity_error($name, count_args!($($arg)+), args.len()));
                    };
                    $(let $arg = $conv($arg)?;)+
                    Outcome::into_value($body)
                },
            }
        }
    )+};
}

register! {
    Real "add" [Arithmetic] "x + y" |x: real, y: real| x + y;
    Real "sub" [Arithmetic] "x - y" |x: real, y: real| x - y;
    Real "mul" [Arithmetic] "x * y" |x: real, y: real| x * y;
    Real "div" [Arithmetic] "x / y, failing on a zero divisor" |x: real, y: real| x.checked_div(y);
    Real "rem_euclid" [Arithmetic] "least non-negative remainder" |x: real, y: real| x.rem_euclid(y);
    Real "neg" [Arithmetic] "-x" |x: real| -x;
    Real "recip" [Arithmetic] "1 / x, failing at zero" |x: real| x.recip_checked();
    Real "hypot" [Arithmetic] "sqrt(x² + y²) without overflow" |x: real, y: real| x.hypot(y);
    Real "mul_add" [Arithmetic] "x * a + b with one rounding" |x: real, a: real, b: real| x.mul_add(a, b);
    Real "min" [Arithmetic] "smaller of x and y" |x: real, y: real| x.min(y);
    Real "max" [Arithmetic] "larger of x and y" |x: real, y: real| x.max(y);

    Real "exp" [Exponential] "e^x" |x: real| x.exp();
    Real "exp2" [Exponential] "2^x" |x: real| x.exp2();
    Real "exp_m1" [Exponential] "e^x - 1, accurate near zero" |x: real| x.exp_m1();
    Real "ln" [Exponential] "natural logarithm, x > 0" |x: real| x.ln();
    Real "log2" [Exponential] "base-2 logarithm, x > 0" |x: real| x.log2();
    Real "log10" [Exponential] "base-10 logarithm, x > 0" |x: real| x.log10();
    Real "log" [Exponential] "logarithm in an arbitrary base" |x: real, base: real| x.log(base);
    Real "ln_1p" [Exponential] "ln(1 + x), x > -1" |x: real| x.ln_1p();
    Real "sqrt" [Exponential] "square root, x >= 0" |x: real| x.sqrt();
    Real "cbrt" [Exponential] "cube root" |x: real| x.cbrt();
    Real "powi" [Exponential] "x raised to an integer" |x: real, n: int| x.powi(n);
    Real "powf" [Exponential] "x raised to a real exponent" |x: real, y: real| x.powf(y);
    Real "sqrt_complex" [Exponential] "square root, complex for x < 0" |x: real| x.sqrt_complex();
    Real "ln_complex" [Exponential] "natural logarithm, complex for x < 0" |x: real| x.ln_complex();
    Real "powf_complex" [Exponential] "x^y, complex for a negative base" |x: real, y: real| x.powf_complex(y);

    Real "sin" [Trigonometric] "sine of x radians" |x: real| x.sin();
    Real "cos" [Trigonometric] "cosine of x radians" |x: real| x.cos();
    Real "tan" [Trigonometric] "tangent of x radians" |x: real| x.tan();
    Real "asin" [Trigonometric] "arcsine, x in [-1, 1]" |x: real| x.asin();
    Real "acos" [Trigonometric] "arccosine, x in [-1, 1]" |x: real| x.acos();
    Real "atan" [Trigonometric] "arctangent" |x: real| x.atan();
    Real "atan2" [Trigonometric] "angle of the point (x, y)" |y: real, x: real| y.atan2(x);
    Real "asin_complex" [Trigonometric] "arcsine, complex outside [-1, 1]" |x: real| x.asin_complex();
    Real "acos_complex" [Trigonometric] "arccosine, complex outside [-1, 1]" |x: real| x.acos_complex();

    Real "sinh" [Hyperbolic] "hyperbolic sine" |x: real| x.sinh();
    Real "cosh" [Hyperbolic] "hyperbolic cosine" |x: real| x.cosh();
    Real "tanh" [Hyperbolic] "hyperbolic tangent" |x: real| x.tanh();
    Real "asinh" [Hyperbolic] "inverse hyperbolic sine" |x: real| x.asinh();
    Real "acosh" [Hyperbolic] "inverse hyperbolic cosine, x >= 1" |x: real| x.acosh();
    Real "atanh" [Hyperbolic] "inverse hyperbolic tangent, x in (-1, 1)" |x: real| x.atanh();
    Real "acosh_complex" [Hyperbolic] "inverse hyperbolic cosine, complex for x < 1" |x: real| x.acosh_complex();
    Real "atanh_complex" [Hyperbolic] "inverse hyperbolic tangent, complex outside (-1, 1)" |x: real| x.atanh_complex();

    Real "floor" [Rounding] "largest integer <= x" |x: real| x.floor();
    Real "ceil" [Rounding] "smallest integer >= x" |x: real| x.ceil();
    Real "round" [Rounding] "nearest integer, ties away from zero" |x: real| x.round();
    Real "round_half_even" [Rounding] "nearest integer, ties to even" |x: real| x.round_half_even();
    Real "trunc" [Rounding] "integer part" |x: real| x.trunc();
    Real "fract" [Rounding] "fractional part" |x: real| x.fract();
    Real "round_to" [Rounding] "round to n decimal places" |x: real, n: int| x.round_to(n);
    Real "round_significant" [Rounding] "round to n significant digits" |x: real, n: count| x.round_significant(n);

    Real "abs" [Sign] "absolute value" |x: real| x.abs();
    Real "signum" [Sign] "-1, 0 or 1" |x: real| x.signum();
    Real "copysign" [Sign] "|x| with the sign of y" |x: real, y: real| x.copysign(y);

    Real "to_angle" [Conversion] "angle of x radians" |x: real| Angle::from(x);
    Real "from_degrees" [Conversion] "angle of x degrees" |x: real| Angle::from_degrees(x.value());
    Real "to_complex" [Conversion] "x + 0i" |x: real| Complex::from(x);

    Complex "add" [Arithmetic] "z + w" |z: complex, w: complex| z + w;
    Complex "sub" [Arithmetic] "z - w" |z: complex, w: complex| z - w;
    Complex "mul" [Arithmetic] "z * w" |z: complex, w: complex| z * w;
    Complex "div" [Arithmetic] "z / w, failing on a zero divisor" |z: complex, w: complex| z.checked_div(w);
    Complex "neg" [Arithmetic] "-z" |z: complex| -z;
    Complex "recip" [Arithmetic] "1 / z, failing at zero" |z: complex| z.recip_checked();

    Complex "conj" [Complex] "complex conjugate" |z: complex| z.conj();
    Complex "norm" [Complex] "modulus |z|" |z: complex| z.norm();
    Complex "norm_sqr" [Complex] "squared modulus" |z: complex| z.norm_sqr();
    Complex "arg" [Complex] "principal argument in (-π, π]" |z: complex| z.arg();
    Complex "re" [Complex] "real part" |z: complex| z.re();
    Complex "im" [Complex] "imaginary part" |z: complex| z.im();
    Complex "chop" [Complex] "zero out parts smaller than a tolerance" |z: complex, tol: real| z.chop(tol.value());

    Complex "exp" [Exponential] "e^z" |z: complex| z.exp();
    Complex "ln" [Exponential] "principal logarithm, z != 0" |z: complex| z.ln();
    Complex "log" [Exponential] "principal logarithm in a real base" |z: complex, base: real| z.log(base);
    Complex "log2" [Exponential] "base-2 principal logarithm" |z: complex| z.log2();
    Complex "log10" [Exponential] "base-10 principal logarithm" |z: complex| z.log10();
    Complex "sqrt" [Exponential] "principal square root" |z: complex| z.sqrt();
    Complex "cbrt" [Exponential] "principal cube root" |z: complex| z.cbrt();
    Complex "powi" [Exponential] "z raised to an integer" |z: complex, n: int| z.powi(n);
    Complex "powf" [Exponential] "z raised to a real exponent" |z: complex, y: real| z.powf(y);
    Complex "powc" [Exponential] "z raised to a complex exponent" |z: complex, w: complex| z.powc(w);

    Complex "sin" [Trigonometric] "complex sine" |z: complex| z.sin();
    Complex "cos" [Trigonometric] "complex cosine" |z: complex| z.cos();
    Complex "tan" [Trigonometric] "complex tangent" |z: complex| z.tan();
    Complex "asin" [Trigonometric] "principal arcsine" |z: complex| z.asin();
    Complex "acos" [Trigonometric] "principal arccosine" |z: complex| z.acos();
    Complex "atan" [Trigonometric] "principal arctangent, z != ±i" |z: complex| z.atan();

    Complex "sinh" [Hyperbolic] "complex hyperbolic sine" |z: complex| z.sinh();
    Complex "cosh" [Hyperbolic] "complex hyperbolic cosine" |z: complex| z.cosh();
    Complex "tanh" [Hyperbolic] "complex hyperbolic tangent" |z: complex| z.tanh();
    Complex "asinh" [Hyperbolic] "principal inverse hyperbolic sine" |z: complex| z.asinh();
    Complex "acosh" [Hyperbolic] "principal inverse hyperbolic cosine" |z: complex| z.acosh();
    Complex "atanh" [Hyperbolic] "principal inverse hyperbolic tangent, z != ±1" |z: complex| z.atanh();

    Complex "signum" [Sign] "z / |z|, zero at zero" |z: complex| z.signum();

    Complex "to_real" [Conversion] "real part when the imaginary part vanishes" |z: complex| Real::try_from(z);
    Complex "to_angle" [Conversion] "direction of a nonzero z" |z: complex| Angle::try_from(z);

    Angle "add" [Arithmetic] "a + b" |a: angle, b: angle| a + b;
    Angle "sub" [Arithmetic] "a - b" |a: angle, b: angle| a - b;
    Angle "neg" [Arithmetic] "-a" |a: angle| -a;
    Angle "scale" [Arithmetic] "a * k" |a: angle, k: real| a * k.value();
    Angle "ratio" [Arithmetic] "a / b as a real" |a: angle, b: angle| Real::new(a / b);

    Angle "sin" [Trigonometric] "sine" |a: angle| a.sin();
    Angle "cos" [Trigonometric] "cosine" |a: angle| a.cos();
    Angle "tan" [Trigonometric] "tangent" |a: angle| a.tan();

    Angle "radians" [Conversion] "measure in radians" |a: angle| Real::new(a.radians());
    Angle "degrees" [Conversion] "measure in degrees" |a: angle| Real::new(a.degrees());
    Angle "turns" [Conversion] "measure in turns" |a: angle| Real::new(a.turns());
    Angle "gradians" [Conversion] "measure in gradians" |a: angle| Real::new(a.gradians());
    Angle "normalized" [Conversion] "equivalent angle in (-π, π]" |a: angle| a.normalized();
    Angle "normalized_positive" [Conversion] "equivalent angle in [0, 2π)" |a: angle| a.normalized_positive();
    Angle "to_complex" [Conversion] "unit complex cos a + i sin a" |a: angle| a.to_complex();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_per_receiver() {
        let mut seen = HashSet::new();
        for op in operations() {
            assert!(
                seen.insert((op.receiver, op.name)),
                "duplicate {}::{}",
                op.receiver,
                op.name
            );
        }
        assert!(seen.len() > 50);
    }

    #[test]
    fn listing_is_sorted_and_filtered() {
        let reals = operations_for(ValueKind::Real);
        assert!(reals.iter().all(|op| op.receiver == ValueKind::Real));
        assert!(reals.windows(2).all(|w| w[0].name <= w[1].name));
        assert!(find_operation(ValueKind::Angle, "degrees").is_some());
        assert!(find_operation(ValueKind::Angle, "conj").is_none());
    }

    #[test]
    fn call_dispatches_on_first_argument() {
        let two = Value::Real(Real::new(2.0));
        assert_eq!(
            call("mul", &[two, two]).unwrap(),
            Value::Real(Real::new(4.0))
        );
        let i = Value::Complex(Complex::I);
        assert_eq!(
            call("mul", &[i, i]).unwrap(),
            Value::Complex(Complex::new(-1.0, 0.0))
        );
        let right = Value::Angle(Angle::RIGHT);
        assert_eq!(call("degrees", &[right]).unwrap(), Value::Real(Real::new(90.0)));
    }

    #[test]
    fn real_receiver_falls_back_to_complex() {
        let v = call("conj", &[Value::Real(Real::new(3.0))]).unwrap();
        assert_eq!(v, Value::Complex(Complex::new(3.0, 0.0)));
    }

    #[test]
    fn domain_errors_surface() {
        let err = call("ln", &[Value::Real(Real::ZERO)]).unwrap_err();
        assert!(matches!(err, MathError::Domain(_)));
        assert_eq!(err.identifier(), "hebrides:domain:ln");
    }

    #[test]
    fn wrong_argument_count() {
        let err = call("atan2", &[Value::Real(Real::ONE)]).unwrap_err();
        assert_eq!(
            err,
            MathError::Arity {
                operation: "atan2".into(),
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(call("sin", &[]), Err(MathError::Arity { .. })));
    }

    #[test]
    fn unknown_operation() {
        let err = call("frobnicate", &[Value::Angle(Angle::ZERO)]).unwrap_err();
        assert!(matches!(err, MathError::UnknownOperation { .. }));
        assert_eq!(err.to_string(), "unknown operation `frobnicate` for Angle");
    }

    #[test]
    fn receiver_mismatch_is_a_conversion_error() {
        let op = find_operation(ValueKind::Real, "sqrt").unwrap();
        let err = op.invoke(&[Value::Angle(Angle::RIGHT)]).unwrap_err();
        match err {
            MathError::Conversion(e) => assert_eq!(e.kind(), ConversionErrorKind::Incompatible),
            other => panic!("unexpected {other:?}"),
        }
        let op = find_operation(ValueKind::Real, "powi").unwrap();
        let half = Value::Real(Real::new(0.5));
        assert!(matches!(
            op.invoke(&[half, half]),
            Err(MathError::Conversion(_))
        ));
    }

    #[test]
    fn values_parse_by_shape() {
        assert_eq!("2.5".parse::<Value>().unwrap().kind(), ValueKind::Real);
        assert_eq!("pi".parse::<Value>().unwrap().kind(), ValueKind::Real);
        assert_eq!("1-2i".parse::<Value>().unwrap().kind(), ValueKind::Complex);
        assert_eq!("30deg".parse::<Value>().unwrap().kind(), ValueKind::Angle);
        assert!("banana".parse::<Value>().is_err());
    }

    #[test]
    fn render_respects_precision_and_unit() {
        let v = Value::Angle(Angle::STRAIGHT);
        assert_eq!(v.render(None, AngleUnit::Degrees), "180°");
        assert_eq!(Value::Real(Real::PI).render(Some(2), AngleUnit::Radians), "3.14");
        assert_eq!(
            Value::Complex(Complex::new(1e-15, 2.0)).chop(1e-12).to_string(),
            "0 + 2i"
        );
    }

    #[test]
    fn category_and_kind_names_round_trip() {
        assert_eq!("Trigonometric".parse::<Category>().unwrap(), Category::Trigonometric);
        assert_eq!("angle".parse::<ValueKind>().unwrap(), ValueKind::Angle);
        assert!("quaternion".parse::<ValueKind>().is_err());
    }
}
