//! Error values returned by `hebrides` operations.
//!
//! Operations that are not defined for every input return a [`DomainError`];
//! conversions that cannot represent a value in the requested form return a
//! [`ConversionError`]. Linear algebra reports shape mismatches with a
//! [`DimensionError`]. [`MathError`] is the union used wherever more than one
//! kind can surface, such as the operation registry.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Why an input falls outside the domain of an operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainReason {
    /// The input must lie between `lower` and `upper`; `closed` tells whether
    /// the bounds themselves are admissible.
    OutOfRange { lower: f64, upper: f64, closed: bool },
    /// The input must be strictly positive.
    NonPositive,
    /// The input must not be negative.
    Negative,
    /// The function is singular at the input.
    Singularity,
    /// Division by zero.
    ZeroDivisor,
    /// A logarithm base must be positive and different from one.
    InvalidBase,
    /// A parameter of the operation is unusable, e.g. zero significant digits.
    InvalidArgument(&'static str),
}

impl fmt::Display for DomainReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainReason::OutOfRange {
                lower,
                upper,
                closed,
            } => {
                let (open, close) = if *closed { ('[', ']') } else { ('(', ')') };
                write!(
                    f,
                    "expected a value in {open}{}, {}{close}",
                    crate::format::format_short_g(*lower),
                    crate::format::format_short_g(*upper)
                )
            }
            DomainReason::NonPositive => f.write_str("expected a positive value"),
            DomainReason::Negative => f.write_str("expected a non-negative value"),
            DomainReason::Singularity => f.write_str("the function is singular here"),
            DomainReason::ZeroDivisor => f.write_str("division by zero"),
            DomainReason::InvalidBase => {
                f.write_str("logarithm base must be positive and not equal to 1")
            }
            DomainReason::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
        }
    }
}

/// An operation was evaluated outside the set of inputs where it is defined.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{operation}: {reason} (got {input})")]
#[diagnostic(code(hebrides::domain))]
pub struct DomainError {
    operation: &'static str,
    input: String,
    reason: DomainReason,
}

impl DomainError {
    pub fn new(operation: &'static str, reason: DomainReason, input: impl fmt::Display) -> Self {
        let error = DomainError {
            operation,
            input: input.to_string(),
            reason,
        };
        log::debug!(target: "hebrides::domain", "{error}");
        error
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reason(&self) -> DomainReason {
        self.reason
    }

    pub fn identifier(&self) -> String {
        format!("hebrides:domain:{}", self.operation)
    }
}

/// What went wrong in a failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    NonZeroImaginary,
    NotFinite,
    NotIntegral,
    OutOfRange,
    /// The target value does not exist, e.g. the direction of zero.
    Undefined,
    Parse,
    /// The value has the wrong kind, e.g. an angle where a real is expected.
    Incompatible,
}

impl fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConversionErrorKind::NonZeroImaginary => "imaginary part is not zero",
            ConversionErrorKind::NotFinite => "value is not finite",
            ConversionErrorKind::NotIntegral => "value is not an integer",
            ConversionErrorKind::OutOfRange => "value is out of range",
            ConversionErrorKind::Undefined => "result is undefined",
            ConversionErrorKind::Parse => "invalid syntax",
            ConversionErrorKind::Incompatible => "incompatible kind",
        };
        f.write_str(text)
    }
}

/// A value cannot be represented in the requested type or form.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("cannot convert {from_type} `{input}` to {to_type}: {kind}")]
#[diagnostic(code(hebrides::conversion))]
pub struct ConversionError {
    from_type: &'static str,
    to_type: &'static str,
    input: String,
    kind: ConversionErrorKind,
}

impl ConversionError {
    pub fn new(
        from_type: &'static str,
        to_type: &'static str,
        kind: ConversionErrorKind,
        input: impl fmt::Display,
    ) -> Self {
        let err = ConversionError {
            from_type,
            to_type,
            input: input.to_string(),
            kind,
        };
        log::debug!(target: "hebrides::conversion", "{err}");
        err
    }

    pub fn from_type(&self) -> &'static str {
        self.from_type
    }

    pub fn to_type(&self) -> &'static str {
        self.to_type
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> ConversionErrorKind {
        self.kind
    }

    pub fn identifier(&self) -> String {
        format!("hebrides:conversion:{}", self.to_type.to_ascii_lowercase())
    }
}

/// Operand shapes do not fit together.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{operation}: dimension mismatch (expected {expected:?}, found {found:?})")]
#[diagnostic(code(hebrides::dimension))]
pub struct DimensionError {
    operation: &'static str,
    expected: Vec<usize>,
    found: Vec<usize>,
}

impl DimensionError {
    pub fn new(operation: &'static str, expected: Vec<usize>, found: Vec<usize>) -> Self {
        let err = DimensionError {
            operation,
            expected,
            found,
        };
        log::debug!(target: "hebrides::dimension", "{err}");
        err
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn expected(&self) -> &[usize] {
        &self.expected
    }

    pub fn found(&self) -> &[usize] {
        &self.found
    }
}

/// Any error a `hebrides` operation can produce.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum MathError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Dimension(#[from] DimensionError),
    #[error("{operation}: expected {expected} argument(s), got {found}")]
    #[diagnostic(code(hebrides::arity))]
    Arity {
        operation: String,
        expected: usize,
        found: usize,
    },
    #[error("unknown operation `{name}` for {receiver}")]
    #[diagnostic(code(hebrides::unknown_operation))]
    UnknownOperation { name: String, receiver: String },
}

pub type MathResult<T> = Result<T, MathError>;

impl MathError {
    pub fn identifier(&self) -> String {
        match self {
            MathError::Domain(err) => err.identifier(),
            MathError::Conversion(err) => err.identifier(),
            MathError::Dimension(err) => format!("hebrides:dimension:{}", err.operation),
            MathError::Arity { operation, .. } => format!("hebrides:arity:{operation}"),
            MathError::UnknownOperation { .. } => "hebrides:unknown_operation".to_string(),
        }
    }

    /// Multi-line report suitable for terminals.
    pub fn format_diagnostic(&self) -> String {
        let mut lines = vec![format!("error: {self}"), format!("id: {}", self.identifier())];
        match self {
            MathError::Domain(err) => {
                lines.push(format!("operation: {}", err.operation));
                lines.push(format!("input: {}", err.input));
            }
            MathError::Conversion(err) => {
                lines.push(format!("conversion: {} -> {}", err.from_type, err.to_type));
                lines.push(format!("input: {}", err.input));
            }
            MathError::Dimension(err) => {
                lines.push(format!("operation: {}", err.operation));
            }
            MathError::Arity { operation, .. } => {
                lines.push(format!("operation: {operation}"));
            }
            MathError::UnknownOperation { receiver, .. } => {
                lines.push(format!("receiver: {receiver}"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_message_names_operation_and_bounds() {
        let err = DomainError::new(
            "asin",
            DomainReason::OutOfRange {
                lower: -1.0,
                upper: 1.0,
                closed: true,
            },
            2.5,
        );
        assert_eq!(err.to_string(), "asin: expected a value in [-1, 1] (got 2.5)");
        assert_eq!(err.identifier(), "hebrides:domain:asin");
        assert_eq!(err.input(), "2.5");
    }

    #[test]
    fn open_interval_uses_parentheses() {
        let reason = DomainReason::OutOfRange {
            lower: -1.0,
            upper: 1.0,
            closed: false,
        };
        assert_eq!(reason.to_string(), "expected a value in (-1, 1)");
    }

    #[test]
    fn conversion_error_message() {
        let err = ConversionError::new(
            "Complex",
            "Real",
            ConversionErrorKind::NonZeroImaginary,
            "1 + 2i",
        );
        assert_eq!(
            err.to_string(),
            "cannot convert Complex `1 + 2i` to Real: imaginary part is not zero"
        );
        assert_eq!(err.identifier(), "hebrides:conversion:real");
    }

    #[test]
    fn math_error_wraps_and_reports() {
        let err: MathError = DomainError::new("ln", DomainReason::NonPositive, 0).into();
        assert_eq!(err.identifier(), "hebrides:domain:ln");
        let report = err.format_diagnostic();
        assert!(report.starts_with("error: ln: expected a positive value"));
        assert!(report.contains("id: hebrides:domain:ln"));
        assert!(report.contains("input: 0"));
    }

    #[test]
    fn dimension_error_lists_shapes() {
        let err = DimensionError::new("dot", vec![3], vec![2]);
        assert_eq!(
            err.to_string(),
            "dot: dimension mismatch (expected [3], found [2])"
        );
    }
}
