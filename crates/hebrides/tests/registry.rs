// Registry end-to-end tests
use hebrides::registry::{self, Category, Value, ValueKind};
use hebrides::{Angle, Complex, MathError, Real};

fn parse_all(args: &[&str]) -> Vec<Value> {
    args.iter().map(|a| a.parse::<Value>().unwrap()).collect()
}

fn real(value: Value) -> Real {
    let Value::Real(x) = value else {
        panic!("expected real, got {value:?}");
    };
    x
}

fn complex(value: Value) -> Complex {
    let Value::Complex(z) = value else {
        panic!("expected complex, got {value:?}");
    };
    z
}

fn angle(value: Value) -> Angle {
    let Value::Angle(a) = value else {
        panic!("expected angle, got {value:?}");
    };
    a
}

#[test]
fn evaluates_parsed_arguments() {
    let out = registry::call("atan2", &parse_all(&["1", "1"])).unwrap();
    assert!((real(out).value() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);

    let out = registry::call("sin", &parse_all(&["30deg"])).unwrap();
    assert!((real(out).value() - 0.5).abs() < 1e-12);

    let out = registry::call("mul", &parse_all(&["1+2i", "3-i"])).unwrap();
    assert_eq!(out, Value::Complex(Complex::new(5.0, 5.0)));
}

#[test]
fn promotion_variants_return_complex() {
    let out = registry::call("sqrt_complex", &parse_all(&["-4"])).unwrap();
    assert!(complex(out).approx_eq(Complex::new(0.0, 2.0), 1e-12));
    let err = registry::call("sqrt", &parse_all(&["-4"])).unwrap_err();
    assert!(matches!(err, MathError::Domain(_)));
}

#[test]
fn real_receiver_with_complex_argument_is_promoted() {
    let out = registry::call("add", &parse_all(&["1", "2i"])).unwrap();
    assert_eq!(complex(out), Complex::new(1.0, 2.0));
    let out = registry::call("add", &parse_all(&["2i", "1"])).unwrap();
    assert_eq!(complex(out), Complex::new(1.0, 2.0));
    let out = registry::call("add", &parse_all(&["1", "2"])).unwrap();
    assert_eq!(real(out), Real::new(3.0));
}

#[test]
fn angle_conversions_through_registry() {
    let out = registry::call("to_angle", &parse_all(&["1+i"])).unwrap();
    assert!((angle(out).degrees() - 45.0).abs() < 1e-12);
    let err = registry::call("to_angle", &parse_all(&["0i"])).unwrap_err();
    assert_eq!(err.identifier(), "hebrides:conversion:angle");
    let out = registry::call("normalized", &[Value::Angle(Angle::from_degrees(450.0))]).unwrap();
    assert!((angle(out).degrees() - 90.0).abs() < 1e-12);
}

#[test]
fn argument_of_conjugated_negative_real_is_pi() {
    let conj = registry::call("conj", &parse_all(&["-1"])).unwrap();
    let arg = angle(registry::call("arg", &[conj]).unwrap());
    assert_eq!(arg.radians(), std::f64::consts::PI);
    assert!(arg.is_normalized());
}

#[test]
fn chopped_results_flush_real_noise() {
    let out = registry::call("sin", &[Value::Real(Real::PI)]).unwrap();
    assert_ne!(real(out), Real::ZERO);
    assert_eq!(out.chop(1e-12), Value::Real(Real::ZERO));
    assert_eq!(out.chop(1e-12).render(None, Default::default()), "0");
}

#[test]
fn rounding_with_integer_arguments() {
    let out = registry::call("round_to", &parse_all(&["2.71828", "2"])).unwrap();
    assert_eq!(out, Value::Real(Real::new(2.72)));
    let out = registry::call("round_significant", &parse_all(&["123456", "2"])).unwrap();
    assert_eq!(out, Value::Real(Real::new(120000.0)));
    assert!(registry::call("round_significant", &parse_all(&["1", "-1"])).is_err());
}

#[test]
fn every_category_is_populated() {
    for category in [
        Category::Arithmetic,
        Category::Exponential,
        Category::Trigonometric,
        Category::Hyperbolic,
        Category::Rounding,
        Category::Sign,
        Category::Conversion,
        Category::Complex,
    ] {
        assert!(
            registry::operations()
                .iter()
                .any(|op| op.category == category),
            "{category} is empty"
        );
    }
    for kind in [ValueKind::Real, ValueKind::Complex, ValueKind::Angle] {
        assert!(!registry::operations_for(kind).is_empty());
    }
}

#[test]
fn diagnostics_are_multiline() {
    let err = registry::call("acos", &parse_all(&["2"])).unwrap_err();
    let report = err.format_diagnostic();
    assert!(report.starts_with("error: acos: expected a value in [-1, 1] (got 2)"));
    assert!(report.contains("id: hebrides:domain:acos"));
}
