//! Number formatting shared by the `Display` impls.

/// Compact "short g" rendering: fixed notation with up to 12 significant
/// digits for magnitudes in `[1e-4, 1e6)`, scientific with up to 5
/// significant digits otherwise. Trailing zeros are trimmed.
pub fn format_short_g(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Inf"
        } else {
            "Inf"
        }
        .to_string();
    }

    let abs = value.abs();
    if abs == 0.0 {
        return "0".to_string();
    }

    if !(1e-4..1e6).contains(&abs) {
        return format_scientific(value);
    }

    let exp10 = abs.log10().floor() as i32;
    let decimals = (11 - exp10).clamp(0, 12) as usize;
    let pow = 10f64.powi(decimals as i32);
    let rounded = (value * pow).round() / pow;
    // Rounding may carry into a seventh integer digit
    if rounded.abs() >= 1e6 {
        return format_scientific(value);
    }
    let s = trim_fraction(&format!("{rounded:.decimals$}")).to_string();
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

fn format_scientific(value: f64) -> String {
    let s = format!("{value:.4e}");
    match s.find('e') {
        Some(idx) => {
            let (mantissa, exp) = s.split_at(idx);
            format!("{}{exp}", trim_fraction(mantissa))
        }
        None => s,
    }
}

/// Fixed notation with exactly `decimals` digits after the point.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format_short_g(value);
    }
    let s = format!("{value:.decimals$}");
    // "-0.000" reads as noise
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

pub(crate) fn format_with(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(decimals) => format_fixed(value, decimals),
        None => format_short_g(value),
    }
}

/// Renders `re + im i` as `a + bi` / `a - bi`.
pub(crate) fn format_complex(re: f64, im: f64, precision: Option<usize>) -> String {
    let real = format_with(re, precision);
    if im.is_nan() {
        return format!("{real} + NaNi");
    }
    let sign = if im.is_sign_negative() && im != 0.0 {
        '-'
    } else {
        '+'
    };
    let imag = format_with(im.abs(), precision);
    format!("{real} {sign} {imag}i")
}

fn trim_fraction(s: &str) -> &str {
    match s.find('.') {
        Some(dot) => {
            let trimmed = s.trim_end_matches('0');
            if trimmed.len() == dot + 1 {
                &trimmed[..dot]
            } else {
                trimmed
            }
        }
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_g_special_values() {
        assert_eq!(format_short_g(f64::NAN), "NaN");
        assert_eq!(format_short_g(f64::INFINITY), "Inf");
        assert_eq!(format_short_g(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_short_g(-0.0), "0");
    }

    #[test]
    fn short_g_fixed_range() {
        assert_eq!(format_short_g(1.0), "1");
        assert_eq!(format_short_g(2.5), "2.5");
        assert_eq!(format_short_g(-3.25), "-3.25");
        assert_eq!(format_short_g(0.1 + 0.2), "0.3");
        assert_eq!(format_short_g(std::f64::consts::PI), "3.14159265359");
    }

    #[test]
    fn short_g_scientific_range() {
        assert_eq!(format_short_g(1e6), "1e6");
        assert_eq!(format_short_g(1.5e-5), "1.5e-5");
        assert_eq!(format_short_g(-123456789.0), "-1.2346e8");
    }

    #[test]
    fn short_g_carry_into_scientific() {
        assert_eq!(format_short_g(999_999.999_999_9), "1e6");
        assert_eq!(format_short_g(-999_999.999_999_9), "-1e6");
        assert_eq!(format_short_g(999_999.5), "999999.5");
    }

    #[test]
    fn fixed_drops_negative_zero_sign() {
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
        assert_eq!(format_fixed(1.005, 1), "1.0");
        assert_eq!(format_fixed(-2.5, 3), "-2.500");
    }

    #[test]
    fn complex_rendering() {
        assert_eq!(format_complex(1.0, 2.0, None), "1 + 2i");
        assert_eq!(format_complex(1.0, -2.0, None), "1 - 2i");
        assert_eq!(format_complex(0.0, 0.0, None), "0 + 0i");
        assert_eq!(format_complex(0.5, -0.25, Some(2)), "0.50 - 0.25i");
    }
}
