//! Decimal truncation for floats written to benchmark files.
//!
//! Values are cut (never rounded) at a fixed number of decimal digits of
//! their shortest decimal representation. Integers are left untouched.

use serde_json::{Number, Value};

/// Default number of decimal digits kept on output.
pub const DEFAULT_DECIMALS: u32 = 8;

/// Truncate `value` to at most `decimals` digits after the decimal point.
///
/// Non-finite values are returned unchanged.
#[must_use]
pub fn truncate_f64(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // `Display` for f64 never uses exponent notation.
    let repr = value.to_string();
    let Some((int_part, frac_part)) = repr.split_once('.') else {
        return value;
    };

    let keep = usize::try_from(decimals).unwrap_or(usize::MAX);
    if frac_part.len() <= keep {
        return value;
    }

    let cut = if keep == 0 {
        int_part.to_string()
    } else {
        format!("{int_part}.{}", &frac_part[..keep])
    };
    cut.parse().unwrap_or(value)
}

/// Truncate every float inside a JSON value, recursing through arrays and
/// objects.
pub fn truncate_value(value: &mut Value, decimals: u32) {
    match value {
        Value::Number(number) if number.is_f64() => {
            if let Some(truncated) = number
                .as_f64()
                .map(|f| truncate_f64(f, decimals))
                .and_then(Number::from_f64)
            {
                *number = truncated;
            }
        }
        Value::Array(items) => {
            for item in items {
                truncate_value(item, decimals);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                truncate_value(item, decimals);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cuts_without_rounding() {
        assert!((truncate_f64(1.123_456_789_9, 8) - 1.123_456_78).abs() < f64::EPSILON);
        assert!((truncate_f64(0.999_999_999_9, 8) - 0.999_999_99).abs() < f64::EPSILON);
        assert!((truncate_f64(-2.555_555_555_5, 8) - -2.555_555_55).abs() < f64::EPSILON);
    }

    #[test]
    fn short_values_are_untouched() {
        assert!((truncate_f64(12.5, 8) - 12.5).abs() < f64::EPSILON);
        assert!((truncate_f64(3.0, 8) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tiny_values_collapse_to_zero() {
        assert!(truncate_f64(1e-10, 8).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_decimals_keeps_integer_part() {
        assert!((truncate_f64(9.99, 0) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(truncate_f64(f64::NAN, 8).is_nan());
        assert!(truncate_f64(f64::INFINITY, 8).is_infinite());
    }

    #[test]
    fn truncates_nested_floats_but_not_integers() {
        let mut value = json!({
            "a": 1.123_456_789_1,
            "n": 123_456_789_012_u64,
            "list": [0.000_000_001_5, 2, {"deep": 7.777_777_777_7}],
            "label": "x"
        });
        truncate_value(&mut value, 8);
        assert_eq!(
            value,
            json!({
                "a": 1.123_456_78,
                "n": 123_456_789_012_u64,
                "list": [0.0, 2, {"deep": 7.777_777_77}],
                "label": "x"
            })
        );
    }
}
