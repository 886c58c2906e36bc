//! Output rounding
//!
//! Every derived quantity is rounded once, at the point it is produced, to
//! the two-decimal display convention. Intermediate shares are never
//! rounded.

/// Decimal places used for every recipe output
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Beyond this, `10^decimals` no longer fits the f64 mantissa exactly
const MAX_DECIMAL_PLACES: u32 = 15;

/// From 2^52 up every f64 is an integer, so a scaled value this large has no
/// fractional digits left to round
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

#[inline]
fn scale_factor(decimals: u32) -> f64 {
    10_f64.powi(decimals.min(MAX_DECIMAL_PLACES) as i32)
}

/// Round half away from zero to `decimals` places.
///
/// Halfway cases are decided on the value as written in decimal, not on the
/// binary product `value * 10^decimals`: `1.005`, `1.115` and `2.675` all
/// round up at two places, to `1.01`, `1.12` and `2.68`.
///
/// Non-finite input is returned unchanged, and so is any value too large to
/// carry `decimals` fractional digits.
///
/// ```
/// use soil_mix_core::precision::round_to_precision;
///
/// assert_eq!(round_to_precision(1.23456, 2), 1.23);
/// assert_eq!(round_to_precision(-2.5, 0), -3.0);
/// assert_eq!(round_to_precision(1.005, 2), 1.01);
/// ```
#[inline]
pub fn round_to_precision(value: f64, decimals: u32) -> f64 {
    let factor = scale_factor(decimals);
    let magnitude = value.abs();
    let scaled = magnitude * factor;
    if !scaled.is_finite() || scaled >= INTEGRAL_THRESHOLD {
        return value;
    }

    let lower = scaled.trunc();
    let halfway = (lower + 0.5) / factor;
    let rounded = if magnitude >= halfway { lower + 1.0 } else { lower };
    (rounded / factor).copysign(value)
}

/// [`round_to_precision`] with the default two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    round_to_precision(value, DEFAULT_DECIMAL_PLACES)
}

/// True when `value` carries no more than `decimals` decimal digits
pub fn has_at_most_decimals(value: f64, decimals: u32) -> bool {
    if !value.is_finite() {
        return false;
    }
    let scaled = value.abs() * scale_factor(decimals);
    if !scaled.is_finite() || scaled >= INTEGRAL_THRESHOLD {
        return true;
    }
    (scaled - scaled.round()).abs() < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_two_places() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(1.999), 2.0);
        assert_eq!(round2(0.666_666), 0.67);
    }

    #[test]
    fn test_custom_places() {
        assert_eq!(round_to_precision(1.23456, 3), 1.235);
        assert_eq!(round_to_precision(1.23456, 1), 1.2);
        assert_eq!(round_to_precision(1.5, 0), 2.0);
    }

    #[test]
    fn test_half_away_from_zero() {
        assert_eq!(round_to_precision(0.5, 0), 1.0);
        assert_eq!(round_to_precision(-0.5, 0), -1.0);
        assert_eq!(round_to_precision(2.5, 0), 3.0);
        assert_eq!(round2(-1.239), -1.24);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_large_decimals_clamped() {
        assert_eq!(round_to_precision(0.1, 400), 0.1);
    }

    #[test]
    fn test_decimal_halfway_rounds_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(1.115), 1.12);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(-2.675), -2.68);
        assert_eq!(round_to_precision(0.125, 2), 0.13);
        assert_eq!(round_to_precision(1.0049, 2), 1.0);
        assert_eq!(round2(0.285), 0.29);
    }

    #[test]
    fn test_large_values_stay_finite() {
        assert_eq!(round_to_precision(1e307, 2), 1e307);
        assert_eq!(round_to_precision(1e300, 15), 1e300);
        assert_eq!(round_to_precision(-1e307, 2), -1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert_eq!(round2(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
    }

    #[test]
    fn test_has_at_most_decimals() {
        assert!(has_at_most_decimals(6.86, 2));
        assert!(has_at_most_decimals(24.0, 2));
        assert!(!has_at_most_decimals(6.857, 2));
        assert!(has_at_most_decimals(1e307, 2));
        assert!(!has_at_most_decimals(f64::NAN, 2));
    }
}
