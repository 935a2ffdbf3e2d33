//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Launch point totals are kept to this many fractional steps per point.
const POINT_PRECISION: f64 = 1_000_000.0;

/// Snap a launch point total to micro-point precision so sums such as
/// `5 × 1.4` compare equal to their decimal value.
#[must_use]
pub fn round_points(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * POINT_PRECISION).round() / POINT_PRECISION
}

/// Ceil a f64 and clamp it to the u32 range, returning 0 for non-finite values.
#[must_use]
pub fn ceil_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let max = f64::from(u32::MAX);
    let clamped = value.clamp(0.0, max).ceil();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert epoch seconds to epoch milliseconds, `None` when the value is
/// non-finite or does not fit an i64.
#[must_use]
pub fn secs_to_millis(secs: f64) -> Option<i64> {
    if !secs.is_finite() {
        return None;
    }
    cast::<f64, i64>((secs * 1000.0).round())
}

/// Widen whole epoch seconds to the `f64` form mission records carry.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}
