//! Common utilities shared across modules.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Decimal digits an `f64` can meaningfully carry.
pub const MAX_PRECISION: u32 = 15;

/// Round `value` to `precision` decimal digits (at most [`MAX_PRECISION`]).
///
/// Values too large to scale without overflowing are returned unchanged.
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Avoid printing "-0" for tiny negative results.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with offset) and naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// strings, the latter interpreted in local time.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Local>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Local));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round_to_precision(3.000_000_000_000_000_4, 6), 3.0);
        assert_eq!(round_to_precision(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to_precision(1.5, 0), 2.0);
        assert_eq!(round_to_precision(-0.000_000_1, 6), 0.0);
        assert_eq!(round_to_precision(1e300, 6), 1e300);
        assert!(round_to_precision(f64::INFINITY, 6).is_infinite());
    }

    #[test]
    fn test_precision_is_capped() {
        let third = 1.0 / 3.0;
        assert_eq!(
            round_to_precision(third, u32::MAX),
            round_to_precision(third, MAX_PRECISION)
        );
        assert_eq!(round_to_precision(1234.5678, 40), 1234.5678);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-03-01T10:15:00+00:00").is_some());
        assert!(parse_timestamp("2026-03-01T10:15:00Z").is_some());
        assert!(parse_timestamp("2026-03-01T10:15:00.123456").is_some());
        assert!(parse_timestamp("2026-03-01 10:15:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }
}
