//! Display formatting for transmission statistics.
//!
//! Pure functions converting raw byte counts and rates into the strings the
//! panel shows. No state, no side effects; safe to call from anywhere.

/// Sentinel shown in place of a numeric value when no sample exists yet.
pub const NO_DATA: &str = "No data";

const BYTE: f64 = 1024.0;
const UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count as a human-readable size.
///
/// Values with absolute magnitude below 1 collapse to exactly zero, which
/// suppresses negative-zero and sub-byte rounding noise. Below 1024 the value
/// is printed unscaled with a `Bytes` suffix; above that it is divided down
/// through `kB..YB`, capped at `EB` so pathologically large inputs cannot run
/// off the end of the unit table. Non-finite input is normalized to zero.
pub fn format_byte_size(value: f64, precision: usize) -> String {
    let mut value = if value.is_finite() { value } else { 0.0 };

    if value.abs() < 1.0 {
        value = 0.0;
    }

    if value.abs() < BYTE {
        return format!("{} Bytes", value);
    }

    value /= BYTE;
    let mut unit = 0;
    while value.abs() >= BYTE && unit < UNITS.len() - 3 {
        value /= BYTE;
        unit += 1;
    }

    format!("{:.*} {}", precision, value, UNITS[unit])
}

/// Format the compression ratio (packed bytes over total bytes) with three
/// fixed decimals.
///
/// A non-positive denominator means there is nothing meaningful to divide by
/// and yields the no-data sentinel. The ratio is a display value, not a
/// validated invariant: it may exceed 1.0 if the host reports packed > total.
pub fn format_ratio(packed_bytes: f64, total_bytes: f64) -> String {
    if !(total_bytes > 0.0) {
        return NO_DATA.to_string();
    }
    format!("{:.3}", packed_bytes / total_bytes)
}

/// Format a transmit rate: rounded to whole bytes, sized with three decimals,
/// suffixed with `/sec`.
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/sec", format_byte_size(bytes_per_sec.round(), 3))
}

/// Label for the packing state.
pub fn format_enabled_state(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero_bytes_at_any_precision() {
        for precision in 0..6 {
            assert_eq!(format_byte_size(0.0, precision), "0 Bytes");
        }
    }

    #[test]
    fn sub_unit_magnitude_clamps_to_zero() {
        assert_eq!(format_byte_size(-0.5, 0), "0 Bytes");
        assert_eq!(format_byte_size(0.999, 3), "0 Bytes");
    }

    #[test]
    fn below_threshold_stays_unscaled() {
        assert_eq!(format_byte_size(1023.0, 0), "1023 Bytes");
        assert_eq!(format_byte_size(512.5, 2), "512.5 Bytes");
    }

    #[test]
    fn scales_through_units() {
        assert_eq!(format_byte_size(1024.0, 0), "1 kB");
        assert_eq!(format_byte_size(1_048_576.0, 2), "1.00 MB");
        assert_eq!(format_byte_size(1_073_741_824.0, 1), "1.0 GB");
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(format_byte_size(-2048.0, 1), "-2.0 kB");
    }

    #[test]
    fn unit_table_is_capped_at_eb() {
        // 1024^8 bytes would be 1 YB, but the walk stops three entries early.
        let huge = 1024f64.powi(8);
        let formatted = format_byte_size(huge, 0);
        assert!(formatted.ends_with(" EB"), "got {formatted}");
    }

    #[test]
    fn non_finite_input_renders_as_zero() {
        assert_eq!(format_byte_size(f64::NAN, 0), "0 Bytes");
        assert_eq!(format_byte_size(f64::INFINITY, 2), "0 Bytes");
        assert_eq!(format_byte_size(f64::NEG_INFINITY, 2), "0 Bytes");
    }

    #[test]
    fn ratio_with_valid_denominator() {
        assert_eq!(format_ratio(512.0, 1024.0), "0.500");
        assert_eq!(format_ratio(1024.0, 1024.0), "1.000");
    }

    #[test]
    fn ratio_may_exceed_one() {
        assert_eq!(format_ratio(2048.0, 1024.0), "2.000");
    }

    #[test]
    fn ratio_without_denominator_is_no_data() {
        assert_eq!(format_ratio(512.0, 0.0), NO_DATA);
        assert_eq!(format_ratio(512.0, -1.0), NO_DATA);
        assert_eq!(format_ratio(0.0, f64::NAN), NO_DATA);
    }

    #[test]
    fn rate_rounds_then_scales() {
        assert_eq!(format_rate(1536.0), "1.500 kB/sec");
        assert_eq!(format_rate(1535.6), "1.500 kB/sec");
        assert_eq!(format_rate(0.4), "0 Bytes/sec");
    }

    #[test]
    fn enabled_state_labels() {
        assert_eq!(format_enabled_state(true), "Enabled");
        assert_eq!(format_enabled_state(false), "Disabled");
    }

    #[test]
    fn formatting_is_idempotent() {
        let first = format_byte_size(123_456_789.0, 3);
        let second = format_byte_size(123_456_789.0, 3);
        assert_eq!(first, second);

        let first = format_ratio(3.0, 7.0);
        let second = format_ratio(3.0, 7.0);
        assert_eq!(first, second);
    }

    #[test]
    fn unit_tier_never_decreases_with_magnitude() {
        fn tier(formatted: &str) -> usize {
            let suffix = formatted.rsplit(' ').next().unwrap();
            if suffix == "Bytes" {
                return 0;
            }
            1 + UNITS.iter().position(|u| *u == suffix).unwrap()
        }

        let mut last = 0;
        let mut value = 1.0;
        while value < 1024f64.powi(9) {
            let current = tier(&format_byte_size(value, 2));
            assert!(current >= last, "tier regressed at {value}");
            last = current;
            value *= 2.0;
        }
    }
}
