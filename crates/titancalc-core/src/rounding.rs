//! Tiered value rounding.
//!
//! Blueprint values are shown in-game as round numbers whose granularity grows
//! with the value: 12 displays as 10, 1234 as 1250, 999 999 as 1 000 000. The
//! granularity is chosen from [`ROUNDING_THRESHOLDS`]: the largest threshold
//! the value reaches decides the multiple it rounds to.

use crate::tables::ROUNDING_THRESHOLDS;

/// Round `value` with the game's threshold table.
pub fn round_value(value: f64) -> i64 {
    round_value_with(value, &ROUNDING_THRESHOLDS)
}

/// Round `value` with a custom `(threshold, granularity)` table.
///
/// `thresholds` must be sorted by ascending threshold. The table is scanned
/// in order and the last threshold the value reaches supplies the
/// granularity; the value is then rounded (half away from zero) to the
/// nearest multiple of it. A value below every threshold is truncated.
pub fn round_value_with(value: f64, thresholds: &[(f64, f64)]) -> i64 {
    let granularity = thresholds
        .iter()
        .take_while(|(threshold, _)| value >= *threshold)
        .last()
        .map(|&(_, granularity)| granularity);

    match granularity {
        Some(granularity) => to_whole(granularity * (value / granularity).round()),
        None => to_whole(value.trunc()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_whole(value: f64) -> i64 {
    value as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_smallest_threshold_truncates() {
        assert_eq!(round_value(4.0), 4);
        assert_eq!(round_value(9.99), 9);
        assert_eq!(round_value(0.0), 0);
    }

    #[test]
    fn rounds_to_granularity_of_largest_reached_threshold() {
        assert_eq!(round_value(12.0), 10);
        assert_eq!(round_value(13.0), 15);
        assert_eq!(round_value(120.0), 120);
        assert_eq!(round_value(124.0), 120);
        assert_eq!(round_value(1234.0), 1250);
        assert_eq!(round_value(12_345.0), 12_500);
    }

    #[test]
    fn rounds_up_across_a_tier_boundary() {
        assert_eq!(round_value(999_999.0), 1_000_000);
        assert_eq!(round_value(1_000_000.0), 1_000_000);
        assert_eq!(round_value(1_030_000.0), 1_050_000);
    }

    #[test]
    fn upgraded_float_values_round_cleanly() {
        // 100 * 1.2 is 120.00000000000001 in binary floating point.
        assert_eq!(round_value(100.0 * 1.2), 120);
    }

    #[test]
    fn halfway_rounds_away_from_zero() {
        assert_eq!(round_value(17.5), 20);
        assert_eq!(round_value(1025.0), 1050);
    }

    #[test]
    fn custom_table() {
        let table = [(100.0, 25.0)];
        assert_eq!(round_value_with(99.0, &table), 99);
        assert_eq!(round_value_with(110.0, &table), 100);
        assert_eq!(round_value_with(113.0, &table), 125);
        assert_eq!(round_value_with(7.7, &[]), 7);
    }
}
