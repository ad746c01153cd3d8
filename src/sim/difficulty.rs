//! Difficulty controller: level to tick interval

use std::time::Duration;

use crate::config::TimingConfig;

/// Interval for `level` (1-based): `max(min, base - (level - 1) * decrease)`
pub fn tick_interval(level: u32, timing: &TimingConfig) -> Duration {
    let steps = u64::from(level.saturating_sub(1));
    let ms = timing
        .base_tick_ms
        .saturating_sub(steps.saturating_mul(timing.tick_decrease_ms))
        .max(timing.min_tick_ms);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn spelling_snake_curve() {
        let timing = TimingConfig::default();
        assert_eq!(tick_interval(1, &timing), Duration::from_millis(150));
        assert_eq!(tick_interval(2, &timing), Duration::from_millis(145));
        assert_eq!(tick_interval(14, &timing), Duration::from_millis(85));
        assert_eq!(tick_interval(15, &timing), Duration::from_millis(80));
        assert_eq!(tick_interval(100, &timing), Duration::from_millis(80));
    }

    #[test]
    fn constant_timing_never_changes() {
        let timing = TimingConfig::constant(16);
        assert_eq!(tick_interval(1, &timing), Duration::from_millis(16));
        assert_eq!(tick_interval(40, &timing), Duration::from_millis(16));
    }

    #[test]
    fn level_zero_is_treated_as_level_one() {
        let timing = TimingConfig::default();
        assert_eq!(tick_interval(0, &timing), tick_interval(1, &timing));
    }

    proptest! {
        #[test]
        fn interval_is_non_increasing_and_floored(
            level in 1u32..10_000,
            base in 1u64..1_000,
            decrease in 0u64..50,
            min in 1u64..1_000,
        ) {
            let timing = TimingConfig {
                base_tick_ms: base,
                tick_decrease_ms: decrease,
                min_tick_ms: min,
            };
            let here = tick_interval(level, &timing);
            let next = tick_interval(level + 1, &timing);
            prop_assert!(next <= here);
            prop_assert!(here >= Duration::from_millis(min));
        }
    }
}
