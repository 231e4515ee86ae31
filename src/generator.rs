//! Synthetic metrics for the dashboard.
//!
//! Every daily series is derived from `total_users` by multiplying with an
//! independently sampled per-day rate, so magnitudes stay plausible without
//! modelling any correlation between days or metrics.

use chrono::{Duration, NaiveDate, Utc};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use uuid::Uuid;

use crate::config::{GeneratorConfig, RateRange};
use crate::error::{DashboardError, Result};
use crate::models::{Breakdown, DailyMetrics, MetricsSnapshot, RetentionCurve};

pub const GENDER_SHARES: [(&str, f64); 3] = [("Male", 55.0), ("Female", 42.0), ("Non-binary", 3.0)];

pub const AGE_SHARES: [(&str, f64); 5] = [
    ("18-24", 35.0),
    ("25-34", 40.0),
    ("35-44", 15.0),
    ("45-54", 7.0),
    ("55+", 3.0),
];

pub const SWIPE_SHARES: [(&str, f64); 3] = [
    ("Right (Like)", 45.0),
    ("Left (Pass)", 50.0),
    ("Up (Super Like)", 5.0),
];

pub const RETENTION_DAYS: [u32; 7] = [1, 3, 7, 14, 30, 60, 90];
pub const RETENTION_RATES: [f64; 7] = [95.0, 80.0, 65.0, 50.0, 35.0, 25.0, 20.0];

pub fn gender_distribution() -> Breakdown {
    Breakdown::from_pairs("Gender Distribution", &GENDER_SHARES)
}

pub fn age_distribution() -> Breakdown {
    Breakdown::from_pairs("Age Distribution", &AGE_SHARES)
}

pub fn swipe_distribution() -> Breakdown {
    Breakdown::from_pairs("Swipe Actions", &SWIPE_SHARES)
}

pub fn retention_curve() -> RetentionCurve {
    RetentionCurve {
        days: RETENTION_DAYS.to_vec(),
        rates: RETENTION_RATES.to_vec(),
    }
}

/// `window_days` consecutive dates ending on `end`, both ends inclusive.
pub fn date_window(end: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
    let start = end - Duration::days(i64::from(window_days.saturating_sub(1)));
    (0..i64::from(window_days))
        .map(|offset| start + Duration::days(offset))
        .collect()
}

/// Builds a snapshot anchored on today's UTC date. The RNG is seeded from
/// `config.seed` when present, otherwise from OS entropy.
pub fn generate_snapshot(config: &GeneratorConfig) -> Result<MetricsSnapshot> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate(config, Utc::now().date_naive(), &mut rng)
}

pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    today: NaiveDate,
    rng: &mut R,
) -> Result<MetricsSnapshot> {
    config.validate()?;

    let dates = date_window(today, config.window_days);
    let days = dates.len();

    let growth = Normal::new(config.growth_mean, config.growth_std_dev)
        .map_err(|e| DashboardError::InvalidConfig(format!("growth distribution: {e}")))?;

    let mut running = config.base_users;
    let total_users: Vec<f64> = (0..days)
        .map(|_| {
            let mut delta = growth.sample(rng);
            if config.clamp_negative_growth {
                delta = delta.max(0.0);
            }
            running += delta;
            running
        })
        .collect();

    let active_users = scale(&total_users, config.dau_fraction, rng);
    let matches = scale(&active_users, config.match_rate, rng);
    let messages = scale(&matches, config.messages_per_match, rng);
    let premium_conversions = scale(&active_users, config.premium_conversion_rate, rng);
    let revenue = scale(&active_users, config.arpu, rng);

    let daily: Vec<DailyMetrics> = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| DailyMetrics {
            date,
            total_users: total_users[i],
            active_users: active_users[i],
            matches: matches[i],
            messages: messages[i],
            premium_conversions: premium_conversions[i],
            revenue: revenue[i],
        })
        .collect();

    let snapshot = MetricsSnapshot {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        daily,
        gender: gender_distribution(),
        age: age_distribution(),
        swipes: swipe_distribution(),
        retention: retention_curve(),
    };

    tracing::debug!(
        snapshot_id = %snapshot.id,
        window_days = config.window_days,
        seed = ?config.seed,
        end = %today,
        "generated mock metrics"
    );

    Ok(snapshot)
}

fn scale<R: Rng + ?Sized>(base: &[f64], range: RateRange, rng: &mut R) -> Vec<f64> {
    base.iter()
        .map(|value| value * rng.gen_range(range.low..range.high))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn seeded(seed: u64) -> MetricsSnapshot {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(&GeneratorConfig::default(), today(), &mut rng).unwrap()
    }

    #[test]
    fn window_has_configured_length_and_daily_step() {
        let snapshot = seeded(7);
        let daily = &snapshot.daily;
        assert_eq!(daily.len(), 90);
        assert_eq!(daily.last().unwrap().date, today());
        assert_eq!((daily[89].date - daily[0].date).num_days(), 89);
        for pair in daily.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
        }
    }

    #[test]
    fn single_day_window_ends_today() {
        let dates = date_window(today(), 1);
        assert_eq!(dates, vec![today()]);
    }

    #[test]
    fn derived_metrics_stay_within_sampling_bounds() {
        for seed in 0..20 {
            let snapshot = seeded(seed);
            for day in &snapshot.daily {
                assert!(day.active_users >= day.total_users * 0.30);
                assert!(day.active_users <= day.total_users * 0.40);
                assert!(day.matches >= day.active_users * 0.10);
                assert!(day.matches <= day.active_users * 0.30);
                assert!(day.messages >= day.matches * 3.0);
                assert!(day.messages <= day.matches * 8.0);
                assert!(day.premium_conversions <= day.active_users * 0.03);
                assert!(day.premium_conversions >= day.active_users * 0.01);
                assert!(day.revenue >= day.active_users * 0.5);
                assert!(day.revenue <= day.active_users * 1.5);
            }
        }
    }

    #[test]
    fn first_day_is_base_plus_one_growth_sample() {
        for seed in 0..10 {
            let first = seeded(seed).daily[0].total_users;
            assert!(first >= 10_000.0 + 200.0 - 4.0 * 50.0, "seed {seed}: {first}");
            assert!(first <= 10_000.0 + 200.0 + 4.0 * 50.0, "seed {seed}: {first}");
        }
    }

    #[test]
    fn same_seed_reproduces_daily_series() {
        let a = seeded(42);
        let b = seeded(42);
        assert_eq!(a.daily, b.daily);
        assert_ne!(a.id, b.id);

        let c = seeded(43);
        assert_ne!(a.daily, c.daily);
    }

    #[test]
    fn categorical_keys_are_fixed() {
        for seed in [1, 2, 3] {
            let snapshot = seeded(seed);
            assert_eq!(snapshot.gender.labels(), vec!["Male", "Female", "Non-binary"]);
            assert_eq!(
                snapshot.age.labels(),
                vec!["18-24", "25-34", "35-44", "45-54", "55+"]
            );
            assert_eq!(
                snapshot.swipes.labels(),
                vec!["Right (Like)", "Left (Pass)", "Up (Super Like)"]
            );
            assert_eq!(snapshot.swipes.get("Up (Super Like)"), Some(5.0));
        }
    }

    #[test]
    fn retention_rates_never_increase() {
        let curve = seeded(9).retention;
        assert_eq!(curve.days, vec![1, 3, 7, 14, 30, 60, 90]);
        assert_eq!(curve.days.len(), curve.rates.len());
        for pair in curve.rates.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn clamped_growth_never_dips() {
        let config = GeneratorConfig {
            growth_mean: 0.0,
            growth_std_dev: 100.0,
            clamp_negative_growth: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let snapshot = generate(&config, today(), &mut rng).unwrap();
        for pair in snapshot.daily.windows(2) {
            assert!(pair[1].total_users >= pair[0].total_users);
        }
    }

    #[test]
    fn unclamped_growth_can_dip() {
        let config = GeneratorConfig {
            growth_mean: 0.0,
            growth_std_dev: 100.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let snapshot = generate(&config, today(), &mut rng).unwrap();
        assert!(snapshot
            .daily
            .windows(2)
            .any(|pair| pair[1].total_users < pair[0].total_users));
    }

    #[test]
    fn invalid_config_is_rejected_before_sampling() {
        let config = GeneratorConfig::default().with_window_days(0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate(&config, today(), &mut rng),
            Err(DashboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn snapshot_from_seeded_config_is_anchored_today() {
        let snapshot = generate_snapshot(&GeneratorConfig::default().with_seed(11)).unwrap();
        assert_eq!(snapshot.daily.len(), 90);
        assert_eq!(snapshot.daily.last().unwrap().date, Utc::now().date_naive());
    }
}
