use crate::error::{DashboardError, Result};

pub const DEFAULT_WINDOW_DAYS: u32 = 90;
pub const MAX_WINDOW_DAYS: u32 = 3650;
pub const DEFAULT_BASE_USERS: f64 = 10_000.0;
pub const DEFAULT_GROWTH_MEAN: f64 = 200.0;
pub const DEFAULT_GROWTH_STD_DEV: f64 = 50.0;

/// Inclusive-exclusive bounds for a uniformly sampled per-day rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub low: f64,
    pub high: f64,
}

impl RateRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low < 0.0 || self.low >= self.high {
            return Err(DashboardError::InvalidConfig(format!(
                "{name} range must satisfy 0 <= low < high (got {}..{})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub window_days: u32,
    pub base_users: f64,
    pub growth_mean: f64,
    pub growth_std_dev: f64,
    /// Opt-in: floor each day's growth at zero so total users never dip.
    pub clamp_negative_growth: bool,
    pub seed: Option<u64>,
    pub dau_fraction: RateRange,
    pub match_rate: RateRange,
    pub messages_per_match: RateRange,
    pub premium_conversion_rate: RateRange,
    pub arpu: RateRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            base_users: DEFAULT_BASE_USERS,
            growth_mean: DEFAULT_GROWTH_MEAN,
            growth_std_dev: DEFAULT_GROWTH_STD_DEV,
            clamp_negative_growth: false,
            seed: None,
            dau_fraction: RateRange::new(0.30, 0.40),
            match_rate: RateRange::new(0.10, 0.30),
            messages_per_match: RateRange::new(3.0, 8.0),
            premium_conversion_rate: RateRange::new(0.01, 0.03),
            arpu: RateRange::new(0.5, 1.5),
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(DashboardError::InvalidConfig(
                "window_days must be at least 1".to_string(),
            ));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(DashboardError::InvalidConfig(format!(
                "window_days must be at most {MAX_WINDOW_DAYS} (got {})",
                self.window_days
            )));
        }
        if !self.base_users.is_finite() || self.base_users < 0.0 {
            return Err(DashboardError::InvalidConfig(format!(
                "base_users must be a non-negative number (got {})",
                self.base_users
            )));
        }
        if !self.growth_mean.is_finite() {
            return Err(DashboardError::InvalidConfig(
                "growth_mean must be finite".to_string(),
            ));
        }
        if !self.growth_std_dev.is_finite() || self.growth_std_dev <= 0.0 {
            return Err(DashboardError::InvalidConfig(format!(
                "growth_std_dev must be positive (got {})",
                self.growth_std_dev
            )));
        }

        self.dau_fraction.validate("dau_fraction")?;
        self.match_rate.validate("match_rate")?;
        self.messages_per_match.validate("messages_per_match")?;
        self.premium_conversion_rate.validate("premium_conversion_rate")?;
        self.arpu.validate("arpu")?;
        Ok(())
    }
}
