use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::error::{DashboardError, Result};
use crate::models::DailyMetrics;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DateRange {
    #[value(name = "last-7-days")]
    Last7Days,
    #[value(name = "last-30-days")]
    Last30Days,
    #[default]
    #[value(name = "last-90-days")]
    Last90Days,
    #[value(name = "year-to-date")]
    YearToDate,
    #[value(name = "all-time")]
    AllTime,
}

impl DateRange {
    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Last7Days => "Last 7 days",
            DateRange::Last30Days => "Last 30 days",
            DateRange::Last90Days => "Last 90 days",
            DateRange::YearToDate => "Year to date",
            DateRange::AllTime => "All time",
        }
    }

    /// Trailing slice of `daily` covered by this range. `daily` must be in
    /// ascending date order; the last entry is treated as "today".
    pub fn apply<'a>(&self, daily: &'a [DailyMetrics]) -> &'a [DailyMetrics] {
        let Some(last) = daily.last() else {
            return daily;
        };

        let keep = match self {
            DateRange::Last7Days => 7,
            DateRange::Last30Days => 30,
            DateRange::Last90Days => 90,
            DateRange::AllTime => daily.len(),
            DateRange::YearToDate => {
                let jan_first = NaiveDate::from_ymd_opt(last.date.year(), 1, 1);
                daily
                    .iter()
                    .filter(|d| jan_first.map_or(true, |start| d.date >= start))
                    .count()
            }
        };

        &daily[daily.len() - keep.min(daily.len())..]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Segment {
    AllUsers,
    FreeUsers,
    PremiumUsers,
    NewUsers,
    InactiveUsers,
}

impl Segment {
    pub fn label(&self) -> &'static str {
        match self {
            Segment::AllUsers => "All Users",
            Segment::FreeUsers => "Free Users",
            Segment::PremiumUsers => "Premium Users",
            Segment::NewUsers => "New Users",
            Segment::InactiveUsers => "Inactive Users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Location {
    Global,
    NorthAmerica,
    Europe,
    Asia,
    Australia,
    SouthAmerica,
    Africa,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::Global => "Global",
            Location::NorthAmerica => "North America",
            Location::Europe => "Europe",
            Location::Asia => "Asia",
            Location::Australia => "Australia",
            Location::SouthAmerica => "South America",
            Location::Africa => "Africa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: MIN_AGE,
            max: MAX_AGE,
        }
    }
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min < MIN_AGE || max > MAX_AGE || min > max {
            return Err(DashboardError::InvalidFilter(format!(
                "age range must satisfy {MIN_AGE} <= min <= max <= {MAX_AGE} (got {min}-{max})"
            )));
        }
        Ok(Self { min, max })
    }
}

/// Sidebar selections. Only `date_range` reshapes what is displayed; the mock
/// data has no segment, location or age dimension, so those are echoed only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFilters {
    pub date_range: DateRange,
    pub segments: Vec<Segment>,
    pub locations: Vec<Location>,
    pub age_range: AgeRange,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            segments: vec![Segment::AllUsers],
            locations: vec![Location::Global],
            age_range: AgeRange::default(),
        }
    }
}

impl DashboardFilters {
    pub fn apply<'a>(&self, daily: &'a [DailyMetrics]) -> &'a [DailyMetrics] {
        let visible = self.date_range.apply(daily);
        tracing::debug!(
            date_range = self.date_range.label(),
            total_days = daily.len(),
            visible_days = visible.len(),
            "applied date range filter"
        );
        visible
    }

    pub fn segment_labels(&self) -> Vec<&'static str> {
        self.segments.iter().map(Segment::label).collect()
    }

    pub fn location_labels(&self) -> Vec<&'static str> {
        self.locations.iter().map(Location::label).collect()
    }
}
