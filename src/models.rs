use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub total_users: f64,
    pub active_users: f64,
    pub matches: f64,
    pub messages: f64,
    pub premium_conversions: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub percentage: f64,
}

/// Label to percentage mapping that keeps its insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub title: String,
    pub entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    pub fn from_pairs(title: &str, pairs: &[(&str, f64)]) -> Self {
        Self {
            title: title.to_string(),
            entries: pairs
                .iter()
                .map(|(label, percentage)| BreakdownEntry {
                    label: (*label).to_string(),
                    percentage: *percentage,
                })
                .collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionCurve {
    pub days: Vec<u32>,
    pub rates: Vec<f64>,
}

impl RetentionCurve {
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.days.iter().copied().zip(self.rates.iter().copied())
    }
}

/// One generation run. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub daily: Vec<DailyMetrics>,
    pub gender: Breakdown,
    pub age: Breakdown,
    pub swipes: Breakdown,
    pub retention: RetentionCurve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}
