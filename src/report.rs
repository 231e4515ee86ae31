use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::filters::DashboardFilters;
use crate::models::{Breakdown, DailyMetrics, MetricsSnapshot, RetentionCurve, SeriesStats, SummaryCard};

pub const TITLE: &str = "DateMate Analytics Dashboard";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const BAR_WIDTH: usize = 20;

/// Headline numbers taken from the most recent day in view.
pub fn summary_cards(daily: &[DailyMetrics]) -> Vec<SummaryCard> {
    let Some(latest) = daily.last() else {
        return Vec::new();
    };

    vec![
        SummaryCard {
            label: "Total Users",
            value: format_count(latest.total_users),
        },
        SummaryCard {
            label: "Daily Active Users",
            value: format_count(latest.active_users),
        },
        SummaryCard {
            label: "Matches Today",
            value: format_count(latest.matches),
        },
        SummaryCard {
            label: "Revenue Today",
            value: format!("${}", format_count(latest.revenue)),
        },
    ]
}

pub fn series_stats(values: &[f64]) -> Option<SeriesStats> {
    let first = *values.first()?;
    let last = *values.last()?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    Some(SeriesStats {
        first,
        last,
        min,
        max,
        mean,
    })
}

pub fn sparkline(values: &[f64]) -> String {
    let Some(stats) = series_stats(values) else {
        return String::new();
    };
    let span = stats.max - stats.min;
    let top = SPARK_LEVELS.len() - 1;

    values
        .iter()
        .map(|value| {
            if span <= f64::EPSILON {
                return SPARK_LEVELS[0];
            }
            let level = ((value - stats.min) / span * top as f64).round() as usize;
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}

/// Rounds to a whole number and inserts thousands separators.
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn write_series(
    output: &mut String,
    title: &str,
    daily: &[DailyMetrics],
    pick: fn(&DailyMetrics) -> f64,
    currency: bool,
) {
    let values: Vec<f64> = daily.iter().map(pick).collect();
    let _ = writeln!(output, "### {title}");

    let Some(stats) = series_stats(&values) else {
        let _ = writeln!(output, "No data in the selected window.");
        let _ = writeln!(output);
        return;
    };

    let fmt = |value: f64| {
        if currency {
            format!("${}", format_count(value))
        } else {
            format_count(value)
        }
    };

    let _ = writeln!(output, "`{}`", sparkline(&values));
    let _ = writeln!(
        output,
        "- First {} · Last {} · Min {} · Max {} · Mean {}",
        fmt(stats.first),
        fmt(stats.last),
        fmt(stats.min),
        fmt(stats.max),
        fmt(stats.mean)
    );
    let _ = writeln!(output);
}

fn write_breakdown(output: &mut String, breakdown: &Breakdown) {
    let _ = writeln!(output, "### {}", breakdown.title);
    let _ = writeln!(output, "| Group | Share | |");
    let _ = writeln!(output, "|---|---:|---|");
    for entry in &breakdown.entries {
        let _ = writeln!(
            output,
            "| {} | {:.0}% | {} |",
            entry.label,
            entry.percentage,
            bar(entry.percentage)
        );
    }
    let _ = writeln!(output);
}

fn write_retention(output: &mut String, retention: &RetentionCurve) {
    let _ = writeln!(output, "### User Retention");
    let _ = writeln!(output, "| Days | Retention Rate | |");
    let _ = writeln!(output, "|---:|---:|---|");
    for (day, rate) in retention.points() {
        let _ = writeln!(output, "| {} | {:.0}% | {} |", day, rate, bar(rate));
    }
    let _ = writeln!(output);
}

pub fn build_report(
    snapshot: &MetricsSnapshot,
    filters: &DashboardFilters,
    rendered_at: DateTime<Utc>,
) -> String {
    let daily = filters.apply(&snapshot.daily);
    let mut output = String::new();

    let _ = writeln!(output, "# {TITLE}");
    let _ = writeln!(output);

    let _ = writeln!(output, "## Active Filters");
    let _ = writeln!(output, "- Date Range: {} ({} days shown)", filters.date_range.label(), daily.len());
    let _ = writeln!(
        output,
        "- User Segment: {} (display only)",
        filters.segment_labels().join(", ")
    );
    let _ = writeln!(
        output,
        "- Location: {} (display only)",
        filters.location_labels().join(", ")
    );
    let _ = writeln!(
        output,
        "- Age Range: {}-{} (display only)",
        filters.age_range.min, filters.age_range.max
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Summary");
    let cards = summary_cards(daily);
    if cards.is_empty() {
        let _ = writeln!(output, "No data in the selected window.");
    } else {
        for card in &cards {
            let _ = writeln!(output, "- **{}**: {}", card.label, card.value);
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## User Growth");
    write_series(&mut output, "Total Users Over Time", daily, |d| d.total_users, false);

    let _ = writeln!(output, "## User Engagement");
    write_series(&mut output, "Daily Active Users", daily, |d| d.active_users, false);
    write_series(&mut output, "Daily Matches", daily, |d| d.matches, false);
    write_series(&mut output, "Daily Messages", daily, |d| d.messages, false);

    let _ = writeln!(output, "## User Demographics");
    write_breakdown(&mut output, &snapshot.gender);
    write_breakdown(&mut output, &snapshot.age);

    let _ = writeln!(output, "## User Behavior");
    write_breakdown(&mut output, &snapshot.swipes);
    write_retention(&mut output, &snapshot.retention);

    let _ = writeln!(output, "## Revenue Metrics");
    write_series(&mut output, "Daily Revenue", daily, |d| d.revenue, true);
    write_series(&mut output, "Premium Conversions", daily, |d| d.premium_conversions, false);

    let _ = writeln!(output, "---");
    let _ = writeln!(
        output,
        "{TITLE} • Data refreshed daily • Last updated: {}",
        rendered_at.format("%Y-%m-%d %H:%M:%S")
    );

    output
}
