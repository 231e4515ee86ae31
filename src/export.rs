use std::io::Write;

use clap::ValueEnum;

use crate::error::Result;
use crate::models::{DailyMetrics, MetricsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Daily table, one row per day
    Csv,
    /// Whole snapshot, including breakdowns and retention
    Json,
}

pub fn write_daily_csv<W: Write>(writer: W, daily: &[DailyMetrics]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for day in daily {
        csv_writer.serialize(day)?;
    }
    csv_writer.flush()?;
    Ok(daily.len())
}

pub fn write_snapshot_json<W: Write>(writer: W, snapshot: &MetricsSnapshot) -> Result<()> {
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

pub fn export<W: Write>(
    mut writer: W,
    format: ExportFormat,
    snapshot: &MetricsSnapshot,
    daily: &[DailyMetrics],
) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let rows = write_daily_csv(&mut writer, daily)?;
            tracing::debug!(rows, "exported daily metrics as CSV");
        }
        ExportFormat::Json => {
            write_snapshot_json(&mut writer, snapshot)?;
            writeln!(writer)?;
            tracing::debug!(snapshot_id = %snapshot.id, "exported snapshot as JSON");
        }
    }
    writer.flush()?;
    Ok(())
}
