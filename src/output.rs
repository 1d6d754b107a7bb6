//! Output formatting and persistence for activity summaries.
//!
//! Supports pretty-printing, JSON serialization, and the CSV report.

use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::normalize::NormalizedActivity;
use crate::stats::{CategoryStats, SummaryStats};

pub const SUMMARY_HEADER: [&str; 10] = [
    "Total Activities",
    "Total Miles",
    "# of walks",
    "Miles Walked",
    "Walking Speed (MPH)",
    "Walking Pace (Minutes/Mile)",
    "# of runs",
    "Miles Ran",
    "Running Speed (MPH)",
    "Running Pace (Minutes/Mile)",
];

pub const ACTIVITY_HEADER: [&str; 7] = [
    "Date",
    "Name",
    "Type",
    "Distance (m)",
    "Time",
    "Speed (mi/h)",
    "Pace (min/mi)",
];

const REPORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Logs summary statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &SummaryStats) {
    debug!("{:#?}", stats);
}

/// Logs summary statistics as pretty-printed JSON.
pub fn print_json(stats: &SummaryStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Logs the headline totals.
pub fn log_summary(stats: &SummaryStats) {
    info!(
        total_activities = stats.total_activities,
        total_miles = round3(stats.total_miles),
        "Activity totals"
    );
    info!(
        runs = stats.running.count,
        run_miles = round3(stats.running.miles),
        walks = stats.walking.count,
        walk_miles = round3(stats.walking.miles),
        "Category totals"
    );
}

/// Writes the summary block followed by one row per activity.
///
/// Overwrites any existing file at `path`.
pub fn write_report(
    path: impl AsRef<Path>,
    stats: &SummaryStats,
    activities: &[NormalizedActivity],
) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = activities.len(), "Writing CSV report");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .flexible(true) // summary and activity rows differ in width
        .from_writer(file);

    writer.write_record(SUMMARY_HEADER)?;
    writer.write_record(summary_row(stats))?;

    writer.write_record(ACTIVITY_HEADER)?;
    for activity in activities {
        writer.write_record(activity_row(activity))?;
    }

    writer.flush()?;
    Ok(())
}

fn summary_row(stats: &SummaryStats) -> Vec<String> {
    let mut row = vec![
        stats.total_activities.to_string(),
        fmt_num(stats.total_miles),
    ];
    row.extend(category_cells(&stats.walking));
    row.extend(category_cells(&stats.running));
    row
}

fn category_cells(stats: &CategoryStats) -> [String; 4] {
    [
        stats.count.to_string(),
        fmt_num(stats.miles),
        fmt_num(stats.avg_speed_mph),
        fmt_num(stats.avg_pace_min_per_mi),
    ]
}

fn activity_row(activity: &NormalizedActivity) -> [String; 7] {
    [
        activity.date.format(REPORT_DATE_FORMAT).to_string(),
        activity.name.clone(),
        activity.category.to_string(),
        fmt_num(activity.distance_mi),
        activity.elapsed_time.clone(),
        fmt_num(activity.speed_mph),
        fmt_num(activity.pace_min_per_mi),
    ]
}

/// Rounds to three decimal places; NaN and infinities pass through.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn fmt_num(value: f64) -> String {
    round3(value).to_string()
}
