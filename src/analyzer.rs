use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::SourceError;
use crate::normalize::NormalizedActivity;
use crate::output::write_report;
use crate::source::{discover_sources, load_activities};
use crate::stats::SummaryStats;

/// Result of one run.
#[derive(Debug)]
pub struct Analysis {
    pub stats: SummaryStats,
    pub activities: Vec<NormalizedActivity>,
    pub skipped: Vec<SourceError>,
}

/// Loads every export file in the input directory, aggregates them, and
/// writes the CSV report.
///
/// All files are parsed before the report is opened, so a failed run leaves
/// no output behind.
#[tracing::instrument(skip_all, fields(input = %config.input_dir.display()))]
pub fn analyze(config: &RunConfig) -> Result<Analysis> {
    let paths = discover_sources(&config.input_dir)
        .with_context(|| format!("failed to list {}", config.input_dir.display()))?;
    info!(files = paths.len(), "Export files found");

    let batch = load_activities(&paths, config.on_invalid)?;
    let stats = SummaryStats::from_activities(&batch.activities);

    for category in stats.empty_categories() {
        warn!(%category, "No activities in category, averages are undefined");
    }

    write_report(&config.output, &stats, &batch.activities)
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    info!(
        output = %config.output.display(),
        activities = batch.activities.len(),
        skipped = batch.skipped.len(),
        "Report written"
    );

    Ok(Analysis {
        stats,
        activities: batch.activities,
        skipped: batch.skipped,
    })
}
