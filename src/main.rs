//! CLI entry point for the KML activity tally tool.
//!
//! Summarizes every exported activity in a directory into a CSV report.

use anyhow::Result;
use clap::Parser;
use kml_tally::analyzer::analyze;
use kml_tally::config::{DEFAULT_OUTPUT, LogConfig, RunConfig};
use kml_tally::output::{log_summary, print_json, print_pretty};
use kml_tally::source::InvalidPolicy;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "kml_tally")]
#[command(about = "Summarize exported running and walking activities", long_about = None)]
struct Cli {
    /// Directory containing .kml activity exports
    #[arg(value_name = "DIR")]
    input_dir: PathBuf,

    /// CSV file to write the report to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Skip files that fail to parse instead of aborting the run
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,

    /// Also log the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging(&LogConfig::from_env())?;

    let cli = Cli::parse();

    let policy = if cli.skip_invalid {
        InvalidPolicy::Skip
    } else {
        InvalidPolicy::Abort
    };
    let config = RunConfig::new(cli.input_dir)
        .with_output(cli.output)
        .with_policy(policy);

    let analysis = analyze(&config)?;

    log_summary(&analysis.stats);
    print_pretty(&analysis.stats);
    if cli.json {
        print_json(&analysis.stats)?;
    }

    Ok(())
}

/// Colored stderr plus a JSON daily rolling log file.
fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let log_dir = config
        .file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .file_path
        .file_name()
        .unwrap_or(OsStr::new("kml_tally.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(config.stderr_default.parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(config.json_default.parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
