//! Run and logging configuration.

use std::path::PathBuf;

use crate::source::InvalidPolicy;

pub const DEFAULT_OUTPUT: &str = "output.csv";
pub const DEFAULT_LOG_FILE: &str = "logs/kml_tally.log";

/// Everything one summarizing run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub on_invalid: InvalidPolicy,
}

impl RunConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            on_invalid: InvalidPolicy::Abort,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_policy(mut self, on_invalid: InvalidPolicy) -> Self {
        self.on_invalid = on_invalid;
        self
    }
}

/// Logging settings read from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub file_path: PathBuf,
    pub stderr_default: String,
    pub json_default: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let file_path = std::env::var("LOG_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));

        Self {
            file_path,
            stderr_default: "info".to_string(),
            json_default: "debug".to_string(),
        }
    }
}
