//! Error types for loading activities from export files.

use std::path::PathBuf;

use crate::extract::Field;

/// A field that could not be turned into a typed value.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("missing field `{field}` (no line contains {label:?})")]
    Missing { field: Field, label: &'static str },
    #[error("field `{field}` value {value:?} does not look like {expected}")]
    PatternMismatch {
        field: Field,
        value: String,
        expected: &'static str,
    },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Missing { field, .. } | FieldError::PatternMismatch { field, .. } => *field,
        }
    }
}

/// A failure tied to one source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Field { path: PathBuf, source: FieldError },
}

impl SourceError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            SourceError::Io { path, .. } | SourceError::Field { path, .. } => path,
        }
    }
}
