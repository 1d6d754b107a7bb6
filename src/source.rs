//! Discovery and loading of activity export files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SourceError;
use crate::extract::extract;
use crate::normalize::NormalizedActivity;

pub const SOURCE_EXTENSION: &str = "kml";

/// Lists the non-hidden export files directly inside `dir`, sorted by file name.
pub fn discover_sources(dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        // hidden files are not picked up by a plain `*.kml` listing
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        paths.push(path);
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Reads, extracts and normalizes one export file.
///
/// Invalid UTF-8 is replaced rather than rejected.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_activity(path: &Path) -> Result<NormalizedActivity, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let raw = extract(&content);
    debug!(fields = raw.len(), "Fields extracted");

    let activity = NormalizedActivity::from_raw(&raw).map_err(|source| SourceError::Field {
        path: path.to_path_buf(),
        source,
    })?;

    if activity.pace_min_per_mi.is_infinite() {
        warn!(name = %activity.name, "Zero average speed, pace is undefined");
    }

    Ok(activity)
}

/// What to do when an export file cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidPolicy {
    /// Stop at the first bad file.
    #[default]
    Abort,
    /// Log the failure and continue with the remaining files.
    Skip,
}

/// Activities loaded from a batch of files, plus any that were skipped.
#[derive(Debug, Default)]
pub struct LoadedBatch {
    pub activities: Vec<NormalizedActivity>,
    pub skipped: Vec<SourceError>,
}

/// Loads every path in order.
///
/// # Errors
///
/// With [`InvalidPolicy::Abort`], returns the first file's error. With
/// [`InvalidPolicy::Skip`], never fails; failures are collected in
/// [`LoadedBatch::skipped`].
pub fn load_activities(paths: &[PathBuf], policy: InvalidPolicy) -> Result<LoadedBatch, SourceError> {
    let mut batch = LoadedBatch::default();

    for path in paths {
        match load_activity(path) {
            Ok(activity) => batch.activities.push(activity),
            Err(e) if policy == InvalidPolicy::Skip => {
                warn!(error = %e, "Skipping unreadable activity file");
                batch.skipped.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::extract::Field;

    const VALID: &str = "Name: Track\nActivity type: running\nTotal distance: 5.00 km (3.1 mi)\n\
        Total time: 0:30:00\nAverage speed: 10.0 km/h (6.2 mi/h)\nRecorded: 3/19/2013 7:00am\n";

    #[test]
    fn test_discover_sources_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.kml", "a.kml", "notes.txt", "c.kml.bak", "upper.KML", ".hidden.kml"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.kml")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.kml"), "").unwrap();

        let paths = discover_sources(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.kml", "b.kml"]);
    }

    #[test]
    fn test_discover_sources_skips_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden.kml"), "").unwrap();
        fs::write(dir.path().join(".kml"), "").unwrap();
        fs::write(dir.path().join("visible.kml"), "").unwrap();

        let paths = discover_sources(dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("visible.kml")]);
    }

    #[test]
    fn test_discover_sources_missing_dir() {
        assert!(discover_sources("/definitely/not/here").is_err());
    }

    #[test]
    fn test_load_activity_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.kml");
        let mut bytes = b"<name>\xff\xfe</name>\n".to_vec();
        bytes.extend_from_slice(VALID.as_bytes());
        fs::write(&path, bytes).unwrap();

        let activity = load_activity(&path).unwrap();
        assert_eq!(activity.distance_mi, 3.1);
    }

    #[test]
    fn test_load_activity_tags_path_and_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.kml");
        fs::write(&path, VALID.replace("Recorded:", "Logged:")).unwrap();

        let err = load_activity(&path).unwrap_err();
        assert_eq!(err.path(), path.as_path());
        match err {
            SourceError::Field { source, .. } => {
                assert!(matches!(source, FieldError::Missing { field: Field::Date, .. }));
            }
            other => panic!("expected field error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_activities_policies() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.kml");
        let bad = dir.path().join("b.kml");
        fs::write(&good, VALID).unwrap();
        fs::write(&bad, "Name: nothing else\n").unwrap();
        let paths = vec![good, bad.clone()];

        let err = load_activities(&paths, InvalidPolicy::Abort).unwrap_err();
        assert_eq!(err.path(), bad.as_path());

        let batch = load_activities(&paths, InvalidPolicy::Skip).unwrap();
        assert_eq!(batch.activities.len(), 1);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].path(), bad.as_path());
    }
}
