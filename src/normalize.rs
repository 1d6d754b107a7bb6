//! Conversion of raw extracted text into typed activity values.

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use tracing::debug;

use crate::error::FieldError;
use crate::extract::{Field, RawRecord};

const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

// chrono's %Y takes any digit count, so the shape is checked first
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}(?:\D|$)").unwrap());

static DISTANCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?) km \((\d+(?:\.\d+)?) mi\)$").unwrap());

static SPEED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?) km/h \((\d+(?:\.\d+)?) mi/h\)$").unwrap());

/// Activity classification. Only an exact `walking` type is a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Running,
    Walking,
}

impl Category {
    pub fn from_type_text(text: Option<&str>) -> Self {
        match text {
            Some("walking") => Category::Walking,
            Some("running") => Category::Running,
            other => {
                // anything unrecognised counts as a run
                debug!(activity_type = ?other, "Unrecognised activity type, counting as running");
                Category::Running
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Running => "running",
            Category::Walking => "walking",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One activity with parsed units and derived pace.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedActivity {
    pub name: String,
    pub date: NaiveDateTime,
    pub category: Category,
    pub distance_km: f64,
    pub distance_mi: f64,
    pub elapsed_time: String,
    pub speed_kmh: f64,
    pub speed_mph: f64,
    pub pace_min_per_km: f64,
    pub pace_min_per_mi: f64,
}

impl NormalizedActivity {
    /// Builds an activity from the raw fields of one export file.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] when a required field was not found and
    /// [`FieldError::PatternMismatch`] when a value does not have the expected
    /// shape.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, FieldError> {
        let name = require(raw, Field::Name)?.to_string();
        let elapsed_time = require(raw, Field::Time)?.to_string();
        let date = parse_date(require(raw, Field::Date)?)?;
        let category = Category::from_type_text(raw.get(Field::Type));

        let (distance_km, distance_mi) = parse_unit_pair(
            Field::Distance,
            require(raw, Field::Distance)?,
            &DISTANCE_PATTERN,
            "\"X km (Y mi)\"",
        )?;
        let (speed_kmh, speed_mph) = parse_unit_pair(
            Field::AverageSpeed,
            require(raw, Field::AverageSpeed)?,
            &SPEED_PATTERN,
            "\"X km/h (Y mi/h)\"",
        )?;

        Ok(NormalizedActivity {
            name,
            date,
            category,
            distance_km,
            distance_mi,
            elapsed_time,
            speed_kmh,
            speed_mph,
            pace_min_per_km: pace(speed_kmh),
            pace_min_per_mi: pace(speed_mph),
        })
    }
}

/// Minutes per unit distance for a speed in units per hour.
///
/// A zero speed gives an infinite pace.
pub fn pace(speed: f64) -> f64 {
    60.0 / speed
}

fn require(raw: &RawRecord, field: Field) -> Result<&str, FieldError> {
    raw.get(field).ok_or(FieldError::Missing {
        field,
        label: field.label(),
    })
}

/// Parses `M/D/YYYY H:MM` with an optional trailing `am`/`pm` marker.
pub fn parse_date(text: &str) -> Result<NaiveDateTime, FieldError> {
    let mismatch = || FieldError::PatternMismatch {
        field: Field::Date,
        value: text.to_string(),
        expected: "\"M/D/YYYY H:MM\"",
    };

    if !DATE_SHAPE.is_match(text) {
        return Err(mismatch());
    }

    let (date, remainder) =
        NaiveDateTime::parse_and_remainder(text, DATE_FORMAT).map_err(|_| mismatch())?;

    let hour = date.hour();
    let adjusted = match remainder.trim().to_ascii_lowercase().as_str() {
        "" => Some(date),
        "am" | "pm" if !(1..=12).contains(&hour) => None,
        "am" if hour == 12 => date.with_hour(0),
        "pm" if hour < 12 => date.with_hour(hour + 12),
        "am" | "pm" => Some(date),
        _ => None,
    };

    adjusted.ok_or_else(mismatch)
}

/// Parses a whole `<number> <unit> (<number> <unit>)` value.
///
/// Any text around the pair, including a repeated pair, is a mismatch.
fn parse_unit_pair(
    field: Field,
    text: &str,
    pattern: &Regex,
    expected: &'static str,
) -> Result<(f64, f64), FieldError> {
    let mismatch = || FieldError::PatternMismatch {
        field,
        value: text.to_string(),
        expected,
    };

    let caps = pattern.captures(text.trim()).ok_or_else(mismatch)?;

    let metric = caps[1].parse::<f64>().map_err(|_| mismatch())?;
    let imperial = caps[2].parse::<f64>().map_err(|_| mismatch())?;
    Ok((metric, imperial))
}
