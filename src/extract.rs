//! Label-based field extraction from activity export files.
//!
//! Export files carry a human-readable description block with one
//! `Label: value` pair per line. Each [`Field`] is located by scanning for its
//! label and taking the first matching line.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// The fields pulled out of every export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Type,
    Distance,
    Time,
    AverageSpeed,
    MaxSpeed,
    AveragePace,
    MaxPace,
    Date,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Type => "type",
            Field::Distance => "distance",
            Field::Time => "time",
            Field::AverageSpeed => "average_speed",
            Field::MaxSpeed => "max_speed",
            Field::AveragePace => "average_pace",
            Field::MaxPace => "max_pace",
            Field::Date => "date",
        }
    }

    /// The label this field is found under.
    pub fn label(self) -> &'static str {
        FIELDS
            .iter()
            .find(|spec| spec.field == self)
            .map(|spec| spec.label)
            .unwrap_or_default()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairs a field with the label that introduces it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
}

/// Extraction order. Labels are matched case-insensitively.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec { field: Field::Name, label: "Name:" },
    FieldSpec { field: Field::Type, label: "Activity type:" },
    FieldSpec { field: Field::Distance, label: "Total distance:" },
    FieldSpec { field: Field::Time, label: "Total time:" },
    FieldSpec { field: Field::AverageSpeed, label: "Average speed:" },
    FieldSpec { field: Field::MaxSpeed, label: "Max speed:" },
    FieldSpec { field: Field::AveragePace, label: "Average pace:" },
    FieldSpec { field: Field::MaxPace, label: "Fastest pace:" },
    FieldSpec { field: Field::Date, label: "Recorded:" },
];

static LABEL_PATTERNS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    FIELDS
        .iter()
        .map(|spec| {
            let pattern = format!("(?i){}", regex::escape(spec.label));
            // escaped literals always compile
            (spec.field, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Raw text values for one export file, keyed by field.
///
/// A field is absent when no line carried its label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    values: BTreeMap<Field, String>,
}

impl RawRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Field, String)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Scans `content` for every configured label.
///
/// For each field the first line containing its label wins; the value is the
/// line with the label removed and surrounding whitespace trimmed.
pub fn extract(content: &str) -> RawRecord {
    LABEL_PATTERNS
        .iter()
        .filter_map(|(field, pattern)| {
            content
                .lines()
                .find(|line| pattern.is_match(line))
                .map(|line| (*field, pattern.replace_all(line, "").trim().to_string()))
        })
        .collect()
}
