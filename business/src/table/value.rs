//! Typed cell values extracted from records by column accessors.

use std::{borrow::Cow, cmp::Ordering, fmt};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Formats accepted for timestamps without an offset. They are read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a timestamp the way the backend emits them.
///
/// Accepts RFC 3339 (converted to UTC), offset-less date-times and bare
/// `YYYY-MM-DD` dates (midnight UTC). Anything else yields `None`.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// The value a column reads from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Bool(bool),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Empty or absent text is `Missing`.
    pub fn opt_text(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(text) if !text.is_empty() => Self::Text(text.to_owned()),
            _ => Self::Missing,
        }
    }

    pub fn number(value: impl Into<f64>) -> Self {
        let value = value.into();
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Number(value)
        }
    }

    pub fn opt_number<N: Into<f64>>(value: Option<N>) -> Self {
        value.map_or(Self::Missing, Self::number)
    }

    pub fn date(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Missing, Self::Date)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Text used by the free-text filter and by equality predicates.
    pub fn search_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Missing => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Date view of the value; text is parsed leniently.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => parse_datetime(text),
            _ => None,
        }
    }

    /// Numeric view of the value; text is parsed leniently.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::Missing => 4,
        }
    }

    /// Ascending order between two present values.
    ///
    /// Text compares case-insensitively, so `"ahmed"` and `"Ahmed"` tie and
    /// keep their original relative order under a stable sort.
    pub fn cmp_for_sort(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                write!(f, "{}", *number as i64)
            }
            Self::Number(number) => write!(f, "{number}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Bool(true) => f.write_str("yes"),
            Self::Bool(false) => f.write_str("no"),
            Self::Missing => f.write_str("-"),
        }
    }
}
