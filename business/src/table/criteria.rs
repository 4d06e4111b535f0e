//! Filter criteria: the free-text needle plus per-column predicates.

use chrono::{DateTime, NaiveDate, Utc};
use ustr::Ustr;

use super::CellValue;

/// Inclusive calendar-day range, evaluated in UTC.
///
/// `from` admits everything from `00:00:00` of that day, `to` everything up to
/// the last nanosecond of that day, so a record stamped late on the `to` day
/// still matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.from
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|start| start.and_utc())
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|day| day.and_hms_nano_opt(23, 59, 59, 999_999_999))
            .map(|end| end.and_utc())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start().is_none_or(|start| at >= start) && self.end().is_none_or(|end| at <= end)
    }
}

/// A constraint on a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPredicate {
    /// Case-insensitive equality on the cell's text.
    Equals { column: Ustr, value: String },
    DateRange { column: Ustr, range: DateRange },
    /// Inclusive numeric bounds.
    NumberRange {
        column: Ustr,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl ColumnPredicate {
    pub fn equals(column: &str, value: impl Into<String>) -> Self {
        Self::Equals {
            column: Ustr::from(column),
            value: value.into(),
        }
    }

    pub fn date_range(column: &str, range: DateRange) -> Self {
        Self::DateRange {
            column: Ustr::from(column),
            range,
        }
    }

    pub fn number_range(column: &str, min: Option<f64>, max: Option<f64>) -> Self {
        Self::NumberRange {
            column: Ustr::from(column),
            min,
            max,
        }
    }

    pub fn column(&self) -> Ustr {
        match self {
            Self::Equals { column, .. }
            | Self::DateRange { column, .. }
            | Self::NumberRange { column, .. } => *column,
        }
    }

    /// A predicate with no bound set constrains nothing.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Equals { .. } => true,
            Self::DateRange { range, .. } => !range.is_unbounded(),
            Self::NumberRange { min, max, .. } => min.is_some() || max.is_some(),
        }
    }

    /// Whether `value` passes. Missing or unparseable values never match.
    pub fn matches(&self, value: &CellValue) -> bool {
        if !self.is_active() {
            return true;
        }
        match self {
            Self::Equals { value: expected, .. } => value
                .search_text()
                .is_some_and(|text| text.trim().to_lowercase() == expected.trim().to_lowercase()),
            Self::DateRange { range, .. } => value.as_date().is_some_and(|at| range.contains(at)),
            Self::NumberRange { min, max, .. } => value.as_number().is_some_and(|number| {
                min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
            }),
        }
    }
}

/// Everything the user typed or picked to narrow the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub predicates: Vec<ColumnPredicate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_predicate(mut self, predicate: ColumnPredicate) -> Self {
        self.set_predicate(predicate);
        self
    }

    /// Lower-cased needle, `None` when the search box is blank.
    pub fn needle(&self) -> Option<String> {
        let needle = self.search.trim();
        (!needle.is_empty()).then(|| needle.to_lowercase())
    }

    /// Adds a predicate, replacing any existing one on the same column.
    pub fn set_predicate(&mut self, predicate: ColumnPredicate) {
        let column = predicate.column();
        match self.predicates.iter_mut().find(|p| p.column() == column) {
            Some(existing) => *existing = predicate,
            None => self.predicates.push(predicate),
        }
    }

    pub fn remove_predicate(&mut self, column: &str) -> bool {
        let before = self.predicates.len();
        self.predicates.retain(|p| p.column().as_str() != column);
        self.predicates.len() != before
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.predicates.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && !self.predicates.iter().any(ColumnPredicate::is_active)
    }
}
