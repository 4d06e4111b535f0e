//! Closed record types of the admin screens and their ingestion boundary.
//!
//! JSON from the API is decoded into these structs and validated once in
//! [`ingest`]. Anything that fails either step is dropped with a warning, so
//! the table pipeline only ever sees well-formed records.

pub mod dates;

mod activity;
mod complaint;
mod contributor;
mod governorate;
mod notification;
mod partner;
mod representative;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use crate::table::{CellValue, ColumnDescriptor, DateRenderer, Record, RecordId};

pub use activity::Activity;
pub use complaint::{Complaint, ComplaintStatus};
pub use contributor::Contributor;
pub use governorate::Governorate;
pub use notification::Notification;
pub use partner::Partner;
pub use representative::{ApprovalStatus, Representative};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("id must be positive, got {0}")]
    NonPositiveId(i64),
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("`{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A record type served by one API resource.
pub trait Entity: Record + DeserializeOwned {
    /// Path segment under the API root, e.g. `complaints`.
    const RESOURCE: &'static str;
    /// Human name used in headings.
    const LABEL: &'static str;
    /// Column that date-range flags apply to when none is named.
    const DATE_COLUMN: Option<&'static str>;

    fn validate(&self) -> Result<(), ValidationError>;

    fn columns() -> Vec<ColumnDescriptor<Self>>;
}

pub(crate) fn require_id(id: RecordId) -> Result<(), ValidationError> {
    if id.0 > 0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveId(id.0))
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn check_email(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value.map(str::trim) {
        Some(email) if !email.is_empty() && !email.contains('@') => {
            Err(ValidationError::Invalid {
                field,
                reason: format!("`{email}` is not an email address"),
            })
        }
        _ => Ok(()),
    }
}

/// Date column rendered as `YYYY-MM-DD`, sortable.
pub(crate) fn date_column<E: 'static>(
    key: &str,
    header: &str,
    read: fn(&E) -> Option<DateTime<Utc>>,
) -> ColumnDescriptor<E> {
    ColumnDescriptor::new(key, header, move |record: &E| CellValue::date(read(record)))
        .sortable()
        .render_with(DateRenderer::new("%Y-%m-%d"))
}

/// Outcome counters of one ingestion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub received: usize,
    pub accepted: usize,
    pub malformed: usize,
    pub invalid: usize,
}

impl IngestReport {
    pub fn dropped(&self) -> usize {
        self.malformed + self.invalid
    }
}

#[derive(Debug, Clone)]
pub struct Ingested<E> {
    pub records: Vec<E>,
    pub report: IngestReport,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<serde_json::Value>),
    Wrapped { data: Vec<serde_json::Value> },
}

/// Decodes a list response, a bare array or `{ "data": [...] }`.
///
/// Only a body that is not a list at all is an error. Individual records that
/// do not decode or validate are dropped and counted.
pub fn ingest<E: Entity>(body: &[u8]) -> Result<Ingested<E>, serde_json::Error> {
    let items = match serde_json::from_slice::<Payload>(body)? {
        Payload::Bare(items) | Payload::Wrapped { data: items } => items,
    };

    let mut report = IngestReport {
        received: items.len(),
        ..IngestReport::default()
    };
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<E>(item) {
            Ok(record) => record,
            Err(err) => {
                warn!("dropping {} #{index}: {err}", E::LABEL);
                report.malformed += 1;
                continue;
            }
        };
        if let Err(err) = record.validate() {
            warn!("dropping {} {}: {err}", E::LABEL, record.id());
            report.invalid += 1;
            continue;
        }
        records.push(record);
    }

    report.accepted = records.len();
    debug!(
        "ingested {} {}: {} accepted, {} dropped",
        report.received,
        E::RESOURCE,
        report.accepted,
        report.dropped()
    );

    Ok(Ingested { records, report })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_wrapped_lists() {
        let bare = br#"[{"id": 1, "name": "Gaza"}]"#;
        let wrapped = br#"{"data": [{"id": 1, "name": "Gaza"}, {"id": 2, "name": "Rafah"}]}"#;

        assert_eq!(ingest::<Governorate>(bare).unwrap().records.len(), 1);
        assert_eq!(ingest::<Governorate>(wrapped).unwrap().records.len(), 2);
    }

    #[test]
    fn drops_malformed_and_invalid_records() {
        let body = br#"[
            {"id": 1, "name": "Gaza"},
            {"id": "two", "name": "Rafah"},
            {"id": 3, "name": "  "},
            {"id": -4, "name": "Khan Younis"}
        ]"#;

        let ingested = ingest::<Governorate>(body).unwrap();
        assert_eq!(ingested.records.len(), 1);
        assert_eq!(
            ingested.report,
            IngestReport {
                received: 4,
                accepted: 1,
                malformed: 1,
                invalid: 2,
            }
        );
        assert_eq!(ingested.report.dropped(), 3);
    }

    #[test]
    fn odd_date_shapes_keep_the_record() {
        let body = br#"[
            {"id": 1, "title": "Water", "createdAt": 1706745600000.0},
            {"id": 2, "title": "Tent", "createdAt": true},
            {"id": 3, "title": "Food", "createdAt": "2024-02-01"},
            {"id": 4, "title": "Rations", "createdAt": {"seconds": 1706745600}}
        ]"#;

        let ingested = ingest::<Complaint>(body).unwrap();
        assert_eq!(ingested.report.dropped(), 0);
        let dates: Vec<_> = ingested.records.iter().map(|c| c.created_at).collect();
        assert_eq!(dates[0], dates[2]);
        assert!(dates[0].is_some());
        assert_eq!((dates[1], dates[3]), (None, None));
    }

    #[test]
    fn non_list_body_is_an_error() {
        assert!(ingest::<Governorate>(br#"{"message": "oops"}"#).is_err());
        assert!(ingest::<Governorate>(b"not json").is_err());
    }

    #[test]
    fn email_check_only_applies_when_present() {
        assert!(check_email("email", None).is_ok());
        assert!(check_email("email", Some("")).is_ok());
        assert!(check_email("email", Some("aid@example.org")).is_ok());
        assert!(check_email("email", Some("nobody")).is_err());
    }
}
