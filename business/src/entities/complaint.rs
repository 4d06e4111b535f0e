use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, FnRenderer, Record, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    #[serde(alias = "in-progress")]
    InProgress,
    Resolved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        })
    }
}

/// A complaint filed by a camp resident.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub camp: Option<String>,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Complaint {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Complaint {
    const RESOURCE: &'static str = "complaints";
    const LABEL: &'static str = "complaint";
    const DATE_COLUMN: Option<&'static str> = Some("createdAt");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("title", &self.title)
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |c: &Self| CellValue::number(c.id.0 as f64)).sortable(),
            ColumnDescriptor::new("title", "Subject", |c: &Self| CellValue::text(&c.title))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("senderName", "Sender", |c: &Self| {
                CellValue::opt_text(c.sender_name.as_deref())
            })
            .searchable()
            .sortable(),
            ColumnDescriptor::new("camp", "Camp", |c: &Self| {
                CellValue::opt_text(c.camp.as_deref())
            })
            .searchable()
            .sortable(),
            ColumnDescriptor::new("status", "Status", |c: &Self| {
                CellValue::text(c.status.to_string())
            })
            .sortable()
            .render_with(FnRenderer(|c: &Self, _: &CellValue| match c.status {
                ComplaintStatus::Pending => "● pending".to_owned(),
                ComplaintStatus::InProgress => "◐ in progress".to_owned(),
                ComplaintStatus::Resolved => "✔ resolved".to_owned(),
                ComplaintStatus::Rejected => "✘ rejected".to_owned(),
                ComplaintStatus::Unknown => "? unknown".to_owned(),
            })),
            date_column("createdAt", "Filed", |c: &Self| c.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::ingest, table::find_column};

    #[test]
    fn unknown_status_does_not_drop_the_record() {
        let body = br#"[
            {"id": 1, "title": "Water", "status": "in_progress", "createdAt": "2024-01-10"},
            {"id": 2, "title": "Tents", "status": "escalated"},
            {"id": 3, "title": "Food"}
        ]"#;

        let complaints = ingest::<Complaint>(body).unwrap().records;
        let statuses: Vec<ComplaintStatus> = complaints.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                ComplaintStatus::InProgress,
                ComplaintStatus::Unknown,
                ComplaintStatus::Pending
            ]
        );
    }

    #[test]
    fn status_column_renders_badge() {
        let complaint = ingest::<Complaint>(br#"[{"id": 9, "title": "Power", "status": "resolved"}]"#)
            .unwrap()
            .records
            .remove(0);
        let columns = Complaint::columns();
        let status = find_column(&columns, "status").unwrap();

        assert_eq!(status.value(&complaint), CellValue::text("resolved"));
        assert_eq!(status.render(&complaint), "✔ resolved");
    }
}
