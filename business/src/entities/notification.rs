use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Notification {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Notification {
    const RESOURCE: &'static str = "notifications";
    const LABEL: &'static str = "notification";
    const DATE_COLUMN: Option<&'static str> = Some("createdAt");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("title", &self.title)
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |n: &Self| CellValue::number(n.id.0 as f64)).sortable(),
            ColumnDescriptor::new("title", "Title", |n: &Self| CellValue::text(&n.title))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("message", "Message", |n: &Self| {
                CellValue::opt_text(n.message.as_deref())
            })
            .searchable(),
            ColumnDescriptor::new("recipient", "Recipient", |n: &Self| {
                CellValue::opt_text(n.recipient.as_deref())
            })
            .searchable()
            .sortable(),
            ColumnDescriptor::new("isRead", "Read", |n: &Self| CellValue::Bool(n.is_read)).sortable(),
            date_column("createdAt", "Sent", |n: &Self| n.created_at),
        ]
    }
}
