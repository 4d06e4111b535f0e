use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, check_email, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: RecordId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Partner {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Partner {
    const RESOURCE: &'static str = "partners";
    const LABEL: &'static str = "partner";
    const DATE_COLUMN: Option<&'static str> = Some("createdAt");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("name", &self.name)?;
        check_email("email", self.email.as_deref())
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |p: &Self| CellValue::number(p.id.0 as f64)).sortable(),
            ColumnDescriptor::new("name", "Partner", |p: &Self| CellValue::text(&p.name))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("type", "Type", |p: &Self| {
                CellValue::opt_text(p.kind.as_deref())
            })
            .searchable()
            .sortable(),
            ColumnDescriptor::new("email", "Email", |p: &Self| {
                CellValue::opt_text(p.email.as_deref())
            })
            .searchable(),
            ColumnDescriptor::new("website", "Website", |p: &Self| {
                CellValue::opt_text(p.website.as_deref())
            }),
            date_column("createdAt", "Since", |p: &Self| p.created_at),
        ]
    }
}
