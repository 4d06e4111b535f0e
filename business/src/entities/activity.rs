use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, Record, RecordId};

/// A field activity carried out in a camp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub camp: Option<String>,
    #[serde(default)]
    pub governorate: Option<String>,
    #[serde(default)]
    pub beneficiaries: Option<u32>,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub date: Option<DateTime<Utc>>,
}

impl Record for Activity {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Activity {
    const RESOURCE: &'static str = "activities";
    const LABEL: &'static str = "activity";
    const DATE_COLUMN: Option<&'static str> = Some("date");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("title", &self.title)
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |a: &Self| CellValue::number(a.id.0 as f64)).sortable(),
            ColumnDescriptor::new("title", "Title", |a: &Self| CellValue::text(&a.title))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("description", "Description", |a: &Self| {
                CellValue::opt_text(a.description.as_deref())
            })
            .searchable(),
            ColumnDescriptor::new("camp", "Camp", |a: &Self| {
                CellValue::opt_text(a.camp.as_deref())
            })
            .searchable()
            .sortable(),
            ColumnDescriptor::new("governorate", "Governorate", |a: &Self| {
                CellValue::opt_text(a.governorate.as_deref())
            })
            .sortable(),
            ColumnDescriptor::new("beneficiaries", "Beneficiaries", |a: &Self| {
                CellValue::opt_number(a.beneficiaries)
            })
            .sortable(),
            date_column("date", "Date", |a: &Self| a.date),
        ]
    }
}
