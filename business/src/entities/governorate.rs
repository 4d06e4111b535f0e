use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Governorate {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub camps_count: Option<u32>,
    #[serde(default)]
    pub families_count: Option<u32>,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Governorate {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Governorate {
    const RESOURCE: &'static str = "governorates";
    const LABEL: &'static str = "governorate";
    const DATE_COLUMN: Option<&'static str> = Some("createdAt");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("name", &self.name)
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |g: &Self| CellValue::number(g.id.0 as f64)).sortable(),
            ColumnDescriptor::new("name", "Governorate", |g: &Self| CellValue::text(&g.name))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("campsCount", "Camps", |g: &Self| {
                CellValue::opt_number(g.camps_count)
            })
            .sortable(),
            ColumnDescriptor::new("familiesCount", "Families", |g: &Self| {
                CellValue::opt_number(g.families_count)
            })
            .sortable(),
            date_column("createdAt", "Created", |g: &Self| g.created_at),
        ]
    }
}
