use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, Record, RecordId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        })
    }
}

/// A camp representative account awaiting or holding approval.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub camp: Option<String>,
    #[serde(default)]
    pub governorate: Option<String>,
    #[serde(default)]
    pub families_count: Option<u32>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Representative {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Representative {
    const RESOURCE: &'static str = "representatives";
    const LABEL: &'static str = "representative";
    const DATE_COLUMN: Option<&'static str> = Some("createdAt");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("name", &self.name)?;
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            let valid = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
            if !valid {
                return Err(ValidationError::Invalid {
                    field: "phone",
                    reason: format!("`{phone}` is not a phone number"),
                });
            }
        }
        Ok(())
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |r: &Self| CellValue::number(r.id.0 as f64)).sortable(),
            ColumnDescriptor::new("name", "Name", |r: &Self| CellValue::text(&r.name))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("phone", "Phone", |r: &Self| {
                CellValue::opt_text(r.phone.as_deref())
            })
            .searchable(),
            ColumnDescriptor::new("camp", "Camp", |r: &Self| {
                CellValue::opt_text(r.camp.as_deref())
            })
            .searchable()
            .sortable(),
            ColumnDescriptor::new("governorate", "Governorate", |r: &Self| {
                CellValue::opt_text(r.governorate.as_deref())
            })
            .sortable(),
            ColumnDescriptor::new("familiesCount", "Families", |r: &Self| {
                CellValue::opt_number(r.families_count)
            })
            .sortable(),
            ColumnDescriptor::new("status", "Status", |r: &Self| {
                CellValue::text(r.status.to_string())
            })
            .sortable(),
            date_column("createdAt", "Registered", |r: &Self| r.created_at),
        ]
    }
}
