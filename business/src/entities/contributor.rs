use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Entity, ValidationError, check_email, date_column, require_id, require_text};
use crate::table::{CellValue, ColumnDescriptor, FnRenderer, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contribution_type: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "super::dates::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Contributor {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Entity for Contributor {
    const RESOURCE: &'static str = "contributors";
    const LABEL: &'static str = "contributor";
    const DATE_COLUMN: Option<&'static str> = Some("createdAt");

    fn validate(&self) -> Result<(), ValidationError> {
        require_id(self.id)?;
        require_text("name", &self.name)?;
        check_email("email", self.email.as_deref())?;
        match self.amount {
            Some(amount) if amount < 0.0 => Err(ValidationError::Invalid {
                field: "amount",
                reason: format!("{amount} is negative"),
            }),
            _ => Ok(()),
        }
    }

    fn columns() -> Vec<ColumnDescriptor<Self>> {
        vec![
            ColumnDescriptor::new("id", "#", |c: &Self| CellValue::number(c.id.0 as f64)).sortable(),
            ColumnDescriptor::new("name", "Name", |c: &Self| CellValue::text(&c.name))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("email", "Email", |c: &Self| {
                CellValue::opt_text(c.email.as_deref())
            })
            .searchable(),
            ColumnDescriptor::new("phone", "Phone", |c: &Self| {
                CellValue::opt_text(c.phone.as_deref())
            })
            .searchable(),
            ColumnDescriptor::new("contributionType", "Type", |c: &Self| {
                CellValue::opt_text(c.contribution_type.as_deref())
            })
            .sortable(),
            ColumnDescriptor::new("amount", "Amount", |c: &Self| CellValue::opt_number(c.amount))
                .sortable()
                .render_with(FnRenderer(|_: &Self, value: &CellValue| {
                    value
                        .as_number()
                        .map_or_else(|| value.to_string(), |amount| format!("{amount:.2}"))
                })),
            date_column("createdAt", "Joined", |c: &Self| c.created_at),
        ]
    }
}
