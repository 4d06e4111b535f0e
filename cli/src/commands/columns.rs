//! `camps columns`: what can be filtered and sorted for an entity.

use camps_business::{entities::Entity, table::ColumnDescriptor};
use tabled::{Table, Tabled, settings::Style};

use crate::output::Output;

#[derive(Debug, Tabled)]
struct ColumnRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Header")]
    header: String,
    #[tabled(rename = "Sort")]
    sortable: &'static str,
    #[tabled(rename = "Search")]
    searchable: &'static str,
}

fn mark(flag: bool) -> &'static str {
    if flag { "yes" } else { "" }
}

fn rows<E: Entity>(columns: &[ColumnDescriptor<E>]) -> Vec<ColumnRow> {
    columns
        .iter()
        .map(|column| {
            let key = column.key();
            ColumnRow {
                key: if E::DATE_COLUMN == Some(key.as_str()) {
                    format!("{key} (dates)")
                } else {
                    key.to_string()
                },
                header: column.header().to_owned(),
                sortable: mark(column.is_sortable()),
                searchable: mark(column.is_searchable()),
            }
        })
        .collect()
}

pub fn run<E: Entity>() {
    let out = Output::new();
    out.header(format!("{} columns", E::LABEL));

    let mut table = Table::new(rows(&E::columns()));
    table.with(Style::rounded());
    out.print(table);
    out.dim("`--from`/`--to` apply to the (dates) column unless --date-column is given");
}

#[cfg(test)]
mod tests {
    use camps_business::entities::{Activity, Complaint};

    use super::*;

    #[test]
    fn date_column_is_marked() {
        let complaint_rows = rows(&Complaint::columns());
        assert!(complaint_rows.iter().any(|row| row.key == "createdAt (dates)"));
        let status = complaint_rows.iter().find(|row| row.key == "status").unwrap();
        assert_eq!((status.sortable, status.searchable), ("yes", ""));

        assert!(rows::<Activity>(&Activity::columns()).iter().any(|row| row.key == "date (dates)"));
    }
}
