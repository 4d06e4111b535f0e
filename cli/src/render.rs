//! Terminal renderer for a computed table page.

use camps_business::table::{ColumnDescriptor, TableView};
use tabled::{builder::Builder, settings::Style};

/// Draws the visible rows with one column per descriptor, in descriptor order.
pub fn render_table<R>(view: &TableView<R>, columns: &[ColumnDescriptor<R>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|column| column.header().to_owned()));
    for row in &view.visible_rows {
        builder.push_record(columns.iter().map(|column| column.render(row)));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// `Page 2 of 3 · rows 11-20 of 27 matching`
pub fn footer<R>(view: &TableView<R>) -> String {
    let first = view.first_row_number();
    let last = first + view.visible_rows.len().saturating_sub(1);
    format!(
        "Page {} of {} · rows {first}-{last} of {} matching",
        view.page_index + 1,
        view.page_count,
        view.total_filtered_count
    )
}

#[cfg(test)]
mod tests {
    use camps_business::table::CellValue;

    use super::*;

    #[derive(Debug, Clone)]
    struct Family {
        head: &'static str,
        members: u32,
    }

    fn columns() -> Vec<ColumnDescriptor<Family>> {
        vec![
            ColumnDescriptor::new("head", "Head of family", |f: &Family| CellValue::text(f.head)),
            ColumnDescriptor::new("members", "Members", |f: &Family| {
                CellValue::number(f64::from(f.members))
            }),
        ]
    }

    fn view(rows: Vec<Family>, page_index: usize, total: usize) -> TableView<Family> {
        TableView {
            visible_rows: rows,
            total_filtered_count: total,
            page_count: total.div_ceil(2),
            page_index,
            page_size: 2,
        }
    }

    #[test]
    fn headers_and_cells_follow_column_order() {
        let rendered = render_table(
            &view(
                vec![
                    Family {
                        head: "Mona",
                        members: 6,
                    },
                    Family {
                        head: "Yousef",
                        members: 3,
                    },
                ],
                0,
                2,
            ),
            &columns(),
        );

        let header = rendered.lines().nth(1).unwrap();
        assert!(header.find("Head of family").unwrap() < header.find("Members").unwrap());
        assert!(rendered.contains("Mona"));
        assert!(rendered.contains("Yousef"));
        assert!(rendered.starts_with('╭'));
    }

    #[test]
    fn footer_counts_from_one() {
        let last_page = view(
            vec![Family {
                head: "Salma",
                members: 4,
            }],
            2,
            5,
        );
        assert_eq!(footer(&last_page), "Page 3 of 3 · rows 5-5 of 5 matching");
    }
}
