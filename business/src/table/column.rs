//! Column descriptors: how one generic table reads, labels and renders a column.

use std::{fmt, sync::Arc};

use ustr::Ustr;

use super::CellValue;

/// Turns one record's cell into display text.
///
/// Renderers only see the record and the already extracted value, so the same
/// descriptor works for a terminal table, an HTML table or a test assertion.
pub trait CellRenderer<R>: Send + Sync {
    fn render(&self, record: &R, value: &CellValue) -> String;
}

/// Renders the value through its `Display` impl.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayRenderer;

impl<R> CellRenderer<R> for DisplayRenderer {
    fn render(&self, _record: &R, value: &CellValue) -> String {
        value.to_string()
    }
}

/// Renders date cells with a `chrono` format string.
#[derive(Debug, Clone)]
pub struct DateRenderer {
    format: &'static str,
}

impl DateRenderer {
    pub const fn new(format: &'static str) -> Self {
        Self { format }
    }
}

impl<R> CellRenderer<R> for DateRenderer {
    fn render(&self, _record: &R, value: &CellValue) -> String {
        match value.as_date() {
            Some(date) => date.format(self.format).to_string(),
            None => CellValue::Missing.to_string(),
        }
    }
}

/// Adapts a closure into a [`CellRenderer`].
pub struct FnRenderer<F>(pub F);

impl<R, F> CellRenderer<R> for FnRenderer<F>
where
    F: Fn(&R, &CellValue) -> String + Send + Sync,
{
    fn render(&self, record: &R, value: &CellValue) -> String {
        (self.0)(record, value)
    }
}

type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Configuration of one table column for records of type `R`.
pub struct ColumnDescriptor<R> {
    key: Ustr,
    header: String,
    accessor: Accessor<R>,
    renderer: Arc<dyn CellRenderer<R>>,
    sortable: bool,
    searchable: bool,
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            renderer: Arc::clone(&self.renderer),
            sortable: self.sortable,
            searchable: self.searchable,
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .finish_non_exhaustive()
    }
}

impl<R: 'static> ColumnDescriptor<R> {
    /// A plain column: not sortable, not searched, rendered via `Display`.
    pub fn new(
        key: &str,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: Ustr::from(key),
            header: header.into(),
            accessor: Arc::new(accessor),
            renderer: Arc::new(DisplayRenderer),
            sortable: false,
            searchable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Includes the column in the free-text filter.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn render_with(mut self, renderer: impl CellRenderer<R> + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }
}

impl<R> ColumnDescriptor<R> {
    pub fn key(&self) -> Ustr {
        self.key
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn value(&self, record: &R) -> CellValue {
        (self.accessor)(record)
    }

    pub fn render(&self, record: &R) -> String {
        self.renderer.render(record, &self.value(record))
    }
}

/// Looks a column up by key.
pub fn find_column<'a, R>(
    columns: &'a [ColumnDescriptor<R>],
    key: &str,
) -> Option<&'a ColumnDescriptor<R>> {
    columns.iter().find(|column| column.key.as_str() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Family {
        head: &'static str,
        members: u32,
    }

    fn columns() -> Vec<ColumnDescriptor<Family>> {
        vec![
            ColumnDescriptor::new("head", "Head of family", |f: &Family| CellValue::text(f.head))
                .searchable()
                .sortable(),
            ColumnDescriptor::new("members", "Members", |f: &Family| CellValue::number(f.members))
                .render_with(FnRenderer(|_: &Family, value: &CellValue| {
                    format!("{value} people")
                })),
        ]
    }

    #[test]
    fn descriptor_reads_and_renders() {
        let family = Family {
            head: "Mona",
            members: 6,
        };
        let columns = columns();

        assert_eq!(columns[0].render(&family), "Mona");
        assert_eq!(columns[1].render(&family), "6 people");
        assert_eq!(columns[1].value(&family), CellValue::number(6));
        assert!(columns[0].is_searchable() && columns[0].is_sortable());
        assert!(!columns[1].is_searchable() && !columns[1].is_sortable());
    }

    #[test]
    fn find_by_key() {
        let columns = columns();
        assert_eq!(find_column(&columns, "members").map(|c| c.header()), Some("Members"));
        assert!(find_column(&columns, "unknown").is_none());
    }

    #[test]
    fn date_renderer_falls_back_to_placeholder() {
        let family = Family {
            head: "Mona",
            members: 1,
        };
        let renderer = DateRenderer::new("%d/%m/%Y");
        assert_eq!(
            renderer.render(&family, &CellValue::text("2024-02-01")),
            "01/02/2024"
        );
        assert_eq!(renderer.render(&family, &CellValue::text("soon")), "-");
    }
}
