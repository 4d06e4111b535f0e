//! The table pipeline: text filter, column predicates, stable sort, paginate.

use std::cmp::Ordering;

use log::debug;

use super::{
    CellValue, ColumnDescriptor, ColumnPredicate, FilterCriteria, PaginationState, SortDescriptor,
    SortDirection, find_column,
};

/// One computed page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<R> {
    pub visible_rows: Vec<R>,
    pub total_filtered_count: usize,
    pub page_count: usize,
    /// Index after clamping into the available pages.
    pub page_index: usize,
    pub page_size: usize,
}

impl<R> TableView<R> {
    pub fn is_empty(&self) -> bool {
        self.total_filtered_count == 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// 1-based number of the first visible row, 0 when empty.
    pub fn first_row_number(&self) -> usize {
        if self.visible_rows.is_empty() {
            0
        } else {
            self.page_index * self.page_size + 1
        }
    }
}

/// Computes the visible page.
///
/// Pure: the same inputs always produce the same view. `records` keeps its
/// fetch order and is only read.
pub fn apply<R: Clone>(
    records: &[R],
    columns: &[ColumnDescriptor<R>],
    criteria: &FilterCriteria,
    sort: &SortDescriptor,
    pagination: &PaginationState,
) -> TableView<R> {
    let mut rows = filter(records, columns, criteria);
    sort_rows(&mut rows, columns, sort);

    let total_filtered_count = rows.len();
    let clamped = pagination.clamped(total_filtered_count);
    let range = clamped.range(total_filtered_count);

    debug!(
        "table pipeline: {} of {} records match, page {} of {}",
        total_filtered_count,
        records.len(),
        clamped.page_index(),
        clamped.page_count(total_filtered_count)
    );

    TableView {
        visible_rows: rows[range].iter().copied().cloned().collect(),
        total_filtered_count,
        page_count: clamped.page_count(total_filtered_count),
        page_index: clamped.page_index(),
        page_size: clamped.page_size(),
    }
}

fn filter<'r, R>(
    records: &'r [R],
    columns: &[ColumnDescriptor<R>],
    criteria: &FilterCriteria,
) -> Vec<&'r R> {
    let needle = criteria.needle();
    let searchable: Vec<&ColumnDescriptor<R>> =
        columns.iter().filter(|c| c.is_searchable()).collect();

    let predicates: Vec<(&ColumnPredicate, &ColumnDescriptor<R>)> = criteria
        .predicates
        .iter()
        .filter(|predicate| predicate.is_active())
        .filter_map(|predicate| match find_column(columns, predicate.column().as_str()) {
            Some(column) => Some((predicate, column)),
            None => {
                debug!("ignoring predicate on unknown column `{}`", predicate.column());
                None
            }
        })
        .collect();

    records
        .iter()
        .filter(|record| match &needle {
            Some(needle) => searchable.iter().any(|column| {
                column
                    .value(record)
                    .search_text()
                    .is_some_and(|text| text.to_lowercase().contains(needle.as_str()))
            }),
            None => true,
        })
        .filter(|record| {
            predicates
                .iter()
                .all(|(predicate, column)| predicate.matches(&column.value(record)))
        })
        .collect()
}

fn sort_rows<R>(rows: &mut Vec<&R>, columns: &[ColumnDescriptor<R>], sort: &SortDescriptor) {
    let keys: Vec<(&ColumnDescriptor<R>, SortDirection)> = sort
        .keys()
        .iter()
        .filter_map(|key| match find_column(columns, key.column.as_str()) {
            Some(column) if column.is_sortable() => Some((column, key.direction)),
            Some(_) => {
                debug!("column `{}` is not sortable", key.column);
                None
            }
            None => {
                debug!("ignoring sort on unknown column `{}`", key.column);
                None
            }
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    let mut keyed: Vec<(Vec<CellValue>, &R)> = rows
        .drain(..)
        .map(|row| {
            let values = keys.iter().map(|(column, _)| column.value(row)).collect();
            (values, row)
        })
        .collect();

    // `sort_by` is stable, equal keys keep fetch order.
    keyed.sort_by(|(a, _), (b, _)| {
        a.iter()
            .zip(b)
            .zip(&keys)
            .map(|((a, b), (_, direction))| compare_cells(a, b, *direction))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    rows.extend(keyed.into_iter().map(|(_, row)| row));
}

/// Missing cells go last whatever the direction.
fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.cmp_for_sort(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}
