use camps_states::State;

use super::{ColumnPredicate, FilterCriteria, PaginationState, SortDescriptor, TableError};

/// User-controlled inputs of a table view.
///
/// Every filter mutation and page-size change moves back to the first page.
/// Page navigation is bounded by the page count of the last computed view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableControls {
    criteria: FilterCriteria,
    sort: SortDescriptor,
    pagination: PaginationState,
    last_page_count: usize,
}

impl State for TableControls {}

impl TableControls {
    pub fn new(page_size: usize) -> Result<Self, TableError> {
        Ok(Self {
            pagination: PaginationState::new(page_size)?,
            ..Self::default()
        })
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_sort(mut self, sort: SortDescriptor) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page_index(mut self, page_index: usize) -> Self {
        self.pagination = self.pagination.with_page_index(page_index);
        self
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> &SortDescriptor {
        &self.sort
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn page_count(&self) -> usize {
        self.last_page_count
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.pagination.reset();
    }

    pub fn set_predicate(&mut self, predicate: ColumnPredicate) {
        self.criteria.set_predicate(predicate);
        self.pagination.reset();
    }

    pub fn remove_predicate(&mut self, column: &str) {
        if self.criteria.remove_predicate(column) {
            self.pagination.reset();
        }
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
        self.pagination.reset();
    }

    pub fn toggle_sort(&mut self, column: &str) {
        self.sort.toggle(column);
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next(self.last_page_count)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    pub fn jump_to_page(&mut self, page_index: usize) {
        self.pagination.jump_to(page_index, self.last_page_count);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        self.pagination.set_page_size(page_size)
    }

    /// Records the outcome of a recompute: the clamped index and page count.
    pub fn observe_page(&mut self, page_index: usize, page_count: usize) {
        self.pagination = self.pagination.with_page_index(page_index);
        self.last_page_count = page_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_changes_reset_page() {
        let mut controls = TableControls::default();
        controls.observe_page(2, 5);

        controls.set_search("ahmed");
        assert_eq!(controls.pagination().page_index(), 0);

        controls.observe_page(2, 5);
        controls.set_predicate(ColumnPredicate::equals("status", "pending"));
        assert_eq!(controls.pagination().page_index(), 0);

        controls.observe_page(2, 5);
        controls.clear_filters();
        assert_eq!(controls.pagination().page_index(), 0);
        assert!(controls.criteria().is_empty());
    }

    #[test]
    fn sorting_keeps_page() {
        let mut controls = TableControls::default();
        controls.observe_page(1, 3);
        controls.toggle_sort("name");
        assert_eq!(controls.pagination().page_index(), 1);
        assert!(!controls.sort().is_empty());
    }

    #[test]
    fn navigation_uses_last_page_count() {
        let mut controls = TableControls::new(10).unwrap();
        assert!(!controls.next_page());

        controls.observe_page(0, 3);
        assert!(controls.next_page());
        assert!(controls.next_page());
        assert!(!controls.next_page());
        assert!(controls.previous_page());

        controls.jump_to_page(40);
        assert_eq!(controls.pagination().page_index(), 2);
    }

    #[test]
    fn zero_page_size_is_an_error() {
        assert_eq!(TableControls::new(0), Err(TableError::ZeroPageSize));
        let mut controls = TableControls::default();
        assert!(controls.set_page_size(0).is_err());
    }
}
