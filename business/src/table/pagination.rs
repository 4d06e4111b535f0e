use std::{num::NonZeroUsize, ops::Range};

use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Current page position. The page size can never be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_index: usize,
    page_size: NonZeroUsize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Result<Self, TableError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(TableError::ZeroPageSize)?;
        Ok(Self {
            page_index: 0,
            page_size,
        })
    }

    pub fn with_page_index(mut self, page_index: usize) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// `ceil(total / page_size)`, zero for an empty set.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.get())
    }

    /// The page index pulled back into `[0, page_count - 1]`.
    pub fn clamped(&self, total: usize) -> Self {
        let last = self.page_count(total).saturating_sub(1);
        Self {
            page_index: self.page_index.min(last),
            page_size: self.page_size,
        }
    }

    /// Row range of the current page within `total` rows, after clamping.
    pub fn range(&self, total: usize) -> Range<usize> {
        let clamped = self.clamped(total);
        let start = clamped
            .page_index
            .saturating_mul(clamped.page_size.get())
            .min(total);
        let end = start.saturating_add(clamped.page_size.get()).min(total);
        start..end
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        self.page_size = NonZeroUsize::new(page_size).ok_or(TableError::ZeroPageSize)?;
        self.page_index = 0;
        Ok(())
    }

    /// Returns whether the index moved.
    pub fn next(&mut self, page_count: usize) -> bool {
        if self.page_index + 1 < page_count {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page_index`, clamped to the last page.
    pub fn jump_to(&mut self, page_index: usize, page_count: usize) {
        self.page_index = page_index.min(page_count.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PaginationState::new(0), Err(TableError::ZeroPageSize));
        let mut pagination = PaginationState::default();
        assert_eq!(pagination.set_page_size(0), Err(TableError::ZeroPageSize));
        assert_eq!(pagination.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_count_rounds_up() {
        let pagination = PaginationState::new(10).unwrap();
        assert_eq!(pagination.page_count(0), 0);
        assert_eq!(pagination.page_count(1), 1);
        assert_eq!(pagination.page_count(10), 1);
        assert_eq!(pagination.page_count(23), 3);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let pagination = PaginationState::new(10).unwrap().with_page_index(3);
        assert_eq!(pagination.clamped(12).page_index(), 1);
        assert_eq!(pagination.range(12), 10..12);
        assert_eq!(pagination.clamped(0).page_index(), 0);
        assert_eq!(pagination.range(0), 0..0);
    }

    #[test]
    fn navigation_is_bounded() {
        let mut pagination = PaginationState::new(5).unwrap();
        assert!(!pagination.previous());
        assert!(pagination.next(2));
        assert!(!pagination.next(2));
        assert_eq!(pagination.page_index(), 1);

        pagination.jump_to(9, 4);
        assert_eq!(pagination.page_index(), 3);
        pagination.jump_to(9, 0);
        assert_eq!(pagination.page_index(), 0);
    }

    #[test]
    fn resizing_returns_to_first_page() {
        let mut pagination = PaginationState::new(5).unwrap().with_page_index(2);
        pagination.set_page_size(20).unwrap();
        assert_eq!(pagination.page_index(), 0);
        assert_eq!(pagination.page_size(), 20);
    }
}
