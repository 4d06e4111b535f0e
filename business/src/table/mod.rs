//! Generic client-side table: filter, sort and paginate any [`Record`] type
//! through [`ColumnDescriptor`]s.

mod column;
mod controls;
mod criteria;
mod pagination;
mod pipeline;
mod record;
mod sort;
mod value;
mod view_compute;

pub use column::{
    CellRenderer, ColumnDescriptor, DateRenderer, DisplayRenderer, FnRenderer, find_column,
};
pub use controls::TableControls;
pub use criteria::{ColumnPredicate, DateRange, FilterCriteria};
pub use pagination::{DEFAULT_PAGE_SIZE, PaginationState, TableError};
pub use pipeline::{TableView, apply};
pub use record::{Record, RecordId};
pub use sort::{SortDescriptor, SortDirection, SortKey};
pub use value::{CellValue, parse_datetime};
pub use view_compute::{TableViewCompute, TableViewStatus, sync_view, table_view_ctx};
