//! Reactive owner of a table view.
//!
//! [`TableViewCompute`] re-runs the pipeline whenever the fetched records or
//! the [`TableControls`] change. [`sync_view`] then writes the clamped page
//! back into the controls so navigation never points past the last page.

use std::{any::Any, fmt, sync::Arc};

use camps_states::{Compute, ComputeDeps, Dep, Error, StateCtx};
use log::debug;

use super::{ColumnDescriptor, Record, TableControls, TableError, TableView, apply};
use crate::fetch::{FetchStatus, RecordsState};

/// What the table area should display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableViewStatus {
    /// Nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Failed(String),
    /// Records loaded but the criteria exclude all of them.
    NoResults,
    Rows,
}

pub struct TableViewCompute<R> {
    columns: Arc<[ColumnDescriptor<R>]>,
    status: TableViewStatus,
    view: Option<TableView<R>>,
}

impl<R> fmt::Debug for TableViewCompute<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableViewCompute")
            .field("columns", &self.columns.len())
            .field("status", &self.status)
            .field("rows", &self.view.as_ref().map(|v| v.visible_rows.len()))
            .finish()
    }
}

impl<R: Record> TableViewCompute<R> {
    pub fn new(columns: impl Into<Arc<[ColumnDescriptor<R>]>>) -> Self {
        Self {
            columns: columns.into(),
            status: TableViewStatus::Idle,
            view: None,
        }
    }

    pub fn status(&self) -> &TableViewStatus {
        &self.status
    }

    /// The computed page, present once records are loaded.
    pub fn view(&self) -> Option<&TableView<R>> {
        self.view.as_ref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }
}

impl<R: Record> Compute for TableViewCompute<R> {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::new()
            .state::<RecordsState<R>>()
            .state::<TableControls>()
    }

    fn compute(&mut self, deps: Dep<'_>) {
        let (Some(records), Some(controls)) =
            (deps.state::<RecordsState<R>>(), deps.state::<TableControls>())
        else {
            self.status = TableViewStatus::Idle;
            self.view = None;
            return;
        };

        match &records.status {
            FetchStatus::Idle => {
                self.status = TableViewStatus::Idle;
                self.view = None;
            }
            FetchStatus::Loading => {
                self.status = TableViewStatus::Loading;
                self.view = None;
            }
            FetchStatus::Failed(reason) => {
                self.status = TableViewStatus::Failed(reason.clone());
                self.view = None;
            }
            FetchStatus::Loaded(rows) => {
                let view = apply(
                    rows,
                    &self.columns,
                    controls.criteria(),
                    controls.sort(),
                    controls.pagination(),
                );
                self.status = if view.is_empty() {
                    TableViewStatus::NoResults
                } else {
                    TableViewStatus::Rows
                };
                self.view = Some(view);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builds a context owning the records, the controls and the view of `R`.
pub fn table_view_ctx<R: Record>(
    columns: impl Into<Arc<[ColumnDescriptor<R>]>>,
    page_size: usize,
) -> Result<StateCtx, TableError> {
    let mut ctx = StateCtx::new();
    ctx.add_state(RecordsState::<R>::default());
    ctx.add_state(TableControls::new(page_size)?);
    ctx.record_compute(TableViewCompute::<R>::new(columns));
    Ok(ctx)
}

/// Recomputes the view of `R`, then stores the clamped page in the controls.
pub fn sync_view<R: Record>(ctx: &mut StateCtx) -> Result<(), Error> {
    ctx.sync_computes()?;

    let Some((page_index, page_count)) = ctx
        .try_compute::<TableViewCompute<R>>()?
        .view()
        .map(|view| (view.page_index, view.page_count))
    else {
        return Ok(());
    };

    let controls = ctx.try_state::<TableControls>()?;
    if controls.pagination().page_index() == page_index && controls.page_count() == page_count {
        return Ok(());
    }

    debug!("table view moved to page {page_index} of {page_count}");
    ctx.update::<TableControls>(|controls| controls.observe_page(page_index, page_count))?;
    ctx.sync_computes()
}
