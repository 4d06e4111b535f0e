//! Fetched records as a reactive state.

use camps_states::{State, StateCtx, Updater};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::{
    api::{ApiClient, ApiError},
    entities::Entity,
    table::{Record, sync_view},
};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus<R> {
    Idle,
    Loading,
    Loaded(Vec<R>),
    Failed(String),
}

impl<R> Default for FetchStatus<R> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Records of one type plus the outcome of the last fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsState<R> {
    pub status: FetchStatus<R>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Records dropped at ingestion by the last fetch.
    pub dropped: usize,
}

impl<R> Default for RecordsState<R> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            fetched_at: None,
            dropped: 0,
        }
    }
}

impl<R: Record> State for RecordsState<R> {}

impl<R> RecordsState<R> {
    pub fn loading() -> Self {
        Self {
            status: FetchStatus::Loading,
            ..Self::default()
        }
    }

    pub fn loaded(records: Vec<R>, dropped: usize) -> Self {
        Self {
            status: FetchStatus::Loaded(records),
            fetched_at: Some(Utc::now()),
            dropped,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Failed(reason.into()),
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[R] {
        match &self.status {
            FetchStatus::Loaded(records) => records,
            _ => &[],
        }
    }
}

/// Fetches `E` and queues the outcome on `updater`.
///
/// Holds no borrow of the context, so it can run on a spawned task; the
/// records land on the owner's next `sync_computes`.
pub async fn fetch_records<E: Entity>(
    client: &ApiClient,
    updater: &Updater,
) -> Result<(), ApiError> {
    let (next, outcome) = match client.list::<E>().await {
        Ok(ingested) => {
            let dropped = ingested.report.dropped();
            info!(
                "fetched {} {} ({dropped} dropped)",
                ingested.report.accepted,
                E::RESOURCE
            );
            (RecordsState::loaded(ingested.records, dropped), Ok(()))
        }
        Err(err) => (RecordsState::failed(err.to_string()), Err(err)),
    };

    if !updater.set(next) {
        debug!("{} view was dropped before the fetch finished", E::LABEL);
    }
    outcome
}

/// Fetches `E` into `ctx` and recomputes its table view.
///
/// The view shows `Loading` while the request is in flight. Dropping the
/// returned future abandons the request and leaves that state in place.
pub async fn refresh_records<E: Entity>(
    ctx: &mut StateCtx,
    client: &ApiClient,
) -> Result<(), ApiError> {
    if let Err(err) = ctx
        .set_state(RecordsState::<E>::loading())
        .and_then(|()| sync_view::<E>(ctx))
    {
        warn!("{} view is not set up: {err}", E::LABEL);
    }

    let outcome = fetch_records::<E>(client, &ctx.updater()).await;

    if let Err(err) = sync_view::<E>(ctx) {
        warn!("{} view is not set up: {err}", E::LABEL);
    }
    outcome
}
