//! Business layer of the camps admin client.
//!
//! - [`table`]: the generic filter, sort and paginate pipeline plus its
//!   reactive owner.
//! - [`entities`]: record types of each admin screen and the validation
//!   boundary they cross on ingestion.
//! - [`api`] / [`http`]: REST access to the backend.
//! - [`session`]: injected storage for the auth token.

pub mod api;
pub mod config;
pub mod entities;
pub mod fetch;
pub mod http;
pub mod session;
pub mod table;

pub use api::{ApiClient, ApiError};
pub use config::{BusinessConfig, ConfigError};
pub use fetch::{FetchStatus, RecordsState, fetch_records, refresh_records};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionError, SessionStore};
