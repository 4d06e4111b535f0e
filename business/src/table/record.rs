use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend identifier of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row the table can show. The view never mutates records.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}
