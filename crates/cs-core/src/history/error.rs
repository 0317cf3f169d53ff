use thiserror::Error;

use crate::ids::EntryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The handle does not name an entry in the store (deleted or evicted).
    #[error("clipboard entry not found: {0}")]
    EntryNotFound(EntryId),
}
