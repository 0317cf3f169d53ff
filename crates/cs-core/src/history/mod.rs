//! The bounded, deduplicated clipboard history.
mod error;
mod event;
mod store;

pub use error::HistoryError;
pub use event::HistoryEvent;
pub use store::{EntryStore, InsertOutcome};
