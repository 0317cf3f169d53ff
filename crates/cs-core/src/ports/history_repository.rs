use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::{ClipboardContent, ClipboardEntry};

/// Persistence gateway for the history.
///
/// The snapshot written by [`save_history`](Self::save_history) is meant to
/// stay small: non-text payloads are stored separately through
/// [`store_binary_payload`](Self::store_binary_payload) when they are captured.
#[async_trait]
pub trait HistoryRepositoryPort: Send + Sync {
    /// Load the persisted history, in navigation order.
    ///
    /// Called once at startup. A missing history is an empty list.
    async fn load_history(&self) -> Result<Vec<ClipboardEntry>>;

    /// Replace the persisted history with `entries`, in navigation order.
    async fn save_history(&self, entries: &[ClipboardEntry]) -> Result<()>;

    /// Keep the raw bytes of a non-text capture. Must be idempotent.
    async fn store_binary_payload(&self, content: &ClipboardContent) -> Result<()>;

    /// Drop the raw bytes kept for `content`. Missing payloads are not an error.
    async fn delete_binary_payload(&self, content: &ClipboardContent) -> Result<()>;
}
