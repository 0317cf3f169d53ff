//! Clipboard port - abstracts system clipboard access
//!
//! This port defines per-type reads, writes and clearing of the clipboard.
//! Change notifications arrive separately through [`ClipboardChangeHandler`](super::ClipboardChangeHandler).

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::clipboard::{ClipboardContent, MimeType};

/// System clipboard port
///
/// Reads are per content type so the caller decides the negotiation order.
/// Implementations may block on the windowing system; they are awaited one
/// type at a time.
#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// Read the clipboard as `mime`.
    ///
    /// Returns `Ok(None)` when the clipboard does not offer that type or
    /// offers it empty.
    async fn read_content(&self, mime: &MimeType) -> Result<Option<Bytes>>;

    /// Replace the clipboard with `content`.
    async fn write_content(&self, content: &ClipboardContent) -> Result<()>;

    /// Empty the clipboard.
    async fn clear(&self) -> Result<()>;
}
