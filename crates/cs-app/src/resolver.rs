use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::{debug, trace};

use cs_core::ports::{HistoryRepositoryPort, SystemClipboardPort};
use cs_core::{ClipboardContent, MimeType};

/// Picks the best representation of the current clipboard.
///
/// Types are probed one at a time in priority order; the first one the
/// clipboard offers with non-empty bytes wins. A probe that fails counts as
/// "not offered" so one broken type cannot block capture of the others.
pub struct ContentResolver {
    clipboard: Arc<dyn SystemClipboardPort>,
    repository: Arc<dyn HistoryRepositoryPort>,
}

impl ContentResolver {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        repository: Arc<dyn HistoryRepositoryPort>,
    ) -> Self {
        Self {
            clipboard,
            repository,
        }
    }

    /// Returns `Ok(None)` when no type in `priority` yields content.
    ///
    /// Non-text winners have their bytes handed to the repository before
    /// returning; a failure there is the only error this returns.
    pub async fn resolve(
        &self,
        priority: &[MimeType],
        strip_text: bool,
    ) -> Result<Option<ClipboardContent>> {
        for mime in priority {
            let bytes = match self.clipboard.read_content(mime).await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => {
                    trace!(mime = %mime, "clipboard does not offer type");
                    continue;
                }
                Err(err) => {
                    debug!(mime = %mime, error = %err, "clipboard probe failed, trying next type");
                    continue;
                }
            };

            let bytes = if strip_text && mime.is_text_plain() {
                strip_whitespace(bytes)
            } else {
                bytes
            };
            if bytes.is_empty() {
                continue;
            }

            let content = ClipboardContent::new(mime.clone(), bytes);
            if !content.is_text() {
                self.repository
                    .store_binary_payload(&content)
                    .await
                    .with_context(|| format!("failed to store {} payload", content.mime))?;
            }

            debug!(mime = %content.mime, size = content.size_bytes(), "resolved clipboard content");
            return Ok(Some(content));
        }

        Ok(None)
    }
}

fn strip_whitespace(bytes: Bytes) -> Bytes {
    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.len() == text.len() {
                bytes
            } else {
                Bytes::copy_from_slice(trimmed.as_bytes())
            }
        }
        Err(_) => Bytes::copy_from_slice(bytes.trim_ascii()),
    }
}
