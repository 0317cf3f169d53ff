//! Clipboard change handler port
//!
//! This port defines the callback interface for clipboard change events
//! from the platform layer:
//! - Platform layer (low-level) depends on this abstraction
//! - App layer (high-level) implements this interface

use anyhow::Result;

/// Callback handler for clipboard change events.
///
/// The notification carries no payload. The handler reads the clipboard
/// itself, which lets it skip reads entirely (privacy mode, a refresh
/// already in flight).
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    /// Called when clipboard content changes.
    async fn on_clipboard_changed(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ClipboardChangeHandler for CountingHandler {
        async fn on_clipboard_changed(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn handler_is_usable_as_trait_object() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler: Arc<dyn ClipboardChangeHandler> = Arc::new(CountingHandler {
            calls: calls.clone(),
        });

        handler.on_clipboard_changed().await.unwrap();
        handler.on_clipboard_changed().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
