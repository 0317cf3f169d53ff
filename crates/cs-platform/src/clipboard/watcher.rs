//! Bridges `clipboard-rs` change callbacks into the runtime event bus.
//!
//! The callback runs on the watcher's own thread and must not block, so it
//! only enqueues a notification. Reading the clipboard is left to the
//! handler on the async side.

use clipboard_rs::ClipboardHandler;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::ipc::PlatformEvent;
use crate::runtime::event_bus::PlatformEventSender;

pub struct ClipboardWatcher {
    sender: PlatformEventSender,
}

impl ClipboardWatcher {
    pub fn new(sender: PlatformEventSender) -> Self {
        Self { sender }
    }

    /// Enqueues a change notification. Returns `false` if the runtime is gone.
    pub fn notify(&self) -> bool {
        match self.sender.try_send(PlatformEvent::ClipboardChanged) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("event bus full, change notification coalesced");
                true
            }
            Err(TrySendError::Closed(_)) => {
                warn!("event bus closed, dropping clipboard change");
                false
            }
        }
    }
}

impl ClipboardHandler for ClipboardWatcher {
    fn on_clipboard_change(&mut self) {
        self.notify();
    }
}
