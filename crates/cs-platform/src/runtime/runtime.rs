use std::sync::Arc;

use anyhow::Result;
use clipboard_rs::{ClipboardWatcher as RSClipboardWatcher, ClipboardWatcherContext, WatcherShutdown};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

use cs_core::ports::ClipboardChangeHandler;

use super::event_bus::{PlatformCommandReceiver, PlatformEventReceiver, PlatformEventSender};
use crate::clipboard::ClipboardWatcher;
use crate::ipc::{PlatformCommand, PlatformEvent};

const WATCHER_STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Owns the clipboard watcher and forwards its notifications to the handler.
///
/// Notifications are handled one at a time on the runtime task; commands
/// arrive on a separate channel so the binary can start the watcher and stop
/// the loop.
pub struct PlatformRuntime {
    event_tx: PlatformEventSender,
    event_rx: PlatformEventReceiver,
    command_rx: PlatformCommandReceiver,
    clipboard_handler: Arc<dyn ClipboardChangeHandler>,
    shutting_down: bool,
    watcher_join: Option<JoinHandle<()>>,
    watcher_handle: Option<WatcherShutdown>,
}

impl PlatformRuntime {
    pub fn new(
        event_tx: PlatformEventSender,
        event_rx: PlatformEventReceiver,
        command_rx: PlatformCommandReceiver,
        clipboard_handler: Arc<dyn ClipboardChangeHandler>,
    ) -> Self {
        Self {
            event_tx,
            event_rx,
            command_rx,
            clipboard_handler,
            shutting_down: false,
            watcher_join: None,
            watcher_handle: None,
        }
    }

    pub async fn start(mut self) {
        info!("Platform runtime started");
        while !self.shutting_down {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event).await;
                }
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        self.stop_clipboard_watcher();
        if let Some(join) = self.watcher_join.take() {
            match tokio::time::timeout(WATCHER_STOP_TIMEOUT, join).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Clipboard watcher task failed"),
                Err(_) => warn!("Clipboard watcher did not stop in time"),
            }
        }
        info!("Platform runtime stopped");
    }

    fn start_clipboard_watcher(&mut self) -> Result<()> {
        if self.watcher_handle.is_some() {
            debug!("Clipboard watcher already running, skipping start");
            return Ok(());
        }

        let mut watcher_ctx = ClipboardWatcherContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to create watcher context: {}", e))?;

        let handler = ClipboardWatcher::new(self.event_tx.clone());
        let shutdown = watcher_ctx.add_handler(handler).get_shutdown_channel();

        let event_tx = self.event_tx.clone();
        let join = tokio::task::spawn_blocking(move || {
            info!("start clipboard watch");
            watcher_ctx.start_watch();
            info!("clipboard watch stopped");
            let _ = event_tx.try_send(PlatformEvent::WatcherStopped);
        });

        self.watcher_join = Some(join);
        self.watcher_handle = Some(shutdown);
        Ok(())
    }

    fn stop_clipboard_watcher(&mut self) {
        match self.watcher_handle.take() {
            Some(handle) => {
                handle.stop();
                info!("Clipboard watcher stopped");
            }
            None => debug!("Clipboard watcher already stopped"),
        }
    }

    async fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::ClipboardChanged => {
                debug!("Clipboard changed");
                if let Err(e) = self.clipboard_handler.on_clipboard_changed().await {
                    error!(error = %e, "Failed to handle clipboard change");
                }
            }
            PlatformEvent::WatcherStopped => {
                if self.watcher_handle.take().is_some() {
                    warn!("Clipboard watcher exited unexpectedly");
                }
                self.watcher_join = None;
            }
        }
    }

    fn handle_command(&mut self, command: PlatformCommand) {
        match command {
            PlatformCommand::Shutdown => {
                self.shutting_down = true;
                info!("Platform runtime shutting down");
            }
            PlatformCommand::StartClipboardWatcher => {
                debug!("StartClipboardWatcher command received");
                if let Err(e) = self.start_clipboard_watcher() {
                    error!(error = %e, "Failed to start clipboard watcher");
                }
            }
        }
    }
}
