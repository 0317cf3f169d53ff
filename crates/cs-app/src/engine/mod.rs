//! The clipboard history facade.
//!
//! [`ClipboardHistory`] owns the store, the selection and the privacy flag,
//! and is the only thing outer layers talk to. All state lives behind one
//! async mutex so refreshes and user commands never interleave halfway.

mod commands;
mod view;

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use cs_core::ports::{
    ClipboardChangeHandler, HistoryEventPort, HistoryRepositoryPort, SystemClipboardPort,
};
use cs_core::{ClipboardContent, ClipboardEntry, EntryId, HistoryConfig, HistoryEvent};

use crate::privacy::PrivacyGate;
use crate::refresh_guard::RefreshGuard;
use crate::resolver::ContentResolver;
use crate::selection::{Reconciled, SelectionCoordinator};
use crate::state::HistoryState;

pub use view::EntryView;

/// What a single refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New content became a new, selected entry.
    Captured(EntryId),
    /// The content matched an existing entry, which is now selected.
    Reselected(EntryId),
    /// No configured type was offered.
    Empty,
    /// Another refresh was already running.
    Suppressed,
    /// Private mode is on; nothing was read.
    Private,
    /// The content could not be captured.
    Failed,
}

pub struct ClipboardHistory {
    state: Mutex<HistoryState>,
    config: RwLock<HistoryConfig>,
    resolver: ContentResolver,
    selection: SelectionCoordinator,
    repository: Arc<dyn HistoryRepositoryPort>,
    events: Arc<dyn HistoryEventPort>,
    refresh_guard: RefreshGuard,
    privacy: PrivacyGate,
}

impl ClipboardHistory {
    /// `config` is taken as is; validate it before calling.
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        repository: Arc<dyn HistoryRepositoryPort>,
        events: Arc<dyn HistoryEventPort>,
        config: HistoryConfig,
        start_private: bool,
    ) -> Self {
        Self {
            state: Mutex::new(HistoryState::new(config.max_history_items)),
            config: RwLock::new(config),
            resolver: ContentResolver::new(clipboard.clone(), repository.clone()),
            selection: SelectionCoordinator::new(clipboard),
            repository,
            events,
            refresh_guard: RefreshGuard::new(),
            privacy: PrivacyGate::new(start_private),
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> HistoryConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_private(&self) -> bool {
        self.privacy.is_active()
    }

    /// Seeds the store from the repository and selects the first entry in
    /// navigation order without touching the clipboard.
    ///
    /// A repository failure leaves the history empty. Returns the number of
    /// entries kept.
    #[tracing::instrument(name = "history.load", skip(self))]
    pub async fn load(&self) -> usize {
        let loaded = match self.repository.load_history().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "failed to load history, starting empty");
                self.publish(HistoryEvent::PersistenceFailed {
                    message: format!("{err:#}"),
                });
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;
        let was_empty = state.store.is_empty();
        let evicted = state.store.seed(loaded);
        for entry in &evicted {
            state.forget(entry.id());
        }

        let count = state.store.len();
        self.publish(HistoryEvent::Loaded { count });
        self.publish_empty_transition(was_empty, &state);

        if let Some(first) = state.store.first().cloned() {
            if state.selection.select(first.clone()) {
                self.publish(HistoryEvent::SelectionChanged { id: Some(first) });
            }
        }

        if !evicted.is_empty() {
            self.release_payloads(&evicted).await;
            self.persist(&state).await;
        }

        info!(count, evicted = evicted.len(), "history loaded");
        count
    }

    /// Reads the clipboard and folds it into the history.
    ///
    /// At most one refresh runs at a time; an overlapping call returns
    /// [`RefreshOutcome::Suppressed`] without reading anything. The platform
    /// runtime awaits each notification in turn, so the guard matters for
    /// concurrent direct callers.
    #[tracing::instrument(name = "history.refresh", skip(self))]
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(_permit) = self.refresh_guard.try_enter() else {
            debug!("refresh already in flight, dropping notification");
            return RefreshOutcome::Suppressed;
        };
        if self.privacy.is_active() {
            return RefreshOutcome::Private;
        }

        let (priority, strip_text, move_on_reuse) = {
            let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
            (
                config.mime_priority.clone(),
                config.strip_text,
                config.move_item_first,
            )
        };

        let content = match self.resolver.resolve(&priority, strip_text).await {
            Ok(Some(content)) => content,
            Ok(None) => return RefreshOutcome::Empty,
            Err(err) => {
                error!(error = %format!("{err:#}"), "failed to capture clipboard content");
                self.publish(HistoryEvent::PersistenceFailed {
                    message: format!("{err:#}"),
                });
                return RefreshOutcome::Failed;
            }
        };

        let mut state = self.state.lock().await;
        // Private mode may have been switched on while the clipboard was read.
        if self.privacy.is_active() {
            if !content.is_text() && state.store.find_equal(&content).is_none() {
                self.release_payload(&content).await;
            }
            return RefreshOutcome::Private;
        }

        let was_empty = state.store.is_empty();
        let previous = state.selection.current().cloned();

        match self
            .selection
            .reconcile_external_change(&mut state, content, move_on_reuse)
        {
            Reconciled::Reselected { id, moved } => {
                if previous.as_ref() != state.selection.current() {
                    self.publish(HistoryEvent::SelectionChanged {
                        id: Some(id.clone()),
                    });
                }
                if moved {
                    self.publish(HistoryEvent::Moved { id: id.clone() });
                    self.persist(&state).await;
                }
                RefreshOutcome::Reselected(id)
            }
            Reconciled::Inserted { id, evicted } => {
                self.publish(HistoryEvent::Inserted { id: id.clone() });
                self.publish(HistoryEvent::SelectionChanged {
                    id: Some(id.clone()),
                });
                for entry in &evicted {
                    self.publish(HistoryEvent::Removed {
                        id: entry.id().clone(),
                    });
                }
                self.publish_empty_transition(was_empty, &state);
                self.release_payloads(&evicted).await;
                self.persist(&state).await;
                info!(entry_id = %id, "captured clipboard entry");
                RefreshOutcome::Captured(id)
            }
        }
    }

    /// Cancels any pending deferred push. Call before dropping the runtime.
    pub fn shutdown(&self) {
        if self.selection.cancel_pending() {
            info!("pending clipboard push dropped on shutdown");
        }
    }

    pub fn has_pending_push(&self) -> bool {
        self.selection.has_pending_push()
    }

    fn publish(&self, event: HistoryEvent) {
        self.events.publish(event);
    }

    fn publish_empty_transition(&self, was_empty: bool, state: &HistoryState) {
        let empty = state.store.is_empty();
        if empty != was_empty {
            self.publish(HistoryEvent::EmptyStateChanged { empty });
        }
    }

    /// Writes the history to the repository. Failures are reported, never
    /// returned: memory stays authoritative.
    async fn persist(&self, state: &HistoryState) {
        let favorites_only = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .cache_only_favorites;

        let mut snapshot = state.store.snapshot();
        if favorites_only {
            snapshot.retain(ClipboardEntry::is_favorite);
        }

        if let Err(err) = self.repository.save_history(&snapshot).await {
            warn!(error = %format!("{err:#}"), "failed to persist history");
            self.publish(HistoryEvent::PersistenceFailed {
                message: format!("{err:#}"),
            });
        }
    }

    async fn release_payloads(&self, removed: &[ClipboardEntry]) {
        for entry in removed.iter().filter(|entry| !entry.content().is_text()) {
            self.release_payload(entry.content()).await;
        }
    }

    async fn release_payload(&self, content: &ClipboardContent) {
        if let Err(err) = self.repository.delete_binary_payload(content).await {
            warn!(mime = %content.mime, error = %err, "failed to delete payload");
            self.publish(HistoryEvent::PersistenceFailed {
                message: format!("{err:#}"),
            });
        }
    }
}

#[async_trait]
impl ClipboardChangeHandler for ClipboardHistory {
    async fn on_clipboard_changed(&self) -> anyhow::Result<()> {
        let outcome = self.refresh().await;
        debug!(?outcome, "clipboard change handled");
        Ok(())
    }
}
