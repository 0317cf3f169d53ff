//! Keeps the selected entry and the system clipboard in step.
//!
//! The coordinator owns the clipboard write side and the single pending
//! deferred push. Every operation that changes what should be on the
//! clipboard cancels a pending push first, so a stale cycle target can never
//! overwrite a newer choice. The echo of a push already written does not
//! count as such a change.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use cs_core::ports::SystemClipboardPort;
use cs_core::selection::cycle_index;
use cs_core::{ClipboardContent, ClipboardEntry, CycleDirection, EntryId, HistoryError};

use crate::deferred_push::DeferredPush;
use crate::state::HistoryState;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    NotFound(#[from] HistoryError),

    #[error("failed to update system clipboard: {0}")]
    Clipboard(anyhow::Error),
}

/// Where a cycle step landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub target: EntryId,
    /// 1-based position in navigation order.
    pub position: usize,
    pub total: usize,
}

/// Result of folding an external clipboard change into the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// The content was already known. That entry is now selected unless a
    /// deferred push was pending.
    Reselected { id: EntryId, moved: bool },
    /// A new entry was created and selected. `evicted` holds whatever the
    /// cap pushed out.
    Inserted {
        id: EntryId,
        evicted: Vec<ClipboardEntry>,
    },
}

pub struct SelectionCoordinator {
    clipboard: Arc<dyn SystemClipboardPort>,
    pending: DeferredPush,
}

impl SelectionCoordinator {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self {
            clipboard,
            pending: DeferredPush::new(),
        }
    }

    /// Makes `id` the only selected entry, optionally writing its content to
    /// the clipboard. Returns `true` if the selection changed.
    ///
    /// The selection is updated even if the write fails.
    pub async fn select(
        &self,
        state: &mut HistoryState,
        id: &EntryId,
        push: bool,
    ) -> Result<bool, SelectError> {
        self.pending.cancel();
        let content = state
            .store
            .get(id)
            .map(|entry| entry.content().clone())
            .ok_or_else(|| HistoryError::EntryNotFound(id.clone()))?;

        let changed = state.selection.select(id.clone());
        if push {
            self.push(&content).await?;
        }
        Ok(changed)
    }

    /// Folds content observed on the clipboard into the history without
    /// writing back to the clipboard.
    ///
    /// Known content reselects its entry, moving it to the front when
    /// `move_on_reuse` is set and it is not a favorite. While a deferred push
    /// is pending, known content is usually the echo of an earlier push and
    /// leaves the selection and the pending push alone. New content cancels
    /// the pending push and becomes a fresh selected entry, and the cap is
    /// enforced.
    pub fn reconcile_external_change(
        &self,
        state: &mut HistoryState,
        content: ClipboardContent,
        move_on_reuse: bool,
    ) -> Reconciled {
        if let Some(id) = state.store.find_equal(&content) {
            if self.pending.is_pending() {
                debug!(entry_id = %id, "clipboard matches existing entry, push pending");
                return Reconciled::Reselected { id, moved: false };
            }
            state.selection.select(id.clone());
            let is_favorite = state.store.get(&id).is_some_and(ClipboardEntry::is_favorite);
            let moved = move_on_reuse && !is_favorite && state.store.move_to_front(&id).is_ok();
            debug!(entry_id = %id, moved, "clipboard matches existing entry");
            return Reconciled::Reselected { id, moved };
        }

        self.pending.cancel();
        let id = state.store.insert(content).id().clone();
        state.selection.select(id.clone());
        let evicted = state.store.evict_oldest();
        for entry in &evicted {
            state.forget(entry.id());
        }
        state.last_captured = Some(id.clone());
        debug!(entry_id = %id, evicted = evicted.len(), "captured new entry");
        Reconciled::Inserted { id, evicted }
    }

    /// Moves the selection one step through navigation order, wrapping.
    ///
    /// With `defer` set, the selection moves now and the clipboard write is
    /// scheduled after the delay; another cycle before then replaces it.
    /// Returns `Ok(None)` when nothing is selected.
    pub async fn cycle(
        &self,
        state: &mut HistoryState,
        direction: CycleDirection,
        defer: Option<Duration>,
    ) -> Result<Option<CycleOutcome>, SelectError> {
        self.pending.cancel();

        let Some(current) = state.selection.current().cloned() else {
            return Ok(None);
        };
        let order = state.store.navigation_order();
        let Some(index) = cycle_index(&order, &current, direction) else {
            return Ok(None);
        };
        let outcome = CycleOutcome {
            target: order[index].clone(),
            position: index + 1,
            total: order.len(),
        };

        match defer {
            Some(delay) => {
                let content = state
                    .store
                    .get(&outcome.target)
                    .map(|entry| entry.content().clone())
                    .ok_or_else(|| HistoryError::EntryNotFound(outcome.target.clone()))?;
                state.selection.select(outcome.target.clone());

                let clipboard = Arc::clone(&self.clipboard);
                self.pending.schedule(delay, async move {
                    match clipboard.write_content(&content).await {
                        Ok(()) => debug!(mime = %content.mime, "deferred selection pushed"),
                        Err(err) => warn!(error = %err, "deferred clipboard push failed"),
                    }
                });
            }
            None => {
                self.select(state, &outcome.target, true).await?;
            }
        }

        Ok(Some(outcome))
    }

    /// Empties the system clipboard, dropping any pending push.
    pub async fn clear_clipboard(&self) -> Result<(), SelectError> {
        self.pending.cancel();
        self.clipboard.clear().await.map_err(SelectError::Clipboard)
    }

    /// Returns `true` if a deferred push was still waiting.
    pub fn cancel_pending(&self) -> bool {
        self.pending.cancel()
    }

    pub fn has_pending_push(&self) -> bool {
        self.pending.is_pending()
    }

    async fn push(&self, content: &ClipboardContent) -> Result<(), SelectError> {
        self.clipboard
            .write_content(content)
            .await
            .map_err(SelectError::Clipboard)
    }
}
