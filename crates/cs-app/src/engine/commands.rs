use std::sync::PoisonError;

use tracing::{info, warn};

use cs_core::{ConfigError, CycleDirection, EntryId, HistoryConfig, HistoryError, HistoryEvent};

use super::ClipboardHistory;
use crate::selection::{CycleOutcome, SelectError};
use crate::state::HistoryState;

impl ClipboardHistory {
    /// Selects an entry and writes it to the clipboard.
    #[tracing::instrument(name = "history.select", skip_all, fields(entry_id = %id))]
    pub async fn select(&self, id: &EntryId) -> Result<(), SelectError> {
        let mut state = self.state.lock().await;
        let previous = state.selection.current().cloned();
        // The selection moves even when the clipboard write fails.
        let result = self.selection.select(&mut state, id, true).await;
        if previous.as_ref() != state.selection.current() {
            self.publish(HistoryEvent::SelectionChanged {
                id: Some(id.clone()),
            });
        }
        result.map(|_| ())
    }

    /// Flips the favorite flag. Un-favoriting can push the oldest history
    /// entry over the cap. Returns the new flag.
    #[tracing::instrument(name = "history.toggle_favorite", skip_all, fields(entry_id = %id))]
    pub async fn toggle_favorite(&self, id: &EntryId) -> Result<bool, HistoryError> {
        let mut state = self.state.lock().await;
        let favorite = state.store.toggle_favorite(id)?;
        self.publish(HistoryEvent::FavoriteChanged {
            id: id.clone(),
            favorite,
        });
        self.enforce_cap(&mut state).await;
        self.persist(&state).await;
        Ok(favorite)
    }

    /// Deletes an entry. If it was selected the clipboard is cleared first
    /// and nothing is selected until the next capture.
    #[tracing::instrument(name = "history.remove", skip_all, fields(entry_id = %id))]
    pub async fn remove(&self, id: &EntryId) -> Result<(), HistoryError> {
        let mut state = self.state.lock().await;
        if !state.store.contains(id) {
            return Err(HistoryError::EntryNotFound(id.clone()));
        }

        let was_empty = state.store.is_empty();
        if state.selection.is_selected(id) {
            if let Err(err) = self.selection.clear_clipboard().await {
                warn!(error = %err, "failed to clear clipboard for removed selection");
            }
            state.selection.forget(id);
            self.publish(HistoryEvent::SelectionChanged { id: None });
        }

        let entry = state.store.remove(id)?;
        state.forget(id);
        self.publish(HistoryEvent::Removed { id: id.clone() });
        self.publish_empty_transition(was_empty, &state);
        self.release_payloads(std::slice::from_ref(&entry)).await;
        self.persist(&state).await;
        Ok(())
    }

    /// Removes every non-favorite entry except the selected one. Returns how
    /// many were removed.
    #[tracing::instrument(name = "history.clear", skip(self))]
    pub async fn clear_history(&self) -> usize {
        let mut state = self.state.lock().await;
        let was_empty = state.store.is_empty();
        let keep = state.selection.current().cloned();
        let removed = state.store.clear(keep.as_ref());

        for entry in &removed {
            state.forget(entry.id());
            self.publish(HistoryEvent::Removed {
                id: entry.id().clone(),
            });
        }
        self.publish_empty_transition(was_empty, &state);
        self.release_payloads(&removed).await;
        self.persist(&state).await;

        info!(removed = removed.len(), "history cleared");
        removed.len()
    }

    #[tracing::instrument(name = "history.move_to_front", skip_all, fields(entry_id = %id))]
    pub async fn move_to_front(&self, id: &EntryId) -> Result<(), HistoryError> {
        let mut state = self.state.lock().await;
        state.store.move_to_front(id)?;
        self.publish(HistoryEvent::Moved { id: id.clone() });
        self.persist(&state).await;
        Ok(())
    }

    /// Selects the entry before the current one, wrapping around.
    pub async fn previous(&self) -> Result<Option<CycleOutcome>, SelectError> {
        self.cycle(CycleDirection::Previous).await
    }

    /// Selects the entry after the current one, wrapping around.
    pub async fn next(&self) -> Result<Option<CycleOutcome>, SelectError> {
        self.cycle(CycleDirection::Next).await
    }

    #[tracing::instrument(name = "history.cycle", skip(self))]
    async fn cycle(&self, direction: CycleDirection) -> Result<Option<CycleOutcome>, SelectError> {
        let delay = self.config().cycle_push_delay();
        let mut state = self.state.lock().await;
        let outcome = self.selection.cycle(&mut state, direction, delay).await?;
        if let Some(outcome) = &outcome {
            self.publish(HistoryEvent::SelectionChanged {
                id: Some(outcome.target.clone()),
            });
        }
        Ok(outcome)
    }

    /// Turns private mode on or off.
    ///
    /// Turning it on drops any pending push. Turning it off writes the
    /// selected entry back to the clipboard, or empties the clipboard when
    /// nothing is selected, so content copied while private does not linger.
    #[tracing::instrument(name = "history.set_privacy_mode", skip(self))]
    pub async fn set_privacy_mode(&self, enabled: bool) -> Result<(), SelectError> {
        let mut state = self.state.lock().await;
        if !self.privacy.set(enabled) {
            return Ok(());
        }
        self.publish(HistoryEvent::PrivacyModeChanged { enabled });
        info!(enabled, "privacy mode changed");

        if enabled {
            self.selection.cancel_pending();
            return Ok(());
        }

        match state.selection.current().cloned() {
            Some(id) => self.selection.select(&mut state, &id, true).await.map(|_| ()),
            None => self.selection.clear_clipboard().await,
        }
    }

    /// Replaces the configuration. The new cap applies immediately.
    #[tracing::instrument(name = "history.apply_config", skip_all)]
    pub async fn apply_config(&self, config: HistoryConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let capacity = config.max_history_items;
        let relabel = {
            let mut current = self.config.write().unwrap_or_else(PoisonError::into_inner);
            let relabel = current.preview_length != config.preview_length;
            *current = config;
            relabel
        };

        let mut state = self.state.lock().await;
        state.store.set_capacity(capacity);
        self.enforce_cap(&mut state).await;
        self.persist(&state).await;
        if relabel {
            self.publish(HistoryEvent::Relabeled);
        }
        Ok(())
    }

    /// Undoes the most recent capture: removes that entry and, if it was
    /// selected, puts the entry now at the front back on the clipboard.
    ///
    /// Returns the removed handle, or `None` if there is nothing to undo.
    #[tracing::instrument(name = "history.undo_last_capture", skip(self))]
    pub async fn undo_last_capture(&self) -> Result<Option<EntryId>, SelectError> {
        let mut state = self.state.lock().await;
        let Some(id) = state.last_captured.take() else {
            return Ok(None);
        };
        if !state.store.contains(&id) {
            return Ok(None);
        }

        let was_empty = state.store.is_empty();
        let was_selected = state.selection.is_selected(&id);
        let entry = state.store.remove(&id)?;
        state.forget(&id);
        self.publish(HistoryEvent::Removed { id: id.clone() });
        self.publish_empty_transition(was_empty, &state);
        self.release_payloads(std::slice::from_ref(&entry)).await;
        self.persist(&state).await;

        if was_selected {
            match state.store.first().cloned() {
                Some(next) => {
                    self.selection.select(&mut state, &next, true).await?;
                    self.publish(HistoryEvent::SelectionChanged { id: Some(next) });
                }
                None => {
                    self.publish(HistoryEvent::SelectionChanged { id: None });
                    self.selection.clear_clipboard().await?;
                }
            }
        }

        info!(entry_id = %id, "last capture undone");
        Ok(Some(id))
    }

    async fn enforce_cap(&self, state: &mut HistoryState) {
        let evicted = state.store.evict_oldest();
        for entry in &evicted {
            if state.forget(entry.id()) {
                self.selection.cancel_pending();
                self.publish(HistoryEvent::SelectionChanged { id: None });
            }
            self.publish(HistoryEvent::Removed {
                id: entry.id().clone(),
            });
        }
        self.release_payloads(&evicted).await;
    }
}
