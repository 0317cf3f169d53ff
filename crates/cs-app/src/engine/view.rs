use std::sync::PoisonError;

use cs_core::{ClipboardEntry, EntryId, EntryKind, MimeType};

use super::ClipboardHistory;
use crate::state::HistoryState;

/// Read-only projection of an entry for menus and listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: EntryId,
    pub mime: MimeType,
    pub kind: EntryKind,
    pub favorite: bool,
    /// Never set while private mode is on.
    pub selected: bool,
    pub preview: String,
}

impl EntryView {
    pub fn new(entry: &ClipboardEntry, preview_length: usize, selected: bool) -> Self {
        Self {
            id: entry.id().clone(),
            mime: entry.mime().clone(),
            kind: entry.kind(),
            favorite: entry.is_favorite(),
            selected,
            preview: entry.content().preview(preview_length),
        }
    }
}

impl ClipboardHistory {
    /// All entries in navigation order: history first, then favorites.
    pub async fn entries(&self) -> Vec<EntryView> {
        let state = self.state.lock().await;
        self.project(&state, |_| true)
    }

    /// Entries whose label contains `query`, ignoring case. Non-text
    /// entries match on their MIME type. An empty query matches everything.
    pub async fn search(&self, query: &str) -> Vec<EntryView> {
        let needle = query.trim().to_lowercase();
        let state = self.state.lock().await;
        if needle.is_empty() {
            return self.project(&state, |_| true);
        }
        self.project(&state, |entry| {
            let haystack = if entry.content().is_text() {
                entry.content().text_lossy()
            } else {
                entry.mime().to_string()
            };
            haystack.to_lowercase().contains(&needle)
        })
    }

    /// The selected entry, hidden while private mode is on.
    pub async fn current(&self) -> Option<EntryView> {
        let state = self.state.lock().await;
        let id = state.selection.current()?;
        let entry = state.store.get(id)?;
        (!self.is_private()).then(|| self.view(&state, entry, self.preview_length()))
    }

    fn project(
        &self,
        state: &HistoryState,
        keep: impl Fn(&ClipboardEntry) -> bool,
    ) -> Vec<EntryView> {
        let preview_length = self.preview_length();
        state
            .store
            .iter()
            .filter(|entry| keep(*entry))
            .map(|entry| self.view(state, entry, preview_length))
            .collect()
    }

    fn view(&self, state: &HistoryState, entry: &ClipboardEntry, preview_length: usize) -> EntryView {
        let selected = !self.is_private() && state.selection.is_selected(entry.id());
        EntryView::new(entry, preview_length, selected)
    }

    fn preview_length(&self) -> usize {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .preview_length
    }
}
