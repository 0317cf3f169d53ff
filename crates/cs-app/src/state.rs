use cs_core::{EntryId, EntryStore, SelectionState};

/// Everything the engine mutates under its lock.
#[derive(Debug, Default)]
pub struct HistoryState {
    pub store: EntryStore,
    pub selection: SelectionState,
    /// The most recent capture, for undoing it. Cleared once that entry
    /// leaves the store.
    pub last_captured: Option<EntryId>,
}

impl HistoryState {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: EntryStore::new(capacity),
            ..Default::default()
        }
    }

    /// Drops every reference to an entry that left the store. Returns `true`
    /// if it was the current selection.
    pub fn forget(&mut self, id: &EntryId) -> bool {
        if self.last_captured.as_ref() == Some(id) {
            self.last_captured = None;
        }
        self.selection.forget(id)
    }
}
