use std::collections::{HashMap, VecDeque};

use crate::clipboard::{ClipboardContent, ClipboardEntry};
use crate::ids::EntryId;

use super::HistoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new non-favorite entry was created at the front of the history.
    Inserted(EntryId),
    /// An equal entry already existed; nothing changed.
    Existing(EntryId),
}

impl InsertOutcome {
    pub fn id(&self) -> &EntryId {
        match self {
            InsertOutcome::Inserted(id) | InsertOutcome::Existing(id) => id,
        }
    }

    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// The canonical, deduplicated clipboard history.
///
/// Each entry is stored once, keyed by its handle. Two orderings index it:
/// `favorites` and `history` (non-favorites), both most-recent-first.
/// Navigation walks the history ordering, then the favorites.
///
/// Invariants held after every public method returns:
/// - no two entries have equal content;
/// - every entry appears in exactly one ordering, the one matching its flag;
/// - `evict_oldest` brings the non-favorite count back under `capacity`.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<EntryId, ClipboardEntry>,
    favorites: VecDeque<EntryId>,
    history: VecDeque<EntryId>,
    capacity: usize,
}

impl EntryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Changes the cap. Call [`evict_oldest`](Self::evict_oldest) afterwards.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Appends previously persisted entries, keeping their relative order
    /// within each ordering. Duplicates of earlier entries are dropped.
    /// Returns whatever the cap evicts.
    pub fn seed(&mut self, entries: impl IntoIterator<Item = ClipboardEntry>) -> Vec<ClipboardEntry> {
        for entry in entries {
            if self.find_equal(entry.content()).is_some() {
                continue;
            }
            let id = entry.id().clone();
            if entry.is_favorite() {
                self.favorites.push_back(id.clone());
            } else {
                self.history.push_back(id.clone());
            }
            self.entries.insert(id, entry);
        }
        self.evict_oldest()
    }

    pub fn insert(&mut self, content: ClipboardContent) -> InsertOutcome {
        if let Some(existing) = self.find_equal(&content) {
            return InsertOutcome::Existing(existing);
        }

        let entry = ClipboardEntry::new(content, false);
        let id = entry.id().clone();
        self.history.push_front(id.clone());
        self.entries.insert(id.clone(), entry);
        InsertOutcome::Inserted(id)
    }

    pub fn find_equal(&self, content: &ClipboardContent) -> Option<EntryId> {
        self.entries
            .values()
            .find(|entry| entry.content_equals(content))
            .map(|entry| entry.id().clone())
    }

    pub fn get(&self, id: &EntryId) -> Option<&ClipboardEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Flips the favorite flag and moves the entry to the front of its new
    /// ordering. Returns the new flag.
    pub fn toggle_favorite(&mut self, id: &EntryId) -> Result<bool, HistoryError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| HistoryError::EntryNotFound(id.clone()))?;
        let was_favorite = entry.is_favorite();
        entry.set_favorite(!was_favorite);

        detach(self.ordering_mut(was_favorite), id);
        self.ordering_mut(!was_favorite).push_front(id.clone());
        Ok(!was_favorite)
    }

    pub fn remove(&mut self, id: &EntryId) -> Result<ClipboardEntry, HistoryError> {
        let entry = self
            .entries
            .remove(id)
            .ok_or_else(|| HistoryError::EntryNotFound(id.clone()))?;
        detach(self.ordering_mut(entry.is_favorite()), id);
        Ok(entry)
    }

    /// Removes the oldest non-favorites until the cap holds.
    /// Evicted entries are returned oldest first.
    pub fn evict_oldest(&mut self) -> Vec<ClipboardEntry> {
        let mut evicted = Vec::new();
        while self.history.len() > self.capacity {
            let Some(oldest) = self.history.pop_back() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                evicted.push(entry);
            }
        }
        evicted
    }

    /// Removes every non-favorite except `keep`.
    ///
    /// The selected entry is passed as `keep`: its content is still on the
    /// system clipboard and would be captured again on the next refresh.
    pub fn clear(&mut self, keep: Option<&EntryId>) -> Vec<ClipboardEntry> {
        let (kept, removed): (VecDeque<EntryId>, VecDeque<EntryId>) = self
            .history
            .drain(..)
            .partition(|id| Some(id) == keep);
        self.history = kept;

        removed
            .into_iter()
            .filter_map(|id| self.entries.remove(&id))
            .collect()
    }

    /// Moves the entry to the front of its own ordering.
    pub fn move_to_front(&mut self, id: &EntryId) -> Result<(), HistoryError> {
        let favorite = self
            .entries
            .get(id)
            .map(ClipboardEntry::is_favorite)
            .ok_or_else(|| HistoryError::EntryNotFound(id.clone()))?;
        let ordering = self.ordering_mut(favorite);
        detach(ordering, id);
        ordering.push_front(id.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn non_favorite_len(&self) -> usize {
        self.history.len()
    }

    pub fn favorite_len(&self) -> usize {
        self.favorites.len()
    }

    /// Entries in navigation order: history first, then favorites.
    pub fn iter(&self) -> impl Iterator<Item = &ClipboardEntry> + '_ {
        self.history
            .iter()
            .chain(self.favorites.iter())
            .filter_map(|id| self.entries.get(id))
    }

    pub fn navigation_order(&self) -> Vec<EntryId> {
        self.history.iter().chain(self.favorites.iter()).cloned().collect()
    }

    pub fn history_ids(&self) -> impl Iterator<Item = &EntryId> + '_ {
        self.history.iter()
    }

    pub fn favorite_ids(&self) -> impl Iterator<Item = &EntryId> + '_ {
        self.favorites.iter()
    }

    /// First entry in navigation order.
    pub fn first(&self) -> Option<&EntryId> {
        self.history.front().or_else(|| self.favorites.front())
    }

    pub fn snapshot(&self) -> Vec<ClipboardEntry> {
        self.iter().cloned().collect()
    }

    fn ordering_mut(&mut self, favorite: bool) -> &mut VecDeque<EntryId> {
        if favorite {
            &mut self.favorites
        } else {
            &mut self.history
        }
    }
}

fn detach(ordering: &mut VecDeque<EntryId>, id: &EntryId) {
    if let Some(pos) = ordering.iter().position(|other| other == id) {
        ordering.remove(pos);
    }
}
