use crate::ids::EntryId;

use super::{ClipboardContent, EntryKind, MimeType};

/// One retained clipboard capture.
///
/// The content never changes after creation. The favorite flag is only
/// flipped by [`EntryStore::toggle_favorite`](crate::history::EntryStore::toggle_favorite),
/// which also keeps the store's orderings in sync with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    id: EntryId,
    content: ClipboardContent,
    favorite: bool,
}

impl ClipboardEntry {
    pub fn new(content: ClipboardContent, favorite: bool) -> Self {
        Self {
            id: EntryId::new(),
            content,
            favorite,
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn content(&self) -> &ClipboardContent {
        &self.content
    }

    pub fn mime(&self) -> &MimeType {
        &self.content.mime
    }

    pub fn kind(&self) -> EntryKind {
        self.content.kind()
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    /// Two entries are duplicates when their contents are equal, whatever
    /// their handles or favorite flags.
    pub fn content_equals(&self, content: &ClipboardContent) -> bool {
        self.content == *content
    }

    pub(crate) fn set_favorite(&mut self, favorite: bool) {
        self.favorite = favorite;
    }
}
