use bytes::Bytes;

use super::MimeType;

/// The bytes observed on the clipboard for one content type.
///
/// Equality is byte-for-byte on both the MIME type and the payload; this is
/// what deduplicates history entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipboardContent {
    pub mime: MimeType,
    pub bytes: Bytes,
}

/// How an entry is presented and stored. Never affects equality or eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Text,
    Image,
    Binary,
}

impl ClipboardContent {
    pub fn new(mime: MimeType, bytes: impl Into<Bytes>) -> Self {
        Self {
            mime,
            bytes: bytes.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(MimeType::text_plain(), text.into().into_bytes())
    }

    pub fn kind(&self) -> EntryKind {
        if self.mime.is_text_plain() {
            EntryKind::Text
        } else if self.mime.is_image() {
            EntryKind::Image
        } else {
            EntryKind::Binary
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind() == EntryKind::Text
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Payload decoded as UTF-8, replacing invalid sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Hex BLAKE3 digest over the MIME type and the payload.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.mime.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize().as_bytes())
    }

    /// Short single-line label for menus and notifications.
    pub fn preview(&self, max_chars: usize) -> String {
        if !self.is_text() {
            return format!("[{}]", self.mime);
        }
        truncate(&self.text_lossy(), max_chars)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut shortened: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push_str("...");
    shortened
}
