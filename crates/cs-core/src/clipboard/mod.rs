//! Clipboard domain models.
mod content;
mod entry;
mod mime;

pub use content::{ClipboardContent, EntryKind};
pub use entry::ClipboardEntry;
pub use mime::MimeType;
