use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clipboard::MimeType;

pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 15;
pub const DEFAULT_DEFERRED_PUSH_DELAY_MS: u64 = 750;
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mime priority list is empty")]
    EmptyMimePriority,

    #[error("invalid mime type in priority list: {0}")]
    InvalidMimeType(String),

    #[error("preview length must be at least 1")]
    ZeroPreviewLength,
}

/// Runtime-tunable behaviour of the history engine.
///
/// Owned by the surrounding application and handed to the engine explicitly;
/// a new value replaces the old one through `apply_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Cap on non-favorite entries. Favorites are not counted.
    pub max_history_items: usize,

    /// Content types probed on every change, first non-empty wins.
    pub mime_priority: Vec<MimeType>,

    /// Move a non-favorite entry to the front when it is copied again.
    pub move_item_first: bool,

    /// Delay the clipboard write while cycling through entries.
    pub defer_push_on_cycle: bool,

    pub deferred_push_delay_ms: u64,

    /// Persist favorites only.
    pub cache_only_favorites: bool,

    /// Trim surrounding whitespace from captured plain text.
    pub strip_text: bool,

    /// Maximum characters of an entry label.
    pub preview_length: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            mime_priority: MimeType::default_priority(),
            move_item_first: false,
            defer_push_on_cycle: false,
            deferred_push_delay_ms: DEFAULT_DEFERRED_PUSH_DELAY_MS,
            cache_only_favorites: false,
            strip_text: false,
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mime_priority.is_empty() {
            return Err(ConfigError::EmptyMimePriority);
        }
        if let Some(bad) = self.mime_priority.iter().find(|m| !m.is_well_formed()) {
            return Err(ConfigError::InvalidMimeType(bad.to_string()));
        }
        if self.preview_length == 0 {
            return Err(ConfigError::ZeroPreviewLength);
        }
        Ok(())
    }

    /// The delay to apply when cycling, or `None` for an immediate push.
    pub fn cycle_push_delay(&self) -> Option<Duration> {
        self.defer_push_on_cycle
            .then(|| Duration::from_millis(self.deferred_push_delay_ms))
    }
}
