use crate::ids::EntryId;

/// Facts about history changes, published to the presentation layer.
///
/// Events describe what happened, never what the receiver should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// The persisted history was seeded into the store at startup.
    Loaded { count: usize },

    /// A new capture entered the history.
    Inserted { id: EntryId },

    /// An entry left the history (deleted, evicted, cleared or undone).
    Removed { id: EntryId },

    /// An entry moved to the front of its ordering.
    Moved { id: EntryId },

    FavoriteChanged { id: EntryId, favorite: bool },

    /// The current entry changed; `None` when nothing is current.
    SelectionChanged { id: Option<EntryId> },

    /// The history became empty (`true`) or stopped being empty (`false`).
    EmptyStateChanged { empty: bool },

    PrivacyModeChanged { enabled: bool },

    /// Labels must be rebuilt, e.g. after the preview length changed.
    Relabeled,

    /// Saving or loading the history failed; memory and disk may differ.
    PersistenceFailed { message: String },
}
