/// Facts reported by the platform layer. Events describe what happened,
/// never what to do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The system clipboard changed. Carries nothing; the handler reads what
    /// it needs.
    ClipboardChanged,

    /// The clipboard watcher stopped on its own.
    WatcherStopped,
}
