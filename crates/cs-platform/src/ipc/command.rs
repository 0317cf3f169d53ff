#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCommand {
    /// Start watching the system clipboard
    StartClipboardWatcher,
    /// Stop the runtime loop
    Shutdown,
}
