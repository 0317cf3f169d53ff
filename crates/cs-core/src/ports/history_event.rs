use crate::history::HistoryEvent;

/// Receives history change facts, typically to update a menu or tray.
///
/// Called with the engine state locked; implementations must not call back
/// into the engine and should hand the event off quickly.
pub trait HistoryEventPort: Send + Sync {
    fn publish(&self, event: HistoryEvent);
}
