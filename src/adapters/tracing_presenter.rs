use cs_core::ports::HistoryEventPort;
use cs_core::HistoryEvent;
use tracing::{debug, info, warn};

/// Presentation for a headless daemon: history changes go to the log.
#[derive(Debug, Default)]
pub struct TracingEventPresenter;

impl TracingEventPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl HistoryEventPort for TracingEventPresenter {
    fn publish(&self, event: HistoryEvent) {
        match event {
            HistoryEvent::Loaded { count } => info!(count, "history restored"),
            HistoryEvent::Inserted { id } => info!(entry_id = %id, "entry added"),
            HistoryEvent::Removed { id } => debug!(entry_id = %id, "entry removed"),
            HistoryEvent::Moved { id } => debug!(entry_id = %id, "entry moved to front"),
            HistoryEvent::FavoriteChanged { id, favorite } => {
                info!(entry_id = %id, favorite, "favorite changed")
            }
            HistoryEvent::SelectionChanged { id: Some(id) } => {
                debug!(entry_id = %id, "selection changed")
            }
            HistoryEvent::SelectionChanged { id: None } => debug!("selection cleared"),
            HistoryEvent::EmptyStateChanged { empty } => debug!(empty, "history empty state changed"),
            HistoryEvent::PrivacyModeChanged { enabled } => info!(enabled, "privacy mode"),
            HistoryEvent::Relabeled => debug!("labels rebuilt"),
            HistoryEvent::PersistenceFailed { message } => {
                warn!(error = %message, "history persistence failed")
            }
        }
    }
}
