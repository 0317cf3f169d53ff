//! Assembles the engine from concrete adapters.

use std::path::Path;
use std::sync::Arc;

use cs_app::ClipboardHistory;
use cs_core::ports::{HistoryEventPort, SystemClipboardPort};
use cs_core::AppConfig;
use cs_infra::FileHistoryRepository;

use crate::adapters::TracingEventPresenter;

/// Builds the history engine over `clipboard`, persisting under `data_dir`
/// and reporting changes through the log.
pub fn build_history(
    clipboard: Arc<dyn SystemClipboardPort>,
    config: &AppConfig,
    data_dir: &Path,
) -> Arc<ClipboardHistory> {
    let events: Arc<dyn HistoryEventPort> = Arc::new(TracingEventPresenter::new());
    Arc::new(ClipboardHistory::new(
        clipboard,
        Arc::new(FileHistoryRepository::new(data_dir)),
        events,
        config.history.clone(),
        config.general.start_in_private_mode,
    ))
}
