use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal::ctrl_c;
use tracing::{info, warn};

use cs_app::EntryView;
use cs_core::ports::HistoryRepositoryPort;
use cs_core::{AppConfig, EntryStore};
use cs_infra::FileHistoryRepository;
use cs_platform::runtime::event_bus::{command_channel, event_channel};
use cs_platform::{LocalClipboard, PlatformCommand, PlatformRuntime};

use super::console::{format_entry, run_console};
use super::wiring::build_history;

/// Runs the daemon until Ctrl+C, or until the console quits.
pub async fn run_daemon(config: AppConfig, data_dir: PathBuf, console: bool) -> Result<()> {
    let clipboard = Arc::new(LocalClipboard::new().context("Failed to open the system clipboard")?);
    let history = build_history(clipboard, &config, &data_dir);
    let loaded = history.load().await;
    info!(loaded, data_dir = %data_dir.display(), private = history.is_private(), "clipstack started");

    let (event_tx, event_rx) = event_channel();
    let (command_tx, command_rx) = command_channel();
    let runtime = PlatformRuntime::new(event_tx, event_rx, command_rx, history.clone());
    let runtime_task = tokio::spawn(runtime.start());

    command_tx
        .send(PlatformCommand::StartClipboardWatcher)
        .await
        .context("Platform runtime exited before the watcher started")?;

    if console {
        tokio::select! {
            result = run_console(history.clone()) => result?,
            result = ctrl_c() => result.context("Failed to listen for Ctrl+C")?,
        }
    } else {
        ctrl_c().await.context("Failed to listen for Ctrl+C")?;
    }
    info!("Shutdown requested");

    history.shutdown();
    if command_tx.send(PlatformCommand::Shutdown).await.is_err() {
        warn!("Platform runtime already stopped");
    }
    runtime_task.await.context("Platform runtime task failed")?;
    info!("clipstack stopped");
    Ok(())
}

/// Prints the persisted history in navigation order.
pub async fn print_history(config: &AppConfig, data_dir: &Path) -> Result<()> {
    let repository = FileHistoryRepository::new(data_dir);
    let entries = repository
        .load_history()
        .await
        .with_context(|| format!("Failed to read history in {}", data_dir.display()))?;

    let mut store = EntryStore::new(config.history.max_history_items);
    store.seed(entries);

    if store.is_empty() {
        println!("(empty)");
        return Ok(());
    }
    for (i, entry) in store.iter().enumerate() {
        let view = EntryView::new(entry, config.history.preview_length, false);
        println!("{}", format_entry(i + 1, &view));
    }
    Ok(())
}
