#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use cs_app::{ClipboardHistory, RefreshOutcome};
use cs_core::ports::{HistoryEventPort, HistoryRepositoryPort, SystemClipboardPort};
use cs_core::{ClipboardContent, ClipboardEntry, EntryId, HistoryConfig, HistoryEvent, MimeType};

/// In-memory clipboard holding a single representation.
#[derive(Default)]
pub struct FakeClipboard {
    content: Mutex<Option<ClipboardContent>>,
    writes: Mutex<Vec<ClipboardContent>>,
    reads: AtomicUsize,
    clears: AtomicUsize,
    read_delay: Mutex<Option<Duration>>,
    fail_writes: AtomicBool,
}

impl FakeClipboard {
    /// Simulates another application copying `content`.
    pub fn set(&self, content: ClipboardContent) {
        *self.content.lock().unwrap() = Some(content);
    }

    pub fn set_text(&self, text: &str) {
        self.set(ClipboardContent::text(text));
    }

    pub fn current(&self) -> Option<ClipboardContent> {
        self.content.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<ClipboardContent> {
        self.writes.lock().unwrap().clone()
    }

    pub fn written_texts(&self) -> Vec<String> {
        self.writes().iter().map(ClipboardContent::text_lossy).collect()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SystemClipboardPort for FakeClipboard {
    async fn read_content(&self, mime: &MimeType) -> Result<Option<Bytes>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let content = self.content.lock().unwrap().clone();
        Ok(content
            .filter(|content| &content.mime == mime)
            .map(|content| content.bytes))
    }

    async fn write_content(&self, content: &ClipboardContent) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("clipboard owner went away");
        }
        self.writes.lock().unwrap().push(content.clone());
        self.set(content.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.content.lock().unwrap() = None;
        Ok(())
    }
}

/// Repository that keeps every save in memory.
#[derive(Default)]
pub struct MemoryRepository {
    initial: Mutex<Vec<ClipboardEntry>>,
    saves: Mutex<Vec<Vec<ClipboardEntry>>>,
    stored_payloads: Mutex<Vec<String>>,
    deleted_payloads: Mutex<Vec<String>>,
}

impl MemoryRepository {
    pub fn with_entries(entries: Vec<ClipboardEntry>) -> Self {
        Self {
            initial: Mutex::new(entries),
            ..Default::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub fn last_saved(&self) -> Option<Vec<ClipboardEntry>> {
        self.saves.lock().unwrap().last().cloned()
    }

    pub fn last_saved_texts(&self) -> Vec<String> {
        self.last_saved()
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.content().text_lossy())
            .collect()
    }

    pub fn stored_payloads(&self) -> Vec<String> {
        self.stored_payloads.lock().unwrap().clone()
    }

    pub fn deleted_payloads(&self) -> Vec<String> {
        self.deleted_payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryRepositoryPort for MemoryRepository {
    async fn load_history(&self) -> Result<Vec<ClipboardEntry>> {
        Ok(self.initial.lock().unwrap().clone())
    }

    async fn save_history(&self, entries: &[ClipboardEntry]) -> Result<()> {
        self.saves.lock().unwrap().push(entries.to_vec());
        Ok(())
    }

    async fn store_binary_payload(&self, content: &ClipboardContent) -> Result<()> {
        self.stored_payloads.lock().unwrap().push(content.content_hash());
        Ok(())
    }

    async fn delete_binary_payload(&self, content: &ClipboardContent) -> Result<()> {
        self.deleted_payloads.lock().unwrap().push(content.content_hash());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<HistoryEvent>>,
}

impl RecordingEvents {
    pub fn events(&self) -> Vec<HistoryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<HistoryEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn contains(&self, event: &HistoryEvent) -> bool {
        self.events.lock().unwrap().contains(event)
    }
}

impl HistoryEventPort for RecordingEvents {
    fn publish(&self, event: HistoryEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct Harness {
    pub clipboard: Arc<FakeClipboard>,
    pub repository: Arc<MemoryRepository>,
    pub events: Arc<RecordingEvents>,
    pub history: Arc<ClipboardHistory>,
}

impl Harness {
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_repository(config, MemoryRepository::default(), false)
    }

    pub fn with_repository(
        config: HistoryConfig,
        repository: MemoryRepository,
        start_private: bool,
    ) -> Self {
        let clipboard = Arc::new(FakeClipboard::default());
        let repository = Arc::new(repository);
        let events = Arc::new(RecordingEvents::default());
        let history = Arc::new(ClipboardHistory::new(
            clipboard.clone(),
            repository.clone(),
            events.clone(),
            config,
            start_private,
        ));
        Self {
            clipboard,
            repository,
            events,
            history,
        }
    }

    /// Another application copies `text` and the watcher fires.
    pub async fn copy_text(&self, text: &str) -> RefreshOutcome {
        self.clipboard.set_text(text);
        self.history.refresh().await
    }

    /// Like [`copy_text`](Self::copy_text) but returns the captured handle.
    pub async fn capture(&self, text: &str) -> EntryId {
        match self.copy_text(text).await {
            RefreshOutcome::Captured(id) | RefreshOutcome::Reselected(id) => id,
            other => panic!("expected a capture for {text:?}, got {other:?}"),
        }
    }

    /// Previews in navigation order.
    pub async fn labels(&self) -> Vec<String> {
        self.history
            .entries()
            .await
            .into_iter()
            .map(|view| view.preview)
            .collect()
    }

    pub async fn selected_labels(&self) -> Vec<String> {
        self.history
            .entries()
            .await
            .into_iter()
            .filter(|view| view.selected)
            .map(|view| view.preview)
            .collect()
    }

    pub async fn current_label(&self) -> Option<String> {
        self.history.current().await.map(|view| view.preview)
    }
}

pub fn config_with_cap(max_history_items: usize) -> HistoryConfig {
    HistoryConfig {
        max_history_items,
        ..HistoryConfig::default()
    }
}

pub fn deferred_config() -> HistoryConfig {
    HistoryConfig {
        defer_push_on_cycle: true,
        deferred_push_delay_ms: 750,
        ..HistoryConfig::default()
    }
}

/// Advances paused time and lets spawned tasks run.
pub async fn advance_ms(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
