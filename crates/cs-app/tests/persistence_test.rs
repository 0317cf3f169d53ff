mod common;

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use mockall::mock;

use common::{config_with_cap, FakeClipboard, Harness, MemoryRepository, RecordingEvents};
use cs_app::{ClipboardHistory, RefreshOutcome};
use cs_core::ports::HistoryRepositoryPort;
use cs_core::{ClipboardContent, ClipboardEntry, HistoryConfig, HistoryEvent};

mock! {
    pub Repository {}

    #[async_trait]
    impl HistoryRepositoryPort for Repository {
        async fn load_history(&self) -> anyhow::Result<Vec<ClipboardEntry>>;
        async fn save_history(&self, entries: &[ClipboardEntry]) -> anyhow::Result<()>;
        async fn store_binary_payload(&self, content: &ClipboardContent) -> anyhow::Result<()>;
        async fn delete_binary_payload(&self, content: &ClipboardContent) -> anyhow::Result<()>;
    }
}

fn history_with(repository: MockRepository) -> (Arc<FakeClipboard>, Arc<RecordingEvents>, ClipboardHistory) {
    let clipboard = Arc::new(FakeClipboard::default());
    let events = Arc::new(RecordingEvents::default());
    let history = ClipboardHistory::new(
        clipboard.clone(),
        Arc::new(repository),
        events.clone(),
        HistoryConfig::default(),
        false,
    );
    (clipboard, events, history)
}

fn is_persistence_failure(event: &HistoryEvent) -> bool {
    matches!(event, HistoryEvent::PersistenceFailed { .. })
}

#[tokio::test]
async fn save_failure_keeps_memory_authoritative() {
    let mut repository = MockRepository::new();
    repository
        .expect_save_history()
        .times(1)
        .returning(|_| Err(anyhow!("disk full")));
    let (clipboard, events, history) = history_with(repository);
    clipboard.set_text("kept");

    let outcome = history.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Captured(_)));
    assert_eq!(history.entries().await.len(), 1);
    assert!(events.events().iter().any(is_persistence_failure));
}

#[tokio::test]
async fn load_failure_starts_empty() {
    let mut repository = MockRepository::new();
    repository
        .expect_load_history()
        .times(1)
        .returning(|| Err(anyhow!("corrupt registry")));
    let (_, events, history) = history_with(repository);

    assert_eq!(history.load().await, 0);
    assert!(history.entries().await.is_empty());
    assert!(events.events().iter().any(is_persistence_failure));
}

#[tokio::test]
async fn payload_store_failure_aborts_capture() {
    let mut repository = MockRepository::new();
    repository
        .expect_store_binary_payload()
        .returning(|_| Err(anyhow!("read-only filesystem")));
    repository.expect_save_history().never();
    let (clipboard, _, history) = history_with(repository);
    clipboard.set(ClipboardContent::new(
        cs_core::MimeType::image_png(),
        vec![0x89, b'P', b'N', b'G'],
    ));

    assert_eq!(history.refresh().await, RefreshOutcome::Failed);
    assert!(history.entries().await.is_empty());
}

#[tokio::test]
async fn load_selects_first_entry_without_pushing() {
    let favorite = ClipboardEntry::new(ClipboardContent::text("pinned"), true);
    let recent = ClipboardEntry::new(ClipboardContent::text("recent"), false);
    let older = ClipboardEntry::new(ClipboardContent::text("older"), false);
    let h = Harness::with_repository(
        HistoryConfig::default(),
        MemoryRepository::with_entries(vec![recent, older, favorite]),
        false,
    );

    assert_eq!(h.history.load().await, 3);

    assert_eq!(h.labels().await, vec!["recent", "older", "pinned"]);
    assert_eq!(h.current_label().await.as_deref(), Some("recent"));
    assert!(h.clipboard.writes().is_empty());
    assert!(h.events.contains(&HistoryEvent::Loaded { count: 3 }));
    // Nothing changed, so nothing is written back.
    assert_eq!(h.repository.save_count(), 0);
}

#[tokio::test]
async fn load_enforces_cap_and_drops_duplicates() {
    let entries = ["a", "b", "a", "c"]
        .into_iter()
        .map(|text| ClipboardEntry::new(ClipboardContent::text(text), false))
        .collect();
    let h = Harness::with_repository(
        config_with_cap(2),
        MemoryRepository::with_entries(entries),
        false,
    );

    assert_eq!(h.history.load().await, 2);

    assert_eq!(h.labels().await, vec!["a", "b"]);
    assert_eq!(h.repository.last_saved_texts(), vec!["a", "b"]);
}

#[tokio::test]
async fn cache_only_favorites_filters_snapshot() {
    let h = Harness::new(HistoryConfig {
        cache_only_favorites: true,
        ..HistoryConfig::default()
    });
    let a = h.capture("a").await;
    h.capture("b").await;

    h.history.toggle_favorite(&a).await.unwrap();

    assert_eq!(h.repository.last_saved_texts(), vec!["a"]);
    assert_eq!(h.labels().await, vec!["b", "a"]);
}

#[tokio::test]
async fn every_mutation_is_persisted() {
    let h = Harness::new(HistoryConfig::default());
    let a = h.capture("a").await;
    let b = h.capture("b").await;
    assert_eq!(h.repository.save_count(), 2);

    h.history.toggle_favorite(&a).await.unwrap();
    h.history.move_to_front(&b).await.unwrap();
    h.history.remove(&b).await.unwrap();
    h.history.clear_history().await;

    assert_eq!(h.repository.save_count(), 6);
    assert_eq!(h.repository.last_saved_texts(), vec!["a"]);
}
