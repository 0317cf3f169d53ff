mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{advance_ms, deferred_config, Harness, MemoryRepository};
use cs_app::RefreshOutcome;
use cs_core::{ClipboardContent, HistoryConfig, HistoryEvent, MimeType};

#[tokio::test]
async fn private_mode_reads_nothing() {
    let h = Harness::with_repository(HistoryConfig::default(), MemoryRepository::default(), true);
    h.clipboard.set_text("password");

    assert_eq!(h.history.refresh().await, RefreshOutcome::Private);
    assert_eq!(h.clipboard.reads(), 0);
    assert!(h.labels().await.is_empty());
}

#[tokio::test]
async fn selection_is_hidden_while_private() {
    let h = Harness::new(HistoryConfig::default());
    h.capture("visible").await;

    h.history.set_privacy_mode(true).await.unwrap();

    assert!(h.history.is_private());
    assert_eq!(h.history.current().await, None);
    assert!(h.selected_labels().await.is_empty());
    assert!(h.events.contains(&HistoryEvent::PrivacyModeChanged { enabled: true }));
}

#[tokio::test]
async fn leaving_private_mode_restores_selection() {
    let h = Harness::new(HistoryConfig::default());
    h.capture("safe").await;
    h.history.set_privacy_mode(true).await.unwrap();

    h.clipboard.set_text("secret");
    assert_eq!(h.history.refresh().await, RefreshOutcome::Private);
    h.history.set_privacy_mode(false).await.unwrap();

    assert_eq!(h.clipboard.current().map(|c| c.text_lossy()).as_deref(), Some("safe"));
    assert_eq!(h.current_label().await.as_deref(), Some("safe"));
    assert_eq!(h.labels().await, vec!["safe"]);
}

#[tokio::test]
async fn leaving_private_mode_without_selection_clears_clipboard() {
    let h = Harness::new(HistoryConfig::default());
    h.history.set_privacy_mode(true).await.unwrap();
    h.clipboard.set_text("secret");

    h.history.set_privacy_mode(false).await.unwrap();

    assert_eq!(h.clipboard.clears(), 1);
    assert!(h.clipboard.current().is_none());
}

#[tokio::test]
async fn repeated_mode_change_is_a_no_op() {
    let h = Harness::new(HistoryConfig::default());
    h.history.set_privacy_mode(false).await.unwrap();
    h.history.set_privacy_mode(true).await.unwrap();
    h.history.set_privacy_mode(true).await.unwrap();

    let changes = h
        .events
        .events()
        .into_iter()
        .filter(|event| matches!(event, HistoryEvent::PrivacyModeChanged { .. }))
        .count();
    assert_eq!(changes, 1);
}

#[tokio::test(start_paused = true)]
async fn entering_private_mode_cancels_deferred_push() {
    let h = Harness::new(deferred_config());
    h.capture("A").await;
    h.capture("B").await;

    h.history.next().await.unwrap();
    h.history.set_privacy_mode(true).await.unwrap();
    advance_ms(1_000).await;

    assert!(h.clipboard.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn payload_read_while_turning_private_is_discarded() {
    let h = Harness::new(HistoryConfig::default());
    let image = ClipboardContent::new(MimeType::image_png(), vec![0x89, b'P', b'N', b'G']);
    h.clipboard.set(image.clone());
    h.clipboard.set_read_delay(Duration::from_millis(50));

    let history = Arc::clone(&h.history);
    let refresh = tokio::spawn(async move { history.refresh().await });
    while h.clipboard.reads() == 0 {
        tokio::task::yield_now().await;
    }
    h.history.set_privacy_mode(true).await.unwrap();

    assert_eq!(refresh.await.unwrap(), RefreshOutcome::Private);
    assert!(h.labels().await.is_empty());
    assert_eq!(h.repository.stored_payloads(), vec![image.content_hash()]);
    assert_eq!(h.repository.deleted_payloads(), vec![image.content_hash()]);
}
