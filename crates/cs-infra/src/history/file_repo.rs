use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use cs_core::ports::HistoryRepositoryPort;
use cs_core::{ClipboardContent, ClipboardEntry};

use super::record::{is_content_hash, EntryRecord, RecordBody};
use crate::fs::atomic::atomic_write;

const REGISTRY_FILE_NAME: &str = "registry.json";
const PAYLOADS_DIR: &str = "payloads";

/// Persists the history under one data directory:
///
/// ```text
/// <root>/registry.json        entries in navigation order
/// <root>/payloads/<hash>      raw bytes of non-text entries
/// ```
pub struct FileHistoryRepository {
    root: PathBuf,
}

impl FileHistoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE_NAME)
    }

    fn payload_path(&self, hash: &str) -> Result<PathBuf> {
        anyhow::ensure!(is_content_hash(hash), "invalid payload reference: {hash}");
        Ok(self.root.join(PAYLOADS_DIR).join(hash))
    }

    async fn load_record(&self, record: &EntryRecord) -> Option<ClipboardEntry> {
        let content = match record.body() {
            Some(RecordBody::Inline(content)) => content,
            Some(RecordBody::External { mime, hash }) => {
                let path = self.payload_path(&hash).ok()?;
                match fs::read(&path).await {
                    Ok(bytes) => ClipboardContent::new(mime, bytes),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "payload unreadable, skipping entry");
                        return None;
                    }
                }
            }
            None => {
                warn!(mimetype = %record.mimetype, "malformed history record, skipping");
                return None;
            }
        };

        if content.is_empty() {
            return None;
        }
        Some(ClipboardEntry::new(content, record.favorite))
    }
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("remove payload failed: {}", path.display())),
    }
}

#[async_trait]
impl HistoryRepositoryPort for FileHistoryRepository {
    /// A missing registry is an empty history. Entries whose payload cannot
    /// be read are skipped; the rest still load.
    async fn load_history(&self) -> Result<Vec<ClipboardEntry>> {
        let path = self.registry_path();
        let content = match fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history registry yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read registry failed: {}", path.display()))
            }
        };

        let records: Vec<EntryRecord> = serde_json::from_str(&content)
            .with_context(|| format!("parse registry failed: {}", path.display()))?;

        let mut entries = Vec::with_capacity(records.len());
        for record in &records {
            if let Some(entry) = self.load_record(record).await {
                entries.push(entry);
            }
        }
        debug!(loaded = entries.len(), skipped = records.len() - entries.len(), "history registry read");
        Ok(entries)
    }

    async fn save_history(&self, entries: &[ClipboardEntry]) -> Result<()> {
        let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from_entry).collect();
        let content = serde_json::to_vec_pretty(&records).context("serialize registry failed")?;
        atomic_write(&self.registry_path(), &content).await
    }

    async fn store_binary_payload(&self, content: &ClipboardContent) -> Result<()> {
        let path = self.payload_path(&content.content_hash())?;
        if fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }
        atomic_write(&path, &content.bytes).await?;
        debug!(path = %path.display(), size = content.size_bytes(), "payload stored");
        Ok(())
    }

    async fn delete_binary_payload(&self, content: &ClipboardContent) -> Result<()> {
        let path = self.payload_path(&content.content_hash())?;
        remove_if_exists(&path).await
    }
}
