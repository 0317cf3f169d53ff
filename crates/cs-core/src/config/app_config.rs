//! Application configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::HistoryConfig;

/// Application configuration
///
/// Everything the process needs at startup. The `history` section is the part
/// handed to the engine and may be replaced at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,

    pub history: HistoryConfig,

    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Start with capture suspended.
    pub start_in_private_mode: bool,
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the history snapshot, payloads and logs.
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
}
