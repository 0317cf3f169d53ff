mod app_config;
mod history_config;

pub use app_config::{AppConfig, GeneralConfig, StorageConfig};
pub use history_config::{
    ConfigError, HistoryConfig, DEFAULT_DEFERRED_PUSH_DELAY_MS, DEFAULT_MAX_HISTORY_ITEMS,
    DEFAULT_PREVIEW_LENGTH,
};
