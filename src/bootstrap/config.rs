//! Configuration loading.
//!
//! `load_config` only reads and parses; missing keys take their serde
//! defaults. `resolve_config` picks the file, tolerates its absence and
//! validates the history section before anything is built from it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cs_core::AppConfig;
use cs_infra::fs::{app_config_dir, app_data_dir};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// An explicit path must exist; the default location may be missing, in
/// which case defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => {
            let path = app_config_dir()?.join(CONFIG_FILE_NAME);
            if path.exists() {
                load_config(&path)?
            } else {
                AppConfig::default()
            }
        }
    };

    config
        .history
        .validate()
        .context("Invalid [history] configuration")?;
    Ok(config)
}

/// Command line beats the config file, which beats the platform default.
pub fn resolve_data_dir(cli: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    match cli.or_else(|| config.storage.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => app_data_dir(),
    }
}
