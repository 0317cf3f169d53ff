use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "clipstack";

/// Application data root. The caller creates it when needed.
///
/// - Linux: `$XDG_DATA_HOME/clipstack` or `~/.local/share/clipstack`
/// - macOS: `~/Library/Application Support/clipstack`
/// - Windows: `%APPDATA%\clipstack`
pub fn app_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Unable to determine platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Directory holding `config.toml`.
pub fn app_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Unable to determine platform config directory")?;
    Ok(base.join(APP_DIR_NAME))
}
