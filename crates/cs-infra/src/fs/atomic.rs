use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Writes `bytes` next to `path` and renames over it, so readers see either
/// the old file or the complete new one.
pub async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create dir failed: {}", dir.display()))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    fs::write(tmp_path, bytes)
        .await
        .with_context(|| format!("write temp file failed: {}", tmp_path.display()))?;

    // TODO: rename over an existing file is not atomic on every Windows filesystem.
    fs::rename(tmp_path, path).await.with_context(|| {
        format!(
            "rename temp file failed: {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn creates_parent_dirs_and_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");

        atomic_write(&path, b"first").await.unwrap();
        atomic_write(&path, b"second").await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"second");
        assert!(!dir.path().join("nested").join("file.json.tmp").exists());
    }
}
