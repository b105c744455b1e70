use std::path::PathBuf;

use uuid::Uuid;

use crate::error::ApiResult;

/// Stores uploaded files under a configured root directory. Stored paths are
/// relative (`<root>/<uuid>_<original-name>`) and are what gets persisted on
/// the owning product.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> FileStore {
        FileStore { root: root.into() }
    }

    /// Writes the bytes under a collision-free generated name and returns
    /// the relative path. Identical content uploaded twice gets two distinct
    /// paths; there is no deduplication and no content inspection.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> ApiResult<String> {
        if !self.root.exists() {
            tokio::fs::create_dir_all(&self.root).await?;
        }
        let file_name = format!("{}_{}", Uuid::new_v4(), original_name);
        tokio::fs::write(self.root.join(&file_name), data).await?;
        Ok(format!("{}/{}", self.root.display(), file_name))
    }

    pub async fn read(&self, stored_path: &str) -> ApiResult<Vec<u8>> {
        Ok(tokio::fs::read(stored_path).await?)
    }

    /// Best-effort removal, used to compensate when a database write fails
    /// after the file already landed on disk.
    pub async fn remove(&self, stored_path: &str) {
        if let Err(err) = tokio::fs::remove_file(stored_path).await {
            tracing::warn!(path = stored_path, error = %err, "failed to remove stored file");
        }
    }
}
