// JSON file repository implementation
use crate::application::board_repository::BoardRepository;
use crate::domain::board::RankedBoard;
use crate::error::{BoardError, BoardResult};
use crate::infrastructure::snapshot;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::io::AsyncWriteExt;

/// Stores each board as `<data_dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    data_dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the snapshot for `name`. Names must stay inside the data dir.
    pub fn path_for(&self, name: &str) -> BoardResult<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(BoardError::InvalidName(name.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", name)))
    }

    async fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let written = async {
            let mut file = options.open(&tmp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, path).await
        }
        .await;

        // Never leave a partial temp file next to the snapshot.
        if written.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        written
    }
}

#[async_trait]
impl BoardRepository for JsonFileRepository {
    async fn save(&self, board: &RankedBoard, name: &str) -> BoardResult<()> {
        let path = self.path_for(name)?;
        let bytes = snapshot::encode(board).inspect_err(|e| {
            tracing::error!("Unable to convert board '{}' to json: {}", name, e);
        })?;

        Self::write_atomically(&path, &bytes).await.map_err(|source| {
            tracing::error!("Unable to save board to {}: {}", path.display(), source);
            BoardError::Storage { path, source }
        })?;

        tracing::debug!("Saved board '{}' ({} entries)", name, board.len());
        Ok(())
    }

    async fn load(&self, name: &str) -> BoardResult<RankedBoard> {
        let path = self.path_for(name)?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!("Unable to read {}: {}", path.display(), e);
            BoardError::Unavailable {
                name: name.to_string(),
                reason: format!("unable to read {}: {}", path.display(), e),
            }
        })?;

        snapshot::decode(name, &bytes).inspect_err(|e| {
            tracing::error!("Unable to load board from {}: {}", path.display(), e);
        })
    }

    async fn exists(&self, name: &str) -> bool {
        match self.path_for(name) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn last_modified(&self, name: &str) -> Option<SystemTime> {
        let path = self.path_for(name).ok()?;
        tokio::fs::metadata(path).await.ok()?.modified().ok()
    }
}
