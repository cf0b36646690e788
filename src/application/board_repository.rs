// Repository trait for board snapshot storage
use crate::domain::board::RankedBoard;
use crate::error::BoardResult;
use async_trait::async_trait;
use std::time::SystemTime;

#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Overwrite the stored snapshot of `name` with the full board
    async fn save(&self, board: &RankedBoard, name: &str) -> BoardResult<()>;

    /// Load the stored snapshot of `name`
    /// Missing or corrupt snapshots are an error, never an empty board
    async fn load(&self, name: &str) -> BoardResult<RankedBoard>;

    /// Whether a snapshot of `name` has been stored
    async fn exists(&self, name: &str) -> bool;

    /// Modification time of the stored snapshot, `None` if it cannot be read
    async fn last_modified(&self, name: &str) -> Option<SystemTime>;
}
