// Board service - Staleness-aware cache around the persisted board
use crate::application::board_repository::BoardRepository;
use crate::domain::board::RankedBoard;
use crate::domain::entry::{Entry, Score};
use crate::error::BoardResult;
use serde::Serialize;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;

/// Title, description and capacity used when the board has to be created.
#[derive(Debug, Clone)]
pub struct BoardDefaults {
    pub title: String,
    pub description: String,
    pub capacity: usize,
}

/// Outcome of offering a score to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub accepted: bool,
    pub rank: Option<usize>,
}

struct CachedBoard {
    board: Arc<RankedBoard>,
    loaded_at: Option<SystemTime>,
}

/// Owns the single board served by this process.
///
/// The in-memory copy is reloaded whenever the snapshot's modification
/// time differs from the one recorded at the last load or save. Two writes
/// landing inside one mtime tick go unnoticed, and nothing locks the file
/// across processes.
#[derive(Clone)]
pub struct BoardService {
    name: String,
    repository: Arc<dyn BoardRepository>,
    cache: Arc<Mutex<CachedBoard>>,
}

impl BoardService {
    /// Loads the named board, or creates and persists a fresh one when no
    /// snapshot exists yet.
    pub async fn open(
        name: impl Into<String>,
        repository: Arc<dyn BoardRepository>,
        defaults: BoardDefaults,
    ) -> BoardResult<Self> {
        let name = name.into();

        let board = if repository.exists(&name).await {
            tracing::info!("Board '{}' exists, loading file", name);
            repository.load(&name).await?
        } else {
            tracing::info!("Board '{}' does not yet exist, creating file", name);
            let board =
                RankedBoard::with_capacity(defaults.title, defaults.description, defaults.capacity);
            repository.save(&board, &name).await?;
            board
        };

        let loaded_at = repository.last_modified(&name).await;
        match loaded_at {
            Some(time) => tracing::info!("Board '{}' last modified: {:?}", name, time),
            None => tracing::warn!("Cannot retrieve last-modified time of board '{}'", name),
        }

        Ok(Self {
            name,
            repository,
            cache: Arc::new(Mutex::new(CachedBoard {
                board: Arc::new(board),
                loaded_at,
            })),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current board, reloaded first if the snapshot changed on disk
    pub async fn board(&self) -> Arc<RankedBoard> {
        let mut cache = self.cache.lock().await;
        self.ensure_fresh(&mut cache).await;
        Arc::clone(&cache.board)
    }

    /// Offers a score stamped with the current time and persists the board
    /// when it is accepted.
    ///
    /// A persistence failure is returned after the in-memory board has
    /// already taken the entry; the previous snapshot stays on disk.
    pub async fn submit(&self, name: &str, score: Score) -> BoardResult<Submission> {
        let mut cache = self.cache.lock().await;
        self.ensure_fresh(&mut cache).await;

        let rank = cache.board.admit(Entry::new(name, score));
        let submission = Submission {
            accepted: rank.is_some(),
            rank,
        };
        tracing::debug!(
            "Score {} by '{}' {}: {}",
            score,
            name,
            if submission.accepted { "ranked" } else { "not ranked" },
            cache.board
        );

        if submission.accepted {
            self.repository.save(&cache.board, &self.name).await?;
            cache.loaded_at = self.repository.last_modified(&self.name).await;
            if cache.loaded_at.is_none() {
                tracing::warn!("Cannot retrieve last-modified time of board '{}'", self.name);
            }
        }

        Ok(submission)
    }

    /// Reloads the cached board if the snapshot's modification time moved.
    /// A failed reload keeps the last good board.
    async fn ensure_fresh(&self, cache: &mut CachedBoard) {
        let modified = self.repository.last_modified(&self.name).await;
        if modified.is_some() && modified == cache.loaded_at {
            return;
        }
        if modified.is_none() {
            tracing::warn!("Cannot retrieve last-modified time of board '{}'", self.name);
        }

        match self.repository.load(&self.name).await {
            Ok(board) => {
                tracing::info!("Board '{}' changed on disk, reloaded", self.name);
                cache.board = Arc::new(board);
                cache.loaded_at = modified;
            }
            Err(e) => {
                tracing::warn!(
                    "Keeping last good copy of board '{}' after failed reload: {}",
                    self.name,
                    e
                );
            }
        }
    }
}
