use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::repository::{PlayerRepository, RepositoryError};
use crate::models::PlayerRecord;
use crate::snapshot::PlayerSnapshot;

#[derive(Debug, Default)]
struct Stored {
    players: Vec<PlayerRecord>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Process-local player store. Contents are lost on exit; the `file`
/// backend seeds one from a scraped player file.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    inner: RwLock<Stored>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryRepository {
    async fn replace_players(&self, players: &[PlayerRecord]) -> Result<(), RepositoryError> {
        let mut stored = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        stored.players = players.to_vec();
        stored.refreshed_at = Some(Utc::now());
        Ok(())
    }

    async fn read_snapshot(&self) -> Result<PlayerSnapshot, RepositoryError> {
        let stored = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(PlayerSnapshot::new(stored.players.clone(), stored.refreshed_at))
    }

    async fn count_players(&self) -> Result<usize, RepositoryError> {
        let stored = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(stored.players.len())
    }
}
