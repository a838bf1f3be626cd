use async_trait::async_trait;
use thiserror::Error;

use crate::models::PlayerRecord;
use crate::snapshot::PlayerSnapshot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for the scraped player snapshot.
///
/// The snapshot is replaced wholesale on every scrape; there are no partial
/// updates.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Atomically swaps the stored players for `players` and stamps the
    /// refresh time.
    async fn replace_players(&self, players: &[PlayerRecord]) -> Result<(), RepositoryError>;

    /// Reads the players together with their refresh stamp, both taken from
    /// the same stored state.
    async fn read_snapshot(&self) -> Result<PlayerSnapshot, RepositoryError>;

    async fn count_players(&self) -> Result<usize, RepositoryError>;
}
