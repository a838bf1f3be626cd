//! Read-only views over the scraped player list.
//!
//! A [`PlayerSnapshot`] never changes once built. [`SnapshotStore`] holds the
//! current one behind an `Arc`; a refresh builds a new snapshot and swaps the
//! pointer, so readers keep whatever snapshot they started with.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::db::{PlayerRepository, RepositoryError};
use crate::{League, PlayerRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// No scrape has landed yet.
    #[error("player data is not ready yet")]
    NotReady,

    #[error("no player named {0:?}")]
    PlayerNotFound(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSnapshot {
    players: Vec<PlayerRecord>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl PlayerSnapshot {
    pub fn new(
        players: Vec<PlayerRecord>,
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            players,
            refreshed_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    fn ready(&self) -> Result<&[PlayerRecord], SnapshotError> {
        if self.players.is_empty() {
            Err(SnapshotError::NotReady)
        } else {
            Ok(&self.players)
        }
    }

    /// Distinct team identifiers, sorted, optionally limited to one league.
    pub fn teams(
        &self,
        league: Option<League>,
    ) -> Result<Vec<String>, SnapshotError> {
        let teams: BTreeSet<&str> = self
            .ready()?
            .iter()
            .filter(|p| p.in_league(league))
            .map(|p| p.team.as_str())
            .collect();

        Ok(teams.into_iter().map(str::to_string).collect())
    }

    /// Players on `team` (case-insensitive), optionally limited to one league.
    ///
    /// An unknown team yields an empty list, not an error.
    pub fn players_for_team(
        &self,
        team: &str,
        league: Option<League>,
    ) -> Result<Vec<&PlayerRecord>, SnapshotError> {
        let team = team.trim();
        Ok(self
            .ready()?
            .iter()
            .filter(|p| p.in_league(league) && p.team.eq_ignore_ascii_case(team))
            .collect())
    }

    pub fn find_player(
        &self,
        name: &str,
    ) -> Result<&PlayerRecord, SnapshotError> {
        let name = name.trim();
        self.ready()?
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SnapshotError::PlayerNotFound(name.to_string()))
    }
}

/// Holder of the current snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<PlayerSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: PlayerSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn current(&self) -> Arc<PlayerSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(
        &self,
        snapshot: PlayerSnapshot,
    ) {
        let players = snapshot.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
        info!(players, "player snapshot replaced");
    }

    /// Rebuilds the snapshot from `repository` and swaps it in.
    ///
    /// On error the current snapshot is left untouched.
    pub async fn refresh_from(
        &self,
        repository: &dyn PlayerRepository,
    ) -> Result<usize, RepositoryError> {
        let snapshot = repository.read_snapshot().await?;
        let count = snapshot.len();

        self.replace(snapshot);
        Ok(count)
    }
}
