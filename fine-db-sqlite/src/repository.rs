use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fine_core::{League, PlayerRecord, PlayerRepository, PlayerSnapshot, RepositoryError};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing::debug;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connect to `database_url`, creating the file if it does not exist.
    ///
    /// Accepts sqlx URLs (`sqlite:players.db`), bare paths and `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(FromRow)]
struct PlayerRow {
    name: String,
    team: String,
    gross_salary: String,
    league: Option<String>,
}

impl TryFrom<PlayerRow> for PlayerRecord {
    type Error = RepositoryError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        let league = row
            .league
            .as_deref()
            .map(|code| {
                League::parse(code)
                    .ok_or_else(|| RepositoryError::Database(format!("Invalid league: {code}")))
            })
            .transpose()?;

        Ok(PlayerRecord {
            name: row.name,
            team: row.team,
            gross_salary: parse_decimal(&row.gross_salary)?,
            league,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Failed to parse decimal '{}': {}", s, e)))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl PlayerRepository for SqliteRepository {
    async fn replace_players(&self, players: &[PlayerRecord]) -> Result<(), RepositoryError> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM players")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for player in players {
            sqlx::query(
                "INSERT INTO players (name, team, gross_salary, league) VALUES (?, ?, ?, ?)",
            )
            .bind(&player.name)
            .bind(&player.team)
            .bind(player.gross_salary.to_string())
            .bind(player.league.map(|l| l.as_str()))
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        sqlx::query("INSERT OR REPLACE INTO snapshot_meta (id, refreshed_at) VALUES (1, ?)")
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        debug!(players = players.len(), "replaced player snapshot");
        Ok(())
    }

    async fn read_snapshot(&self) -> Result<PlayerSnapshot, RepositoryError> {
        // One transaction so a concurrent replace cannot land between reads.
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let rows: Vec<PlayerRow> =
            sqlx::query_as("SELECT name, team, gross_salary, league FROM players ORDER BY id")
                .fetch_all(&mut *tx)
                .await
                .map_err(db_error)?;

        let stamp: Option<(String,)> =
            sqlx::query_as("SELECT refreshed_at FROM snapshot_meta WHERE id = 1")
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        let players = rows
            .into_iter()
            .map(PlayerRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let refreshed_at = stamp.map(|(s,)| parse_datetime(&s)).transpose()?;
        debug!(players = players.len(), "read player snapshot");

        Ok(PlayerSnapshot::new(players, refreshed_at))
    }

    async fn count_players(&self) -> Result<usize, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        usize::try_from(count).map_err(|e| RepositoryError::Database(e.to_string()))
    }
}
