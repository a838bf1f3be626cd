use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use fine_core::db::{
    DbConfig, InMemoryRepository, PlayerRepository, RepositoryError, RepositoryFactory,
};
use tracing::debug;

use crate::player_loader::{PlayerFormat, PlayerLoader, PlayerLoaderError};

/// Serves a scraped player file (`.json` or `.csv`) from memory.
///
/// `connection_string` is the file path. The file is read once when the
/// repository is created; later writes only touch the in-memory copy.
pub struct PlayerFileFactory;

fn configuration(
    path: &str,
    err: PlayerLoaderError,
) -> RepositoryError {
    RepositoryError::Configuration(format!("{path}: {err}"))
}

#[async_trait]
impl RepositoryFactory for PlayerFileFactory {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn PlayerRepository>, RepositoryError> {
        let path = config.connection_string.as_str();
        let format =
            PlayerFormat::from_path(Path::new(path)).map_err(|e| configuration(path, e))?;
        let file =
            File::open(path).map_err(|e| RepositoryError::Connection(format!("{path}: {e}")))?;

        let rows = PlayerLoader::parse(file, format).map_err(|e| configuration(path, e))?;
        let records = PlayerLoader::validate(rows).map_err(|e| configuration(path, e))?;

        let repo = InMemoryRepository::new();
        PlayerLoader::load(&repo, &records)
            .await
            .map_err(|e| configuration(path, e))?;
        debug!(path, players = records.len(), "seeded in-memory player store");

        Ok(Box::new(repo))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn test_data(name: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test-data")
            .join(name)
            .display()
            .to_string()
    }

    fn config(path: String) -> DbConfig {
        DbConfig {
            backend: "file".to_string(),
            connection_string: path,
        }
    }

    #[tokio::test]
    async fn seeds_store_from_json_and_csv() {
        for name in ["players.json", "players.csv"] {
            let repo = PlayerFileFactory
                .create(&config(test_data(name)))
                .await
                .expect("player file should open");

            assert_eq!(repo.count_players().await, Ok(7), "{name}");
            assert!(repo.read_snapshot().await.unwrap().refreshed_at().is_some());
        }
    }

    #[tokio::test]
    async fn missing_file_is_a_connection_error() {
        let result = PlayerFileFactory
            .create(&config(test_data("absent.json")))
            .await;

        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }

    #[tokio::test]
    async fn unsupported_extension_is_a_configuration_error() {
        let result = PlayerFileFactory
            .create(&config(test_data("federal_brackets.txt")))
            .await;

        assert!(matches!(result, Err(RepositoryError::Configuration(_))));
    }
}
