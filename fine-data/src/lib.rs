//! Ingestion of externally produced data: scraped player snapshots and
//! federal bracket schedules. Player files can also be served directly
//! through the `file` storage backend.

pub mod bracket_loader;
pub mod file_store;
pub mod player_loader;

pub use bracket_loader::{BracketLoader, BracketLoaderError, BracketRecord};
pub use file_store::PlayerFileFactory;
pub use player_loader::{PlayerFormat, PlayerLoader, PlayerLoaderError, PlayerRow};
