pub mod calculations;
pub mod db;
pub mod models;
pub mod request;
pub mod service;
pub mod snapshot;
pub mod tables;

pub use db::repository::{PlayerRepository, RepositoryError};
pub use models::*;
pub use request::{CalculationRequest, CalculationResponse, InputError, RawCalculationRequest};
pub use service::{CalculationOutcome, ComparisonOutcome, FineService};
pub use snapshot::{PlayerSnapshot, SnapshotError, SnapshotStore};
