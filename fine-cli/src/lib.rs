//! Command-line front end for the fine comparison engine.

pub mod app;
pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod report;

pub use app::{App, Settings, build_registry, load_snapshot};
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError, ConfigSource};
