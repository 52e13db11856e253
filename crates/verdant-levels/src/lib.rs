//! Level data for VERDANT.
//!
//! Wave plans, defender rosters and starting balances, the built-in level
//! catalog, and the persisted progress record that gates the roster.

pub mod catalog;
pub mod config;
pub mod progress;

pub use catalog::{builtin_levels, find_level};
pub use config::{LevelConfig, SpawnGroup, WaveConfig};
pub use progress::Progress;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("unknown level {0}")]
    UnknownLevel(u32),
    #[error("invalid level data: {0}")]
    Invalid(String),
    #[error("malformed level json")]
    Json(#[from] serde_json::Error),
    #[error("failed to read level data")]
    Io(#[from] std::io::Error),
}
