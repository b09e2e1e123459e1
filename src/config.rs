//! Engine configuration.
//!
//! Loaded from a JSON file; every field is optional and falls back to
//! the defaults below.
//!
//! ```json
//! {
//!   "fee_schedule": { "before_lock": "0", "after_lock": "10", "no_show": "20" },
//!   "venmo_note": "Saturday skins",
//!   "duplicate_players": "dedupe"
//! }
//! ```

use crate::league::backout::FeeSchedule;
use crate::settlement::engine::{DuplicatePolicy, SettlementEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backout fees per withdrawal tier.
    pub fee_schedule: FeeSchedule,
    /// Note used for generated payment links.
    pub venmo_note: String,
    /// Treatment of players listed twice in one game.
    pub duplicate_players: DuplicatePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee_schedule: FeeSchedule::default(),
            venmo_note: "Golf settlement".to_string(),
            duplicate_players: DuplicatePolicy::Accept,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn settlement_engine(&self) -> SettlementEngine {
        SettlementEngine::new(self.duplicate_players)
    }
}
