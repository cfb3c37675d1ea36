//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{ensure, Result};

use crate::domain::value_objects::RulesSettings;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON snapshot of actors to load into the in-memory store
    pub snapshot_path: PathBuf,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// House-rule knobs
    pub rules: RulesSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let rules = RulesSettings::from_env();
        ensure!(
            (0..=100).contains(&rules.drone_repair_percent)
                && (0..=100).contains(&rules.improved_drone_repair_percent),
            "Drone repair percentages must be between 0 and 100"
        );

        Ok(Self {
            snapshot_path: env::var("SFRPG_SNAPSHOT_PATH")
                .unwrap_or_else(|_| "data/actors.json".to_string())
                .into(),
            log_filter: env::var("SFRPG_LOG_FILTER")
                .unwrap_or_else(|_| "sfrpg_engine=debug".to_string()),
            rules,
        })
    }
}
