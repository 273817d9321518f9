//! Dashboard configuration, persisted as JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::metrics::{ColumnMapping, IngestOptions, DEFAULT_REFERENCE_YEAR};

pub const ENV_REFERENCE_YEAR: &str = "DASHBOARD_REFERENCE_YEAR";
pub const ENV_LOG: &str = "DASHBOARD_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Year that bare month labels are resolved against
    pub reference_year: i32,
    /// Header names of the caller's metrics table
    pub columns: ColumnMapping,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            columns: ColumnMapping::default(),
            log_filter: "dashboard_core=info".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            columns: self.columns.clone(),
            reference_year: self.reference_year,
        }
    }

    /// Apply `DASHBOARD_REFERENCE_YEAR` and `DASHBOARD_LOG` when set.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(ENV_REFERENCE_YEAR) {
            match raw.trim().parse::<i32>() {
                Ok(year) => self.reference_year = year,
                Err(_) => warn!("Ignoring {}={:?}: not a year", ENV_REFERENCE_YEAR, raw),
            }
        }
        if let Ok(filter) = std::env::var(ENV_LOG) {
            self.log_filter = filter;
        }
        self
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the config, writing the default first if the file does not exist.
    pub fn load(&self) -> Result<DashboardConfig> {
        if !self.path.exists() {
            let default = DashboardConfig::default();
            self.save(&default)?;
            info!("Wrote default config to {}", self.path.display());
            return Ok(default);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config file {}", self.path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", self.path.display()))?;
        config
            .columns
            .validate()
            .with_context(|| format!("Invalid column mapping in {}", self.path.display()))?;
        Ok(config)
    }

    pub fn save(&self, config: &DashboardConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config file {}", self.path.display()))?;
        Ok(())
    }
}
