//! Application configuration.
//!
//! Settings are read from `inflection.toml`. Every section is optional and
//! falls back to the defaults below:
//!
//! ```toml
//! [analysis]
//! default_strategy = "hybrid"
//! default_mode = "percentage"
//! sensitive_min_separation = 2
//! hybrid_min_separation = 3
//!
//! [data]
//! min_year = 2015
//! cutoff_date = "2025-10-01"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [repository]
//! type = "local"
//! seed_file = "data/calls.json"
//! ```
//!
//! `HOST`, `PORT`, `REPOSITORY_TYPE` and `INFLECTION_SEED_FILE` override the
//! file. `INFLECTION_CONFIG` names the file to read.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::{DetectionStrategy, StrategyKind};
use crate::db::RepositorySettings;
use crate::models::{AnalysisMode, DataWindow};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "INFLECTION_CONFIG";

const CONFIG_FILE_NAME: &str = "inflection.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
}

/// Defaults applied when a request names no strategy, mode or separation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub default_strategy: StrategyKind,
    pub default_mode: AnalysisMode,
    pub sensitive_min_separation: usize,
    pub hybrid_min_separation: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_strategy: StrategyKind::Hybrid,
            default_mode: AnalysisMode::Percentage,
            sensitive_min_separation: crate::algorithms::detector::SENSITIVE_MIN_SEPARATION,
            hybrid_min_separation: crate::algorithms::detector::HYBRID_MIN_SEPARATION,
        }
    }
}

impl AnalysisSettings {
    /// Resolve a request's optional strategy and separation against these
    /// defaults.
    pub fn strategy(&self, kind: Option<StrategyKind>, separation: Option<usize>) -> DetectionStrategy {
        let kind = kind.unwrap_or(self.default_strategy);
        let separation = separation.or(match kind {
            StrategyKind::Sensitive => Some(self.sensitive_min_separation),
            StrategyKind::Hybrid => Some(self.hybrid_min_separation),
            StrategyKind::Strict => None,
        });
        DetectionStrategy::from_kind(kind, separation)
    }

    pub fn mode(&self, mode: Option<AnalysisMode>) -> AnalysisMode {
        mode.unwrap_or(self.default_mode)
    }
}

/// Window of rows accepted at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub min_year: i32,
    pub cutoff_date: NaiveDate,
}

impl Default for DataSettings {
    fn default() -> Self {
        let window = DataWindow::default();
        Self {
            min_year: window.min_year,
            cutoff_date: window.cutoff_date,
        }
    }
}

impl DataSettings {
    pub fn window(&self) -> DataWindow {
        DataWindow {
            min_year: self.min_year,
            cutoff_date: self.cutoff_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load configuration from the default location.
    ///
    /// Uses `INFLECTION_CONFIG` when set, otherwise searches for
    /// `inflection.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Without a file the defaults are used. Environment overrides are
    /// applied last.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::default_location() {
                Some(path) => Self::from_file(path)?,
                None => {
                    log::info!("No {} found, using default configuration", CONFIG_FILE_NAME);
                    Self::default()
                }
            },
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn default_location() -> Option<PathBuf> {
        [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Apply `HOST`, `PORT`, `REPOSITORY_TYPE` and `INFLECTION_SEED_FILE`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
        }
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(seed) = std::env::var("INFLECTION_SEED_FILE") {
            self.repository.seed_file = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// Reject separations the detector would refuse and unknown repository
    /// types.
    pub fn validate(&self) -> Result<()> {
        for kind in [StrategyKind::Sensitive, StrategyKind::Hybrid] {
            self.analysis
                .strategy(Some(kind), None)
                .validate()
                .with_context(|| format!("[analysis] {} separation", kind))?;
        }
        self.repository
            .repository_type()
            .context("[repository] type")?;
        Ok(())
    }
}
