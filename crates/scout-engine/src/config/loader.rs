use super::schema::ScoutConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Duplicate scenario name in config: {0}")]
    DuplicateScenario(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./scout.yaml
    /// 2. ~/.scout/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<ScoutConfig, ConfigError> {
        let local_config = PathBuf::from("./scout.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".scout").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(ScoutConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<ScoutConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<ScoutConfig, ConfigError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(ScoutConfig::default());
        }
        let config: ScoutConfig = serde_yaml::from_str(content)?;

        let mut seen = std::collections::HashSet::new();
        for name in config.scenario_names() {
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateScenario(name.to_string()));
            }
        }
        Ok(config)
    }
}
