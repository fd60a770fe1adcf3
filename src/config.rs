use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use playlistr::engine::DEFAULT_RETRY_BUDGET;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Maximum number of requeue passes per compute run.
    pub retry_budget: u32,
    /// Fixed shuffle seed; random per run when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry_budget: DEFAULT_RETRY_BUDGET,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StorageConfig {
    pub state_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("playlistr")
                .join("state.json"),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .playlistr.yml in current directory
    /// 3. ~/.config/playlistr/playlistr.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try project config
        let project_config = PathBuf::from(format!(".{}.yml", project_name));
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", project_config.display(), e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.engine.retry_budget == 0 {
            eyre::bail!("engine.retry-budget must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine.retry_budget, 30);
        assert!(config.engine.seed.is_none());
        assert!(config.storage.state_file.ends_with("playlistr/state.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("playlistr.yml");
        fs::write(
            &path,
            "engine:\n  retry-budget: 12\n  seed: 7\nstorage:\n  state-file: /tmp/state.json\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.engine.retry_budget, 12);
        assert_eq!(config.engine.seed, Some(7));
        assert_eq!(config.storage.state_file, PathBuf::from("/tmp/state.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("playlistr.yml");
        fs::write(&path, "engine:\n  seed: 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.engine.retry_budget, 30);
        assert_eq!(config.engine.seed, Some(3));
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("playlistr.yml");
        fs::write(&path, "engine:\n  retry-budget: 0\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let path = PathBuf::from("/nonexistent/playlistr.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
