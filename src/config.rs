use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::ai::QLearningConfig;
use crate::error::ConfigError;
use crate::persistence::PersistenceConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub learning: QLearningConfig,
    pub persistence: PersistenceConfig,
    pub logging: LoggingConfig,
}

/// Log file destination and verbosity.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("ai_game_suite.log"),
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`, or `None` if it names no known level.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.level.parse().ok()
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let QLearningConfig {
            alpha,
            gamma,
            epsilon,
        } = self.learning;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ConfigError::Validation(
                "learning.alpha must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&gamma) {
            return Err(ConfigError::Validation(
                "learning.gamma must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(ConfigError::Validation(
                "learning.epsilon must be in [0, 1]".into(),
            ));
        }

        if self.persistence.rps_table.trim().is_empty() {
            return Err(ConfigError::Validation(
                "persistence.rps_table must not be empty".into(),
            ));
        }

        if self.logging.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "logging.file must not be empty".into(),
            ));
        }
        if self.logging.level_filter().is_none() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of off, error, warn, info, debug, trace",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
