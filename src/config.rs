use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::game::{GameMode, DEFAULT_PLAYER_NAME};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Who plays, and how the heuristic player draws its random columns.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub first_player: String,
    /// Only used in two-player mode.
    pub second_player: String,
    /// Only used in single-player mode.
    pub computer_name: String,
    /// Seed for the heuristic player's fallback column. Random when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            mode: GameMode::SinglePlayer,
            first_player: DEFAULT_PLAYER_NAME.to_string(),
            second_player: DEFAULT_PLAYER_NAME.to_string(),
            computer_name: "Computer".to_string(),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "session.first_player must not be empty".into(),
            ));
        }
        match self.mode {
            GameMode::TwoPlayer if self.second_player.trim().is_empty() => Err(
                ConfigError::Validation("session.second_player must not be empty".into()),
            ),
            GameMode::SinglePlayer if self.computer_name.trim().is_empty() => Err(
                ConfigError::Validation("session.computer_name must not be empty".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Where log output goes. The terminal is owned by the UI, so logs go to a file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            file: PathBuf::from("connect_four.log"),
        }
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

    /// Load configuration from a TOML file, or `None` if the file does not
    /// exist. Callers decide how to report the fallback to defaults.
    pub fn load_if_present(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.validate()?;

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }
        if self.logging.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "logging.file must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
