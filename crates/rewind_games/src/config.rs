//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rewind_tictactoe::{Mode, Player};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Mode choice as written in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeChoice {
    /// Play against the computer.
    Single,
    /// Two humans share the keyboard.
    Multi,
}

impl From<ModeChoice> for Mode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Single => Mode::SinglePlayer,
            ModeChoice::Multi => Mode::Multiplayer,
        }
    }
}

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side the computer plays in single player mode.
    #[serde(default = "default_ai_side")]
    ai_side: Player,

    /// Mode to start in; when unset the mode menu is shown.
    #[serde(default)]
    default_mode: Option<ModeChoice>,

    /// File the terminal UI writes its log to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_ai_side() -> Player {
    Player::O
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("rewind_games.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_side: default_ai_side(),
            default_mode: None,
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(ai_side = %config.ai_side, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command line overrides on top of file values.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, ai_side: Option<Player>, mode: Option<ModeChoice>) -> Self {
        if let Some(side) = ai_side {
            debug!(%side, "Overriding computer side");
            self.ai_side = side;
        }
        if mode.is_some() {
            self.default_mode = mode;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = GameConfig::default().with_overrides(Some(Player::X), Some(ModeChoice::Multi));
        assert_eq!(*config.ai_side(), Player::X);
        assert_eq!(*config.default_mode(), Some(ModeChoice::Multi));
    }

    #[test]
    fn test_no_overrides_keep_file_values() {
        let config: GameConfig = toml::from_str("default_mode = \"single\"").unwrap();
        let config = config.with_overrides(None, None);
        assert_eq!(*config.default_mode(), Some(ModeChoice::Single));
        assert_eq!(*config.ai_side(), Player::O);
    }
}
