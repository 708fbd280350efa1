#![warn(clippy::all, clippy::pedantic)]

use log::{debug, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::GameConfig;

// Config file used when the platform has no config directory
const CONFIG_FILE_PATH: &str = "config/showdown.toml";

pub const CONFIG_ENV_VAR: &str = "SHOWDOWN_CONFIG";

/// Loads the configuration from its usual location.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    load_config_from(&config_file_path())
}

/// Loads the configuration at `path`, writing a default file first if there
/// is none.
pub fn load_config_from(path: &Path) -> Result<GameConfig, ConfigError> {
    if !path.exists() {
        info!("No config at {}, writing defaults", path.display());
        let default_config = GameConfig::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path)?;
    let config: GameConfig = toml::from_str(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &GameConfig) -> Result<(), ConfigError> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;
    Ok(())
}

/// `$SHOWDOWN_CONFIG`, else `<config dir>/showdown/config.toml`.
#[must_use]
pub fn config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("showdown").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "malformed config: {e}"),
            ConfigError::Serialize(e) => write!(f, "could not write config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
