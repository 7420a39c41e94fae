use crate::clock::{MAX_RATE_HZ, MIN_RATE_HZ};
use crate::edit::EditMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or saving a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(std::io::Error),
    #[error("failed to write config file: {0}")]
    Write(std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(serde_json::Error),
}

/// Application settings for export/import. The grid contents themselves are
/// never persisted; this covers how a fresh simulation is set up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Edit mode used for pointer input
    pub mode: EditMode,
    /// Tick rate in generations per second
    pub rate_hz: f64,
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Density of the initial random fill (0 = start empty)
    pub fill_density: f64,
}

impl AppConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Parse)?;
        fs::write(path, json).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
        let mut config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.rate_hz = config.rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ);
        config.fill_density = config.fill_density.clamp(0.0, 1.0);
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            mode: EditMode::default(),
            rate_hz: 5.0,
            grid_width: 60,
            grid_height: 40,
            fill_density: 0.0,
        }
    }
}

/// Default location for the settings file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("life-simulation").join("config.json"))
}
