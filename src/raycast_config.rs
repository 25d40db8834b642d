use crate::config::{GridConfig, MAX_GRID_DIMENSION, MAX_TILE_SIZE, MIN_TILE_SIZE};
use crate::grid::{GridError, GridResult};
use crate::grid_display::GridDisplayConfig;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a JSON configuration file
pub const CONFIG_PATH_ENV: &str = "RAYCAST_CONFIG";

/// Complete configuration for the ray cast viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    pub grid: GridConfig,
    pub display: GridDisplayConfig,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}

impl RaycastConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: RaycastConfig = serde_json::from_str(&contents)?;
        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GridResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Grid configuration
        if let Some(cols) = env_parse("RAYCAST_COLUMNS") {
            config.grid.cols = cols;
        }
        if let Some(rows) = env_parse("RAYCAST_ROWS") {
            config.grid.rows = rows;
        }
        if let Some(tile_size) = env_parse("RAYCAST_TILE_SIZE") {
            config.grid.tile_size = tile_size;
        }

        // Endpoints, in pixels
        if let Some(x) = env_parse("RAYCAST_START_X") {
            config.grid.start.0 = x;
        }
        if let Some(y) = env_parse("RAYCAST_START_Y") {
            config.grid.start.1 = y;
        }
        if let Some(x) = env_parse("RAYCAST_END_X") {
            config.grid.end.0 = x;
        }
        if let Some(y) = env_parse("RAYCAST_END_Y") {
            config.grid.end.1 = y;
        }

        // Display configuration
        if let Ok(color) = std::env::var("RAYCAST_COLOR") {
            config.display.use_color = color.to_lowercase() == "true";
        }

        config
    }

    /// Configuration file named by RAYCAST_CONFIG, otherwise the environment
    pub fn load() -> GridResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::load_from_file(path),
            _ => Ok(Self::from_env()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> GridResult<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(GridError::ConfigurationError(
                "Grid dimensions must be positive".to_string(),
            ));
        }

        if self.grid.rows > MAX_GRID_DIMENSION || self.grid.cols > MAX_GRID_DIMENSION {
            return Err(GridError::ConfigurationError(format!(
                "Grid {}x{} exceeds {} tiles per side",
                self.grid.cols, self.grid.rows, MAX_GRID_DIMENSION
            )));
        }

        if !(MIN_TILE_SIZE..=MAX_TILE_SIZE).contains(&self.grid.tile_size) {
            return Err(GridError::ConfigurationError(format!(
                "Tile size {} outside {}..={}",
                self.grid.tile_size, MIN_TILE_SIZE, MAX_TILE_SIZE
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RaycastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.grid.cols, config.grid.rows), (10, 10));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RaycastConfig::default();
        config.grid.cols = 0;
        assert!(matches!(config.validate(), Err(GridError::ConfigurationError(_))));

        let mut config = RaycastConfig::default();
        config.grid.rows = MAX_GRID_DIMENSION + 1;
        assert!(matches!(config.validate(), Err(GridError::ConfigurationError(_))));

        let mut config = RaycastConfig::default();
        config.grid.tile_size = 200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RaycastConfig =
            serde_json::from_str(r#"{ "grid": { "cols": 4, "end": [100, 20] } }"#).unwrap();
        assert_eq!(config.grid.cols, 4);
        assert_eq!(config.grid.rows, 10);
        assert_eq!(config.grid.end, (100, 20));
        assert!(config.display.use_color);
    }
}
