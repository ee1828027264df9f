use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Tick budget for one episode
    pub max_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            initial_snake_length: 3,
            max_ticks: 1_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Set the tick budget
    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Check that the initial snake fits and leaves room for food.
    ///
    /// The snake starts at (width / 2, height / 2) and extends to the left,
    /// so its tail needs `width / 2 >= length - 1`.
    pub fn validate(&self) -> Result<(), GameError> {
        let length = self.initial_snake_length;
        let too_small = GameError::BoardTooSmall {
            width: self.grid_width,
            height: self.grid_height,
            initial_length: length,
        };

        if length == 0 || self.grid_height == 0 {
            return Err(too_small);
        }
        if self.grid_width / 2 < length - 1 {
            return Err(too_small);
        }
        let cells = self.grid_width.checked_mul(self.grid_height);
        if cells.is_none_or(|cells| cells <= length) {
            return Err(too_small);
        }
        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return Err(too_small);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.max_ticks, 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_max_ticks(50);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.max_ticks, 50);
    }

    #[test]
    fn test_validation_rejects_small_boards() {
        assert!(GameConfig::new(3, 10).validate().is_err()); // tail would leave the board
        assert!(GameConfig::new(4, 1).validate().is_ok());
        assert!(GameConfig::new(10, 0).validate().is_err());

        let mut config = GameConfig::new(10, 10);
        config.initial_snake_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 16, "max_ticks": 200 }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.grid_height, 10);
        assert_eq!(config.max_ticks, 200);
    }

    #[test]
    fn test_from_json_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
