use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::state::Position;

/// Reasons a configuration cannot describe a playable grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: i32 },
    #[error("grid size {grid_size} does not evenly divide the {width}x{height} screen")]
    GridMisaligned {
        width: i32,
        height: i32,
        grid_size: i32,
    },
    #[error("tick rate must be at least 1 tick per second")]
    ZeroTickRate,
    #[error("grid has {cells} cell(s); the snake and the apple need at least 2")]
    TooFewCells { cells: usize },
}

/// Configuration for the game
///
/// Screen dimensions and the grid size are in the same abstract units the
/// positions use; a cell is `grid_size` units on each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield
    pub screen_width: i32,
    /// Height of the playfield
    pub screen_height: i32,
    /// Side length of one grid cell
    pub grid_size: i32,
    /// Logic updates per second
    pub tick_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            grid_size: 20,
            tick_rate: 10,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom dimensions
    pub fn new(screen_width: i32, screen_height: i32, grid_size: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(100, 100, 10)
    }

    /// Read a JSON configuration file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("grid_size", self.grid_size),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }

        if self.screen_width % self.grid_size != 0 || self.screen_height % self.grid_size != 0 {
            return Err(ConfigError::GridMisaligned {
                width: self.screen_width,
                height: self.screen_height,
                grid_size: self.grid_size,
            });
        }

        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let cells = self.total_cells();
        if cells < 2 {
            return Err(ConfigError::TooFewCells { cells });
        }

        Ok(())
    }

    /// Number of cells per row
    pub fn grid_width(&self) -> i32 {
        self.screen_width / self.grid_size
    }

    /// Number of cells per column
    pub fn grid_height(&self) -> i32 {
        self.screen_height / self.grid_size
    }

    pub fn total_cells(&self) -> usize {
        (self.grid_width() as usize) * (self.grid_height() as usize)
    }

    /// Center of the screen, snapped down onto the grid
    pub fn center(&self) -> Position {
        let snap = |v: i32| (v / 2) - (v / 2) % self.grid_size;
        Position::new(snap(self.screen_width), snap(self.screen_height))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}
