use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Fastest clock the play loop supports, one tick per millisecond
pub const MAX_TICK_RATE_HZ: u32 = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Score granted per food eaten
    pub food_reward: u32,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            food_reward: 10,
            tick_rate_hz: 5,
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

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run on
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        // The snake needs a free cell for the first food.
        ensure!(
            self.cell_count() >= 2,
            "grid must have at least two cells, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= i32::MAX as usize && self.grid_height <= i32::MAX as usize,
            "grid dimensions must fit in a signed 32-bit coordinate"
        );
        ensure!(self.food_reward > 0, "food reward must be positive");
        ensure!(
            (1..=MAX_TICK_RATE_HZ).contains(&self.tick_rate_hz),
            "tick rate must be between 1 and {} Hz, got {}",
            MAX_TICK_RATE_HZ,
            self.tick_rate_hz
        );
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width.saturating_mul(self.grid_height)
    }

    /// Time between two simulation ticks, never shorter than 1 ms
    pub fn tick_interval(&self) -> Duration {
        let micros = 1_000_000 / u64::from(self.tick_rate_hz.max(1));
        Duration::from_micros(micros).max(Duration::from_millis(1))
    }
}
