use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;

/// Largest accepted grid side, border included
pub const MAX_GRID_DIMENSION: usize = u16::MAX as usize;

/// Configuration for the game
///
/// Grid dimensions include the border ring, so the playable interior is
/// `(grid_width - 2) x (grid_height - 2)`. Durations are kept in
/// milliseconds to keep config files readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Total width of the arena in cells, border included
    pub grid_width: usize,
    /// Total height of the arena in cells, border included
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Number of static meteors placed at game start
    pub meteor_count: usize,
    /// Whether a portal pair is placed at all
    pub portals_enabled: bool,
    /// Time between full portal pair replacements
    pub portal_regen_interval_ms: u64,
    /// Minimum time before a portal endpoint can be used again
    pub teleport_cooldown_ms: u64,

    /// Tick interval at score zero
    pub base_tick_interval_ms: u64,
    /// Amount the tick interval shrinks at each speed-up
    pub speed_step_ms: u64,
    /// Floor for the tick interval
    pub min_tick_interval_ms: u64,
    /// A speed-up happens every time the score reaches a multiple of this
    pub score_speedup_interval: u32,
    /// Scale applied to the tick interval while moving up or down
    pub vertical_speed_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 22,
            initial_snake_length: 3,
            meteor_count: 5,
            portals_enabled: true,
            portal_regen_interval_ms: 30_000,
            teleport_cooldown_ms: 1_000,
            base_tick_interval_ms: 150,
            speed_step_ms: 10,
            min_tick_interval_ms: 50,
            score_speedup_interval: 5,
            vertical_speed_multiplier: 2.0,
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

    /// Small arena with no meteors or portals, handy for tests
    pub fn plain(width: usize, height: usize) -> Self {
        Self {
            meteor_count: 0,
            portals_enabled: false,
            ..Self::new(width, height)
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn portal_regen_interval(&self) -> Duration {
        Duration::from_millis(self.portal_regen_interval_ms)
    }

    pub fn teleport_cooldown(&self) -> Duration {
        Duration::from_millis(self.teleport_cooldown_ms)
    }

    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_interval_ms)
    }

    pub fn speed_step(&self) -> Duration {
        Duration::from_millis(self.speed_step_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    /// Number of cells inside the border ring
    pub fn interior_cells(&self) -> usize {
        self.grid_width
            .saturating_sub(2)
            .saturating_mul(self.grid_height.saturating_sub(2))
    }

    /// Cells that must be free at game start: snake, meteors, food and portals
    pub fn required_cells(&self) -> usize {
        let portals = if self.portals_enabled { 2 } else { 0 };
        self.initial_snake_length
            .saturating_add(self.meteor_count)
            .saturating_add(1 + portals)
    }

    /// Validate configuration parameters
    ///
    /// Checks value ranges and that the arena can hold every entity placed at
    /// game start.
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |reason: String| Err(GameError::InvalidConfiguration(reason));

        if self.grid_width < 3 || self.grid_height < 3 {
            return invalid(format!(
                "grid must be at least 3x3 to have an interior, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > MAX_GRID_DIMENSION || self.grid_height > MAX_GRID_DIMENSION {
            return invalid(format!(
                "grid sides are limited to {} cells, got {}x{}",
                MAX_GRID_DIMENSION, self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return invalid("initial_snake_length must be at least 1".to_string());
        }

        // The starting snake lies horizontally with its head at the centre.
        let head_col = self.grid_width / 2;
        if head_col < self.initial_snake_length {
            return invalid(format!(
                "a snake of length {} does not fit in a {} wide grid",
                self.initial_snake_length, self.grid_width
            ));
        }

        if self.required_cells() > self.interior_cells() {
            return invalid(format!(
                "interior has {} cells but {} are needed for snake, food, meteors and portals",
                self.interior_cells(),
                self.required_cells()
            ));
        }

        if self.teleport_cooldown_ms == 0 {
            return invalid("teleport_cooldown_ms must be at least 1".to_string());
        }

        if self.portals_enabled && self.portal_regen_interval_ms == 0 {
            return invalid("portal_regen_interval_ms must be positive".to_string());
        }

        if self.base_tick_interval_ms == 0 {
            return invalid("base_tick_interval_ms must be positive".to_string());
        }

        if self.min_tick_interval_ms > self.base_tick_interval_ms {
            return invalid(format!(
                "min_tick_interval_ms ({}) cannot exceed base_tick_interval_ms ({})",
                self.min_tick_interval_ms, self.base_tick_interval_ms
            ));
        }

        if self.score_speedup_interval == 0 {
            return invalid("score_speedup_interval must be at least 1".to_string());
        }

        if !self.vertical_speed_multiplier.is_finite() || self.vertical_speed_multiplier < 1.0 {
            return invalid(format!(
                "vertical_speed_multiplier must be a finite value >= 1.0, got {}",
                self.vertical_speed_multiplier
            ));
        }

        Ok(())
    }
}
