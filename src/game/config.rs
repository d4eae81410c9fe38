use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::ai::AiWeights;

/// Largest accepted grid side
pub const MAX_GRID_SIDE: usize = 1000;

/// Configuration for the game
///
/// Every tunable constant of the simulation lives here. Durations are kept
/// as whole milliseconds so the struct round-trips through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of every snake
    pub initial_snake_length: usize,
    /// Rounds a player must win to take the match
    pub rounds_to_win: u32,

    /// Tick interval at the start of each round
    pub initial_tick_ms: u64,
    /// Tick interval reduction per food eaten
    pub tick_step_ms: u64,
    /// Tick interval floor
    pub min_tick_ms: u64,

    /// Foods placed when a round starts
    pub initial_food: usize,
    /// Below this many foods one is always added after a tick
    pub min_food: usize,
    /// Below this many foods one may be added after a tick
    pub max_food: usize,
    /// Per-tick chance of that optional extra food
    pub extra_food_chance: f64,
    /// Random placement attempts before falling back to the grid center
    pub spawn_attempts: u32,
    /// Draws above this become super food
    pub super_food_threshold: f64,
    /// Draws above this (and not super) become speed food
    pub speed_food_threshold: f64,

    /// Countdown starts from this number
    pub countdown_from: u32,
    pub countdown_step_ms: u64,
    /// How long "GO!" stays on screen
    pub go_banner_ms: u64,
    /// Pause after a drawn or won round before the next countdown
    pub next_round_delay_ms: u64,
    /// Pause after the deciding round before the final screen
    pub match_over_delay_ms: u64,

    pub ai: AiWeights,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            initial_snake_length: 3,
            rounds_to_win: 3,
            initial_tick_ms: 120,
            tick_step_ms: 2,
            min_tick_ms: 50,
            initial_food: 3,
            min_food: 2,
            max_food: 5,
            extra_food_chance: 0.02,
            spawn_attempts: 1000,
            super_food_threshold: 0.92,
            speed_food_threshold: 0.82,
            countdown_from: 3,
            countdown_step_ms: 700,
            go_banner_ms: 800,
            next_round_delay_ms: 2000,
            match_over_delay_ms: 1500,
            ai: AiWeights::default(),
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
        Self::new(12, 12)
    }

    /// Read a JSON config file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    pub fn initial_tick(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn tick_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    pub fn min_tick(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    pub fn go_banner(&self) -> Duration {
        Duration::from_millis(self.go_banner_ms)
    }

    pub fn next_round_delay(&self) -> Duration {
        Duration::from_millis(self.next_round_delay_ms)
    }

    pub fn match_over_delay(&self) -> Duration {
        Duration::from_millis(self.match_over_delay_ms)
    }

    /// Validate configuration parameters
    ///
    /// `Ok(())` if every field is usable, `Err(String)` naming the first
    /// offending field otherwise.
    pub fn validate(&self) -> Result<(), String> {
        // Both snakes spawn five cells in from the side walls
        if self.grid_width < 12 || self.grid_height < 3 {
            return Err(format!(
                "grid must be at least 12x3, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(format!(
                "grid must be at most {}x{}, got {}x{}",
                MAX_GRID_SIDE, MAX_GRID_SIDE, self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 || self.initial_snake_length > 6 {
            return Err(format!(
                "initial_snake_length must be in [1, 6], got {}",
                self.initial_snake_length
            ));
        }

        if self.rounds_to_win == 0 {
            return Err("rounds_to_win must be at least 1".to_string());
        }

        if self.min_tick_ms == 0 {
            return Err("min_tick_ms must be positive".to_string());
        }

        if self.initial_tick_ms < self.min_tick_ms {
            return Err(format!(
                "initial_tick_ms ({}) cannot be below min_tick_ms ({})",
                self.initial_tick_ms, self.min_tick_ms
            ));
        }

        if self.min_food > self.max_food {
            return Err(format!(
                "min_food ({}) cannot exceed max_food ({})",
                self.min_food, self.max_food
            ));
        }

        if !(0.0..=1.0).contains(&self.extra_food_chance) {
            return Err(format!(
                "extra_food_chance must be in [0, 1], got {}",
                self.extra_food_chance
            ));
        }

        if self.spawn_attempts == 0 {
            return Err("spawn_attempts must be at least 1".to_string());
        }

        if self.speed_food_threshold > self.super_food_threshold {
            return Err(format!(
                "speed_food_threshold ({}) cannot exceed super_food_threshold ({})",
                self.speed_food_threshold, self.super_food_threshold
            ));
        }

        if self.countdown_from == 0 {
            return Err("countdown_from must be at least 1".to_string());
        }

        self.ai.validate()
    }
}
