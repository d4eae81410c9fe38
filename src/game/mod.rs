//! Core simulation for Snake Clash
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`GameEngine`] and reads [`GameState`].

pub mod ai;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod scoreboard;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use ai::AiWeights;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{Deferred, GameEngine, TickReport, TimerCommand};
pub use food::{Food, FoodKind, FoodSpawner};
pub use grid::{Grid, Position};
pub use scoreboard::{MatchResult, Scoreboard};
pub use snake::Snake;
pub use state::{GameMode, GameState, Phase, RoundOutcome};
