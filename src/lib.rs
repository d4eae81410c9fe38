//! Snake Clash - grid snake for one player, two players or a player against the AI
//!
//! This library provides:
//! - Core game logic and the round state machine (game module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive play loop and its timers (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
