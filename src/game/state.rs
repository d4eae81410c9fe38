use std::time::Duration;

use super::food::Food;
use super::grid::Grid;
use super::scoreboard::{MatchResult, Scoreboard};
use super::snake::Snake;

/// Who controls the snakes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayerLocal,
    VersusAi,
}

impl GameMode {
    pub fn snake_count(&self) -> usize {
        match self {
            GameMode::SinglePlayer => 1,
            GameMode::TwoPlayerLocal | GameMode::VersusAi => 2,
        }
    }

    pub fn is_solo(&self) -> bool {
        *self == GameMode::SinglePlayer
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::SinglePlayer => "Single Player",
            GameMode::TwoPlayerLocal => "Two Players",
            GameMode::VersusAi => "Versus AI",
        }
    }
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The only snake died (single player)
    GameOver,
    /// Both snakes died on the same tick
    Draw,
    /// Sole survivor earns a round, match continues
    RoundWin { player: usize },
    /// Sole survivor reached the win threshold
    MatchWin { player: usize },
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No match running (menu)
    Idle,
    /// Pre-round countdown, `remaining` is the number on screen
    Countdown { remaining: u32 },
    Active,
    Paused,
    RoundEnded(RoundOutcome),
    MatchEnded(MatchResult),
}

/// The whole simulation: everything the tick mutates and the renderer reads
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    /// `None` while on the menu
    pub mode: Option<GameMode>,
    pub phase: Phase,
    pub snakes: Vec<Snake>,
    pub foods: Vec<Food>,
    pub scoreboard: Scoreboard,
    /// Current period of the tick timer
    pub tick_interval: Duration,
    /// Round wins needed to take the match
    pub rounds_to_win: u32,
    /// 1-based round number within the match
    pub round: u32,
    /// Ticks played this round
    pub ticks: u64,
    /// Transient message shown over the board
    pub banner: Option<String>,
}

impl GameState {
    /// An idle state with no match
    pub fn new(grid: Grid, tick_interval: Duration, rounds_to_win: u32) -> Self {
        Self {
            grid,
            mode: None,
            phase: Phase::Idle,
            snakes: Vec::new(),
            foods: Vec::new(),
            scoreboard: Scoreboard::new(),
            tick_interval,
            rounds_to_win,
            round: 0,
            ticks: 0,
            banner: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|snake| snake.alive).count()
    }

    /// Display name of a snake slot
    pub fn player_label(&self, index: usize) -> &'static str {
        match (index, self.mode) {
            (0, _) => "Player 1",
            (_, Some(GameMode::VersusAi)) => "AI",
            _ => "Player 2",
        }
    }
}
