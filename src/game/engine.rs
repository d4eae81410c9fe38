use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::{
    ai,
    config::GameConfig,
    direction::Direction,
    food::{FoodKind, FoodSpawner},
    grid::{Grid, Position},
    snake::Snake,
    state::{GameMode, GameState, Phase, RoundOutcome},
};

/// Work the engine wants done later, delivered back through
/// [`GameEngine::handle_deferred`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    CountdownStep,
    StartNextRound,
    FinishMatch,
    ClearBanner,
}

/// Instructions for whoever owns the timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Cancel the repeating tick timer and register it again with this period
    RestartTick(Duration),
    /// Dispose of the tick timer
    StopTick,
    /// One-shot timer
    Schedule(Duration, Deferred),
    /// Drop the tick timer and every pending one-shot
    CancelAll,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the tick was skipped (paused, countdown, round over)
    pub ticked: bool,
    /// (snake index, food kind) for every food eaten
    pub eaten: Vec<(usize, FoodKind)>,
    /// Snakes that died this tick
    pub deaths: Vec<usize>,
    pub outcome: Option<RoundOutcome>,
    pub timers: Vec<TimerCommand>,
}

/// Runs the simulation: owns the configuration and the random source, and
/// mutates a [`GameState`] passed in by the caller
pub struct GameEngine {
    config: GameConfig,
    spawner: FoodSpawner,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible random sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            spawner: FoodSpawner::new(&config),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.config.grid_width, self.config.grid_height)
    }

    /// Fresh state sitting on the menu
    pub fn idle_state(&self) -> GameState {
        GameState::new(
            self.grid(),
            self.config.initial_tick(),
            self.config.rounds_to_win,
        )
    }

    /// Reset scores and begin the first round of a new match
    pub fn start_match(&mut self, state: &mut GameState, mode: GameMode) -> Vec<TimerCommand> {
        info!("match started: {}", mode.label());

        *state = self.idle_state();
        state.mode = Some(mode);

        let mut timers = vec![TimerCommand::CancelAll];
        timers.extend(self.start_round(state));
        timers
    }

    /// Leave a drawn or won round and count down into the next one
    pub fn start_next_round(&mut self, state: &mut GameState) -> Vec<TimerCommand> {
        match state.phase {
            Phase::RoundEnded(RoundOutcome::Draw | RoundOutcome::RoundWin { .. }) => {
                self.start_round(state)
            }
            _ => Vec::new(),
        }
    }

    /// Tear the match down and go back to the menu
    pub fn return_to_menu(&mut self, state: &mut GameState) -> Vec<TimerCommand> {
        if state.mode.is_some() {
            info!("returning to menu");
        }
        *state = self.idle_state();
        vec![TimerCommand::CancelAll]
    }

    fn start_round(&mut self, state: &mut GameState) -> Vec<TimerCommand> {
        self.init_round(state);

        let remaining = self.config.countdown_from;
        state.phase = Phase::Countdown { remaining };
        state.banner = Some(remaining.to_string());

        vec![
            TimerCommand::StopTick,
            TimerCommand::Schedule(self.config.countdown_step(), Deferred::CountdownStep),
        ]
    }

    /// Recreate snakes and food and reset the speed for a new round
    pub fn init_round(&mut self, state: &mut GameState) {
        let mode = state.mode.unwrap_or(GameMode::SinglePlayer);
        let grid = self.grid();
        let length = self.config.initial_snake_length;
        let mid = grid.rows / 2;

        state.grid = grid;
        state.tick_interval = self.config.initial_tick();
        state.foods.clear();
        state.round += 1;
        state.ticks = 0;

        state.snakes = vec![Snake::new(
            Position::new(5, mid),
            Direction::Right,
            length,
            false,
        )];
        if mode.snake_count() == 2 {
            state.snakes.push(Snake::new(
                Position::new(grid.cols - 6, mid),
                Direction::Left,
                length,
                mode == GameMode::VersusAi,
            ));
        }

        for _ in 0..self.config.initial_food {
            self.spawn_food(state);
        }

        info!("round {} started ({})", state.round, mode.label());
    }

    /// Dispatch a fired one-shot timer
    pub fn handle_deferred(&mut self, state: &mut GameState, deferred: Deferred) -> Vec<TimerCommand> {
        match deferred {
            Deferred::CountdownStep => self.countdown_step(state),
            Deferred::StartNextRound => self.start_next_round(state),
            Deferred::FinishMatch => self.finish_match(state),
            Deferred::ClearBanner => {
                if state.phase == Phase::Active {
                    state.banner = None;
                }
                Vec::new()
            }
        }
    }

    /// Advance the 3-2-1 countdown; the last step starts the tick timer
    pub fn countdown_step(&mut self, state: &mut GameState) -> Vec<TimerCommand> {
        let Phase::Countdown { remaining } = state.phase else {
            return Vec::new();
        };

        if remaining > 1 {
            state.phase = Phase::Countdown {
                remaining: remaining - 1,
            };
            state.banner = Some((remaining - 1).to_string());
            return vec![TimerCommand::Schedule(
                self.config.countdown_step(),
                Deferred::CountdownStep,
            )];
        }

        state.phase = Phase::Active;
        state.banner = Some("GO!".to_string());
        vec![
            TimerCommand::Schedule(self.config.go_banner(), Deferred::ClearBanner),
            TimerCommand::RestartTick(state.tick_interval),
        ]
    }

    /// Move from the deciding round to the final screen
    pub fn finish_match(&mut self, state: &mut GameState) -> Vec<TimerCommand> {
        match state.phase {
            Phase::RoundEnded(RoundOutcome::GameOver | RoundOutcome::MatchWin { .. }) => {
                let solo = state.mode.is_none_or(|mode| mode.is_solo());
                let result = state.scoreboard.match_result(solo);
                info!("match ended: {:?}", result);

                state.phase = Phase::MatchEnded(result);
                state.banner = None;
                vec![TimerCommand::StopTick]
            }
            _ => Vec::new(),
        }
    }

    /// Queue a turn for a human-controlled snake. AI and dead snakes ignore it.
    pub fn set_direction(&self, state: &mut GameState, index: usize, direction: Direction) {
        if let Some(snake) = state.snakes.get_mut(index) {
            if snake.alive && !snake.is_ai {
                snake.set_direction(direction);
            }
        }
    }

    /// Pause or resume play. Only meaningful once the round is running.
    pub fn toggle_pause(&self, state: &mut GameState) {
        match state.phase {
            Phase::Active => {
                state.phase = Phase::Paused;
                state.banner = Some("PAUSED".to_string());
                info!("paused");
            }
            Phase::Paused => {
                state.phase = Phase::Active;
                state.banner = None;
                info!("resumed");
            }
            _ => {}
        }
    }

    /// Run one simulation step. Does nothing unless the phase is `Active`.
    pub fn tick(&mut self, state: &mut GameState) -> TickReport {
        let mut report = TickReport::default();
        if state.phase != Phase::Active {
            return report;
        }
        report.ticked = true;
        state.ticks += 1;

        self.steer_ai(state);

        for snake in &mut state.snakes {
            snake.advance();
        }

        if self.eat_food(state, &mut report) {
            report
                .timers
                .push(TimerCommand::RestartTick(state.tick_interval));
        }

        self.check_collisions(state, &mut report);

        let food_count = state.foods.len();
        if food_count < self.config.min_food
            || (food_count < self.config.max_food
                && self.rng.gen_bool(self.config.extra_food_chance))
        {
            self.spawn_food(state);
        }

        report.outcome = self.check_round_end(state, &mut report.timers);
        report
    }

    fn steer_ai(&mut self, state: &mut GameState) {
        for i in 0..state.snakes.len() {
            let snake = &state.snakes[i];
            if !snake.is_ai || !snake.alive {
                continue;
            }

            let opponent = state
                .snakes
                .iter()
                .enumerate()
                .find(|&(j, _)| j != i)
                .map(|(_, other)| other);
            let choice = ai::decide(
                snake,
                opponent,
                &state.foods,
                &state.grid,
                &self.config.ai,
                &mut self.rng,
            );

            // Trapped: keep going and crash
            let direction = choice.unwrap_or(snake.direction);
            state.snakes[i].set_direction(direction);
        }
    }

    /// Returns true if the tick interval changed
    fn eat_food(&mut self, state: &mut GameState, report: &mut TickReport) -> bool {
        let mut sped_up = false;

        for i in 0..state.snakes.len() {
            if !state.snakes[i].alive {
                continue;
            }
            let head = state.snakes[i].head();

            let mut k = state.foods.len();
            while k > 0 {
                k -= 1;
                if state.foods[k].position != head {
                    continue;
                }

                let food = state.foods.remove(k);
                state.snakes[i].grow(food.grow_amount());
                state.scoreboard.add_points(i, food.value());
                self.spawn_food(state);

                state.tick_interval = state
                    .tick_interval
                    .saturating_sub(self.config.tick_step())
                    .max(self.config.min_tick());
                sped_up = true;

                debug!(
                    "{} ate {:?} food, tick interval now {:?}",
                    state.player_label(i),
                    food.kind,
                    state.tick_interval
                );
                report.eaten.push((i, food.kind));
            }
        }

        sped_up
    }

    fn check_collisions(&self, state: &mut GameState, report: &mut TickReport) {
        for i in 0..state.snakes.len() {
            let snake = &state.snakes[i];
            if !snake.alive {
                continue;
            }

            let crashed = snake.hits_wall(&state.grid)
                || snake.hits_self()
                || state
                    .snakes
                    .iter()
                    .enumerate()
                    .any(|(j, other)| j != i && snake.hits_other(other));

            if crashed {
                state.snakes[i].alive = false;
                report.deaths.push(i);
                debug!("{} died on tick {}", state.player_label(i), state.ticks);
            }
        }

        // Head-on: both heads on one cell kills both
        if let [a, b] = state.snakes.as_mut_slice() {
            if a.alive && b.alive && a.head() == b.head() {
                a.alive = false;
                b.alive = false;
                report.deaths.extend([0, 1]);
                debug!("head-on collision on tick {}", state.ticks);
            }
        }
    }

    fn check_round_end(
        &mut self,
        state: &mut GameState,
        timers: &mut Vec<TimerCommand>,
    ) -> Option<RoundOutcome> {
        let solo = state.mode.is_none_or(|mode| mode.is_solo());

        let (outcome, banner, delay, next) = if solo {
            if state.snakes.first().is_some_and(|snake| snake.alive) {
                return None;
            }
            (
                RoundOutcome::GameOver,
                "Game Over!".to_string(),
                self.config.match_over_delay(),
                Deferred::FinishMatch,
            )
        } else {
            let survivors: Vec<usize> = (0..state.snakes.len())
                .filter(|&i| state.snakes[i].alive)
                .collect();

            match survivors.as_slice() {
                [] => (
                    RoundOutcome::Draw,
                    "Draw!".to_string(),
                    self.config.next_round_delay(),
                    Deferred::StartNextRound,
                ),
                &[player] if state.snakes.len() == 2 => {
                    let label = state.player_label(player);
                    let won = state.scoreboard.award_round(player);
                    if won >= self.config.rounds_to_win {
                        (
                            RoundOutcome::MatchWin { player },
                            format!("{} Wins!", label),
                            self.config.match_over_delay(),
                            Deferred::FinishMatch,
                        )
                    } else {
                        (
                            RoundOutcome::RoundWin { player },
                            format!("{} scores!", label),
                            self.config.next_round_delay(),
                            Deferred::StartNextRound,
                        )
                    }
                }
                _ => return None,
            }
        };

        info!("round {} ended: {:?}", state.round, outcome);
        state.phase = Phase::RoundEnded(outcome);
        state.banner = Some(banner);
        timers.push(TimerCommand::StopTick);
        timers.push(TimerCommand::Schedule(delay, next));
        Some(outcome)
    }

    fn spawn_food(&mut self, state: &mut GameState) {
        let food = self
            .spawner
            .spawn(&state.snakes, &state.foods, &mut self.rng);
        state.foods.push(food);
    }
}
