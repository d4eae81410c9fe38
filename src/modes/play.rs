use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::clock::{ClockEvent, GameClock};
use crate::game::{GameEngine, GameMode, GameState, Phase, TimerCommand};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal session: menu, matches, final screen
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(engine: GameEngine) -> Self {
        let state = engine.idle_state();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Run until the player quits. `start` skips the menu.
    pub async fn run(&mut self, start: Option<GameMode>) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, start).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        start: Option<GameMode>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut clock = GameClock::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        if let Some(mode) = start {
            self.start_match(mode, &mut clock);
        }

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut clock);
                    }
                }

                // Tick timer and one-shot lifecycle timers
                clock_event = clock.next() => {
                    self.handle_clock_event(clock_event, &mut clock);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("quitting");
        Ok(())
    }

    fn handle_event(&mut self, event: Event, clock: &mut GameClock) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer { player, direction } => {
                // Solo players may use either key set
                let player = if self.state.mode == Some(GameMode::SinglePlayer) {
                    0
                } else {
                    player
                };
                self.engine.set_direction(&mut self.state, player, direction);
            }
            KeyAction::TogglePause => {
                self.engine.toggle_pause(&mut self.state);
            }
            KeyAction::SelectMode(mode) => {
                if self.state.phase == Phase::Idle {
                    self.start_match(mode, clock);
                }
            }
            KeyAction::Rematch => {
                if let (Phase::MatchEnded(_), Some(mode)) = (self.state.phase, self.state.mode) {
                    self.start_match(mode, clock);
                }
            }
            KeyAction::Menu => {
                if self.state.phase != Phase::Idle {
                    let timers = self.engine.return_to_menu(&mut self.state);
                    clock.apply(timers);
                    self.metrics.on_match_abandoned();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn handle_clock_event(&mut self, event: ClockEvent, clock: &mut GameClock) {
        let timers = match event {
            ClockEvent::Tick => self.engine.tick(&mut self.state).timers,
            ClockEvent::Deferred(deferred) => {
                let timers = self.engine.handle_deferred(&mut self.state, deferred);
                if let Phase::MatchEnded(result) = self.state.phase {
                    if timers.contains(&TimerCommand::StopTick) {
                        self.metrics.on_match_over(result);
                    }
                }
                timers
            }
        };
        clock.apply(timers);
    }

    fn start_match(&mut self, mode: GameMode, clock: &mut GameClock) {
        let timers = self.engine.start_match(&mut self.state, mode);
        clock.apply(timers);
        self.metrics.on_match_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
