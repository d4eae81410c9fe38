use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Food, FoodKind, GameState, MatchResult, Phase, Position};
use crate::metrics::GameMetrics;

const PLAYER_COLORS: [Color; 2] = [Color::LightGreen, Color::LightBlue];

/// Draws the menu, the board or the final screen; never mutates the game
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        match state.phase {
            Phase::Idle => {
                let menu = self.render_menu(metrics);
                frame.render_widget(menu, chunks[1]);
            }
            Phase::MatchEnded(result) => {
                let header = self.render_stats(state, metrics);
                frame.render_widget(header, chunks[0]);
                let game_over = self.render_match_over(state, result);
                frame.render_widget(game_over, chunks[1]);
            }
            _ => {
                let header = self.render_stats(state, metrics);
                frame.render_widget(header, chunks[0]);
                let grid = self.render_grid(state);
                frame.render_widget(grid, chunks[1]);
            }
        }

        let controls = self.render_controls(state);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let cols = state.grid.cols.max(0) as usize;
        let rows = state.grid.rows.max(0) as usize;
        let empty = Span::styled(". ", Style::default().fg(Color::DarkGray));
        let mut cells = vec![vec![empty; cols]; rows];

        let mut paint = |pos: Position, span: Span<'static>| {
            if state.grid.contains(pos) {
                cells[pos.y as usize][pos.x as usize] = span;
            }
        };

        for food in &state.foods {
            paint(food.position, food_span(food));
        }

        for (index, snake) in state.snakes.iter().enumerate() {
            let color = if snake.alive {
                PLAYER_COLORS[index % PLAYER_COLORS.len()]
            } else {
                Color::DarkGray
            };

            for &segment in snake.body.iter().skip(1) {
                paint(segment, Span::styled("□ ", Style::default().fg(color)));
            }

            let head_color = if snake.alive { Color::White } else { Color::Gray };
            paint(
                snake.head(),
                Span::styled(
                    "■ ",
                    Style::default()
                        .fg(head_color)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        }

        let lines: Vec<Line> = cells.into_iter().map(Line::from).collect();
        let title = format!(" Snake Clash - Round {} ", state.round);

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for index in 0..state.snakes.len() {
            let color = PLAYER_COLORS[index % PLAYER_COLORS.len()];
            spans.push(Span::styled(
                format!("{}: ", state.player_label(index)),
                Style::default().fg(color),
            ));
            spans.push(Span::styled(state.scoreboard.points(index).to_string(), value));
            if state.snakes.len() > 1 {
                spans.push(Span::raw(format!(
                    " ({} won)",
                    state.scoreboard.rounds_won(index)
                )));
            }
            spans.push(Span::raw("    "));
        }

        let goal = match state.mode {
            Some(mode) if !mode.is_solo() => format!("First to {}", state.rounds_to_win),
            _ => "Score".to_string(),
        };
        spans.push(Span::styled(goal, label));
        spans.push(Span::raw("    "));
        spans.push(Span::styled("Speed: ", label));
        spans.push(Span::raw(format!("{}ms", state.tick_interval.as_millis())));
        spans.push(Span::raw("    "));
        spans.push(Span::styled("Time: ", label));
        spans.push(Span::raw(metrics.format_time()));

        let banner = state.banner.clone().unwrap_or_default();
        let text = vec![
            Line::from(spans),
            Line::from(Span::styled(
                banner,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let key = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE CLASH",
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("1", key), Span::raw("  Single Player")]),
            Line::from(vec![Span::styled("2", key), Span::raw("  Two Players")]),
            Line::from(vec![Span::styled("3", key), Span::raw("  Versus AI")]),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Best score: {}    Matches played: {}",
                    metrics.high_score, metrics.matches_played
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_match_over(&self, state: &GameState, result: MatchResult) -> Paragraph<'_> {
        let (headline, color) = match result {
            MatchResult::Solo { score } => (format!("Final Score: {}", score), PLAYER_COLORS[0]),
            MatchResult::Winner(index) => (
                format!("{} Wins!", state.player_label(index)),
                PLAYER_COLORS[index % PLAYER_COLORS.len()],
            ),
            MatchResult::Draw => ("Draw!".to_string(), Color::Yellow),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if !matches!(result, MatchResult::Solo { .. }) {
            for index in 0..state.snakes.len() {
                text.push(Line::from(Span::styled(
                    format!(
                        "{}: {} pts ({} rounds)",
                        state.player_label(index),
                        state.scoreboard.points(index),
                        state.scoreboard.rounds_won(index)
                    ),
                    Style::default().fg(PLAYER_COLORS[index % PLAYER_COLORS.len()]),
                )));
            }
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for a rematch, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "M",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for the menu", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let mut spans = Vec::new();
        if state.phase == Phase::Idle {
            spans.push(Span::styled("1-3", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" to pick a mode | "));
        } else {
            spans.push(Span::styled("WASD", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" player 1 | "));
            if state.mode.is_some_and(|mode| !mode.is_solo()) {
                spans.push(Span::styled("↑↓←→", Style::default().fg(Color::Cyan)));
                spans.push(Span::raw(" player 2 | "));
            }
            let pause = if state.is_paused() {
                Some(" resume | ")
            } else if state.phase == Phase::Active {
                Some(" pause | ")
            } else {
                None
            };
            if let Some(pause) = pause {
                spans.push(Span::styled("Esc", Style::default().fg(Color::Cyan)));
                spans.push(Span::raw(pause));
            }
            spans.push(Span::styled("M", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" menu | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Food glyph; alternates bold every 200ms since it spawned
fn food_span(food: &Food) -> Span<'static> {
    let (glyph, color) = match food.kind {
        FoodKind::Normal => ("● ", Color::Red),
        FoodKind::Super => ("★ ", Color::Yellow),
        FoodKind::Speed => ("◆ ", Color::Magenta),
    };

    let mut style = Style::default().fg(color);
    if (food.spawned_at.elapsed().as_millis() / 200) % 2 == 0 {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(glyph, style)
}
