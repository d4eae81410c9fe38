use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Turn request for a snake slot
    Steer { player: usize, direction: Direction },
    TogglePause,
    SelectMode(GameMode),
    Rematch,
    Menu,
    Quit,
    None,
}

/// Maps keys to actions. Player 1 steers with WASD, player 2 with the arrows.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let steer = |player, direction| KeyAction::Steer { player, direction };

        match key.code {
            // Player 2 - Arrow keys
            KeyCode::Up => steer(1, Direction::Up),
            KeyCode::Down => steer(1, Direction::Down),
            KeyCode::Left => steer(1, Direction::Left),
            KeyCode::Right => steer(1, Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                // Player 1 - WASD
                'w' => steer(0, Direction::Up),
                's' => steer(0, Direction::Down),
                'a' => steer(0, Direction::Left),
                'd' => steer(0, Direction::Right),

                '1' => KeyAction::SelectMode(GameMode::SinglePlayer),
                '2' => KeyAction::SelectMode(GameMode::TwoPlayerLocal),
                '3' => KeyAction::SelectMode(GameMode::VersusAi),

                'p' => KeyAction::TogglePause,
                'r' => KeyAction::Rematch,
                'm' => KeyAction::Menu,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            KeyCode::Esc => KeyAction::TogglePause,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_wasd_steers_player_one() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::Steer { player: 0, direction: Direction::Up }
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::Steer { player: 0, direction: Direction::Left }
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::Steer { player: 0, direction: Direction::Down }
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::Steer { player: 0, direction: Direction::Right }
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();
        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Steer { player: 0, direction: Direction::Up }
        );
    }

    #[test]
    fn test_arrows_steer_player_two() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::Steer { player: 1, direction: Direction::Up }
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::Steer { player: 1, direction: Direction::Right }
        );
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(press(KeyCode::Char('1')), KeyAction::SelectMode(GameMode::SinglePlayer));
        assert_eq!(press(KeyCode::Char('2')), KeyAction::SelectMode(GameMode::TwoPlayerLocal));
        assert_eq!(press(KeyCode::Char('3')), KeyAction::SelectMode(GameMode::VersusAi));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Esc), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('p')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Rematch);
        assert_eq!(press(KeyCode::Char('M')), KeyAction::Menu);
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
