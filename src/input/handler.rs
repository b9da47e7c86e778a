use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Request(Request),
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Releases and repeats from enhanced keyboards are not commands
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Request(Request::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Self::steer(Direction::Up),
            KeyCode::Down => Self::steer(Direction::Down),
            KeyCode::Left => Self::steer(Direction::Left),
            KeyCode::Right => Self::steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Self::steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::steer(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                KeyAction::Request(Request::Quit)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Request(Request::Reset),

            _ => KeyAction::None,
        }
    }

    fn steer(direction: Direction) -> KeyAction {
        KeyAction::Request(Request::Move(direction))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
