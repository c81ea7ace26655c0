use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::Heading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Request a new heading for the next tick
    Turn(Heading),
    Retry,
    Quit,
    /// Left mouse press at a terminal cell
    Click { column: u16, row: u16 },
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputAction::Turn(Heading::Up),
            KeyCode::Down => InputAction::Turn(Heading::Down),
            KeyCode::Left => InputAction::Turn(Heading::Left),
            KeyCode::Right => InputAction::Turn(Heading::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputAction::Turn(Heading::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputAction::Turn(Heading::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputAction::Turn(Heading::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputAction::Turn(Heading::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => InputAction::Retry,

            _ => InputAction::None,
        }
    }

    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> InputAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => InputAction::Click {
                column: mouse.column,
                row: mouse.row,
            },
            _ => InputAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
