//! Key mapping from terminal events to game actions.
//!
//! Letters are matched case-insensitively so caps lock does not change the
//! controls.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Char(ch) => letter_action(ch.to_ascii_lowercase()),
        _ => None,
    }
}

/// Vim (hjkl) and WASD bindings.
fn letter_action(ch: char) -> Option<GameAction> {
    match ch {
        'h' | 'a' => Some(GameAction::MoveLeft),
        'l' | 'd' => Some(GameAction::MoveRight),
        'j' | 's' => Some(GameAction::SoftDrop),
        'k' | 'w' => Some(GameAction::Rotate),
        _ => None,
    }
}

/// q, Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            c.eq_ignore_ascii_case(&'c')
        }
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
