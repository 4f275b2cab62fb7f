//! Key mapping from terminal events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::sim::{Command, GamePhase};

/// Map a key press to a command for the current phase.
///
/// Escape backs out of play into the menu; from the menu or the game-over
/// screen it quits.
pub fn command_for_key(key: KeyEvent, phase: GamePhase) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
            Some(Command::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
            Some(Command::MoveRight)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Esc => match phase {
            GamePhase::Playing => Some(Command::Pause),
            GamePhase::Menu | GamePhase::GameOver => Some(Command::Quit),
        },
        _ => None,
    }
}

/// Check if key should quit the game regardless of phase.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
