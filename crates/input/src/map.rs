//! Key mapping from terminal events to commands.

use crate::types::Signal;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Feed a signal to the game.
    Signal(Signal),
    /// Toggle the high-score listing.
    ShowScores,
    /// Leave immediately, whatever the phase.
    Quit,
}

/// Map a key press to a command.
///
/// Release and repeat events map to nothing.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyCommand::Quit),
            _ => None,
        };
    }

    let signal = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') => Signal::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Signal::MoveRight,
        KeyCode::Down | KeyCode::Char('s') => Signal::MoveDown,
        KeyCode::Up | KeyCode::Char('w') => Signal::Rotate,
        KeyCode::Char(' ') => Signal::HardDrop,

        // Session
        KeyCode::Enter => Signal::Enter,
        KeyCode::Esc | KeyCode::Char('q') => Signal::Escape,
        KeyCode::Char('p') | KeyCode::Char('P') => Signal::Pause,

        KeyCode::Char('h') | KeyCode::Char('H') => return Some(KeyCommand::ShowScores),

        _ => return None,
    };
    Some(KeyCommand::Signal(signal))
}
