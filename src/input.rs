//! Keyboard mapping for the terminal front end.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Tap (Space, Up, Enter, or k).
    Tap,
    /// Back to the ready screen (r).
    Reset,
    /// Leave the game (q, Esc, or Ctrl+C).
    Quit,
    /// Any other key.
    Other,
}

/// Map a key event to a game input. Key releases and repeats map to `Other`
/// so one physical press is one tap.
pub fn map_key(key: KeyEvent) -> GameInput {
    if key.kind != KeyEventKind::Press {
        return GameInput::Other;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return GameInput::Quit;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('k') => GameInput::Tap,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Reset,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Other,
    }
}
