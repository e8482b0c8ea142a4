use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Editing actions from keyboard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit,
    Previous,
    Next,
    First,
    Last,
    Insert(char),
    DeleteChar,
    /// Ctrl-C: drop the current line
    Interrupt,
    /// Ctrl-D: leave when the line is empty
    EndOfInput,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

pub(crate) fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Interrupt,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::EndOfInput,

        // History browsing (arrows and Emacs keys)
        (KeyCode::Up, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::Previous,
        (KeyCode::Down, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::Next,
        (KeyCode::PageUp, _) | (KeyCode::Char('<'), KeyModifiers::ALT) => Action::First,
        (KeyCode::PageDown, _) | (KeyCode::Char('>'), KeyModifiers::ALT) => Action::Last,

        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Insert(c)
        }
        (KeyCode::Tab, _) => Action::Insert('\t'),

        _ => Action::None,
    }
}
