//! Minimal interactive prompt driven by the history cursor.
//!
//! Up/Down (or Ctrl-P/Ctrl-N) browse history, Enter accepts the line and adds
//! it, Ctrl-C drops the current line, Ctrl-D on an empty line leaves.

mod events;
mod terminal;

use std::time::Duration;

use anyhow::{Context, Result};
pub use events::{Action, poll_event};
use terminal::RawModeGuard;
use tracing::warn;

use crate::history::History;
use crate::utils::terminal::display_line;

const PROMPT: &str = "> ";
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What the prompt should do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Accepted(String),
    Exit,
}

/// Line buffer plus the history it browses
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn apply(&mut self, action: Action, history: &mut History) -> Outcome {
        match action {
            Action::Previous => {
                if history.previous() {
                    self.buffer = history.current().to_string();
                }
            }
            Action::Next => {
                if history.next() {
                    self.buffer = history.current().to_string();
                }
            }
            Action::First => {
                if history.move_to_first() {
                    self.buffer = history.current().to_string();
                }
            }
            Action::Last => {
                if history.move_to_last() {
                    self.buffer = history.current().to_string();
                }
            }
            Action::Insert(c) => self.buffer.push(c),
            Action::DeleteChar => {
                self.buffer.pop();
            }
            Action::Submit => {
                let line = std::mem::take(&mut self.buffer);
                history.add(&line);
                history.move_to_end();
                return Outcome::Accepted(line);
            }
            Action::Interrupt => {
                self.buffer.clear();
                history.move_to_end();
            }
            Action::EndOfInput if self.buffer.is_empty() => return Outcome::Exit,
            Action::EndOfInput | Action::None => {}
        }
        Outcome::Continue
    }
}

/// Run the prompt until Ctrl-D, then save the history
///
/// The history is saved even when the terminal fails mid-session; the first
/// error is returned afterwards.
pub fn run_prompt(history: &mut History) -> Result<()> {
    let mut terminal = RawModeGuard::new()?;
    history.move_to_end();

    let session = prompt_loop(&mut terminal, history);
    let session = session.and(terminal.restore());
    finish_session(history, session)
}

fn prompt_loop(terminal: &mut RawModeGuard, history: &mut History) -> Result<()> {
    let mut editor = LineEditor::default();
    loop {
        terminal.render_prompt(PROMPT, &display_line(editor.buffer()))?;
        match editor.apply(poll_event(POLL_INTERVAL)?, history) {
            Outcome::Continue => {}
            Outcome::Accepted(line) => terminal.print_line(&display_line(&line))?,
            Outcome::Exit => return Ok(()),
        }
    }
}

fn finish_session(history: &mut History, session: Result<()>) -> Result<()> {
    let saved = history.save().context("Failed to save history");
    match (session, saved) {
        (Err(e), Err(save_error)) => {
            warn!(error = %format!("{save_error:#}"), "history not saved after prompt error");
            Err(e)
        }
        (session, saved) => session.and(saved),
    }
}
