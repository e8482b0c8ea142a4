use std::io::{self, Write};

use anyhow::Result;
use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};

/// Keeps the terminal in raw mode for its lifetime
pub struct RawModeGuard {
    stdout: io::Stdout,
}

impl RawModeGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self { stdout: io::stdout() })
    }

    /// Redraw the prompt line
    pub fn render_prompt(&mut self, prompt: &str, buffer: &str) -> Result<()> {
        queue!(
            self.stdout,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt),
            Print(buffer)
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Print a full line below the prompt
    pub fn print_line(&mut self, text: &str) -> Result<()> {
        execute!(self.stdout, Print("\r\n"), Print(text), Print("\r\n"))?;
        Ok(())
    }

    pub fn restore(self) -> Result<()> {
        disable_raw_mode()?;
        Ok(())
    }
}

// Ensure cleanup happens even if dropped (panic, early return, etc.)
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.stdout, Print("\r\n"));
    }
}
