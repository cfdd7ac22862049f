//! Terminal session handling and the drawing surface.
//!
//! `TerminalBackend` switches the real terminal into raw mode on the
//! alternate screen and back. `TerminalGuard` ties that switch to a scope:
//! `finish` leaves explicitly and reports failures, dropping the guard leaves
//! silently (early return or panic). The `Screen` trait is what the renderer
//! and the event loop talk to.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub mod crossterm_screen;
pub mod frame;
pub mod memory;
pub mod screen;
pub mod style;

pub use crossterm_screen::CrosstermScreen;
pub use frame::{Cell, Frame};
pub use memory::MemoryScreen;
pub use screen::Screen;
pub use style::{CellStyle, Color};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Raw mode + alternate screen on stdout. Enter and leave are idempotent.
#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Enter and return a guard that restores the terminal when finished or dropped.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Ok(());
        }
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        self.entered = true;
        tracing::debug!(target: "runtime", "terminal_entered");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        // Mark first so a failed restore is not retried from Drop.
        self.entered = false;
        execute!(stdout(), LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
        tracing::debug!(target: "runtime", "terminal_left");
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Scope of one terminal session.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl TerminalGuard<'_> {
    /// Leave the session now, surfacing restore errors instead of
    /// swallowing them in `Drop`.
    pub fn finish(mut self) -> Result<()> {
        self.active = false;
        self.backend.leave()
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if self.active
            && let Err(e) = self.backend.leave()
        {
            tracing::warn!(target: "runtime", error = %e, "terminal_restore_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_without_enter_touches_nothing() {
        let mut backend = CrosstermBackend::new();
        assert!(!backend.is_entered());
        backend.leave().unwrap();
        backend.leave().unwrap();
        assert!(!backend.is_entered());
    }
}
