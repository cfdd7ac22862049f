//! `Screen` implementation on top of crossterm.
//!
//! Drawing goes into a back frame; `flush` compares it with the last flushed
//! frame and emits only cells that changed, grouping runs so `MoveTo` and
//! color changes are queued only when needed.

use anyhow::Result;
use core_events::{InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event as CEvent, KeyCode as CKeyCode, KeyEventKind, KeyModifiers as CMods},
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{Stdout, Write, stdout};

use crate::frame::{Cell, Frame};
use crate::screen::Screen;
use crate::style::CellStyle;

pub struct CrosstermScreen<W: Write = Stdout> {
    out: W,
    back: Frame,
    front: Option<Frame>,
    cursor: Option<(u16, u16)>,
}

impl CrosstermScreen<Stdout> {
    /// Screen sized to the current terminal, writing to stdout.
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_writer(stdout(), cols, rows))
    }
}

impl<W: Write> CrosstermScreen<W> {
    pub fn with_writer(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            back: Frame::new(cols, rows),
            front: None,
            cursor: None,
        }
    }

    /// Resize the back frame and force a full repaint on the next flush.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.back = Frame::new(cols, rows);
        self.front = None;
    }
}

impl<W: Write> Screen for CrosstermScreen<W> {
    fn size(&self) -> (u16, u16) {
        (self.back.width, self.back.height)
    }

    fn clear(&mut self) {
        self.back.fill(Cell::default());
    }

    fn set_cell(&mut self, col: u16, row: u16, ch: char, style: CellStyle) {
        self.back.set(col, row, Cell { ch, style });
    }

    fn set_cursor(&mut self, pos: Option<(u16, u16)>) {
        self.cursor = pos;
    }

    fn flush(&mut self) -> Result<()> {
        let full = self.front.is_none();
        queue!(self.out, Hide)?;
        if full {
            queue!(self.out, Clear(ClearType::All))?;
        }
        let mut pen: Option<(u16, u16)> = None;
        let mut last_style: Option<CellStyle> = None;
        let mut emitted = 0usize;
        for y in 0..self.back.height {
            for x in 0..self.back.width {
                let Some(cell) = self.back.get(x, y) else {
                    continue;
                };
                if !full && self.front.as_ref().and_then(|f| f.get(x, y)) == Some(cell) {
                    continue;
                }
                if pen != Some((x, y)) {
                    queue!(self.out, MoveTo(x, y))?;
                }
                if last_style != Some(cell.style) {
                    queue!(
                        self.out,
                        SetForegroundColor(cell.style.fg.into()),
                        SetBackgroundColor(cell.style.bg.into())
                    )?;
                    last_style = Some(cell.style);
                }
                queue!(self.out, Print(cell.ch))?;
                pen = Some((x.saturating_add(1), y));
                emitted += 1;
            }
        }
        queue!(self.out, ResetColor)?;
        if let Some((col, row)) = self.cursor {
            queue!(self.out, MoveTo(col, row), Show)?;
        }
        self.out.flush()?;
        self.front = Some(self.back.clone());
        tracing::trace!(target: "render", full, emitted, "flush");
        Ok(())
    }

    fn poll_event(&mut self) -> Result<InputEvent> {
        loop {
            match event::read()? {
                CEvent::Key(k) if k.kind != KeyEventKind::Release => {
                    if let Some(ev) = map_key(k.code, k.modifiers) {
                        return Ok(InputEvent::Key(ev));
                    }
                }
                CEvent::Resize(cols, rows) => {
                    self.resize(cols, rows);
                    return Ok(InputEvent::Resize(cols, rows));
                }
                _ => {}
            }
        }
    }
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// Translate a crossterm key into the editor's key model; keys the editor
/// never acts on map to `None`.
pub(crate) fn map_key(code: CKeyCode, mods: CMods) -> Option<KeyEvent> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        _ => return None,
    };
    Some(KeyEvent::new(code, map_mods(mods)))
}
