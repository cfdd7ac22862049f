//! In-memory `Screen` used by tests to drive the editor without a terminal.

use anyhow::{Result, anyhow};
use core_events::InputEvent;
use std::collections::VecDeque;

use crate::frame::{Cell, Frame};
use crate::screen::Screen;
use crate::style::CellStyle;

#[derive(Debug)]
pub struct MemoryScreen {
    frame: Frame,
    flushed: Option<Frame>,
    cursor: Option<(u16, u16)>,
    events: VecDeque<InputEvent>,
    flushes: usize,
}

impl MemoryScreen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            frame: Frame::new(cols, rows),
            flushed: None,
            cursor: None,
            events: VecDeque::new(),
            flushes: 0,
        }
    }

    pub fn with_events<I: IntoIterator<Item = InputEvent>>(mut self, events: I) -> Self {
        self.events.extend(events);
        self
    }

    /// Row text from the last flushed frame; empty before the first flush.
    pub fn row_text(&self, row: u16) -> String {
        self.flushed
            .as_ref()
            .map(|f| f.row_text(row))
            .unwrap_or_default()
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        self.flushed.as_ref().and_then(|f| f.get(col, row)).copied()
    }

    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl Screen for MemoryScreen {
    fn size(&self) -> (u16, u16) {
        (self.frame.width, self.frame.height)
    }

    fn clear(&mut self) {
        self.frame.fill(Cell::default());
    }

    fn set_cell(&mut self, col: u16, row: u16, ch: char, style: CellStyle) {
        self.frame.set(col, row, Cell { ch, style });
    }

    fn set_cursor(&mut self, pos: Option<(u16, u16)>) {
        self.cursor = pos;
    }

    fn flush(&mut self) -> Result<()> {
        self.flushed = Some(self.frame.clone());
        self.flushes += 1;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<InputEvent> {
        let ev = self
            .events
            .pop_front()
            .ok_or_else(|| anyhow!("scripted input exhausted"))?;
        if let InputEvent::Resize(cols, rows) = ev {
            self.frame = Frame::new(cols, rows);
        }
        Ok(ev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyEvent;

    #[test]
    fn drawing_is_visible_only_after_flush() {
        let mut s = MemoryScreen::new(5, 1);
        s.put_str(0, 0, "hello world", 5, CellStyle::default());
        assert_eq!(s.row_text(0), "");
        s.flush().unwrap();
        assert_eq!(s.row_text(0), "hello");
        assert_eq!(s.flush_count(), 1);
    }

    #[test]
    fn scripted_events_then_exhaustion() {
        let mut s = MemoryScreen::new(2, 2)
            .with_events([InputEvent::Key(KeyEvent::char('a')), InputEvent::Resize(8, 3)]);
        assert_eq!(s.poll_event().unwrap(), InputEvent::Key(KeyEvent::char('a')));
        assert_eq!(s.poll_event().unwrap(), InputEvent::Resize(8, 3));
        assert_eq!(s.size(), (8, 3));
        assert!(s.poll_event().is_err());
    }
}
