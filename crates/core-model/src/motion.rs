//! Cursor motions. None of them mutate the document; each one returns
//! whether the cursor actually moved.

use core_text::Position;

use crate::EditorModel;

impl EditorModel {
    fn move_vertical(&mut self, line: usize) -> bool {
        let cur = self.view.cursor;
        if line == cur.line {
            return false;
        }
        let col = cur.col.min(self.line_len(line));
        self.set_cursor(Position::new(line, col));
        true
    }

    pub fn move_up(&mut self) -> bool {
        match self.view.cursor.line.checked_sub(1) {
            Some(line) => self.move_vertical(line),
            None => false,
        }
    }

    pub fn move_down(&mut self) -> bool {
        let next = self.view.cursor.line + 1;
        if next < self.state.document.line_count() {
            self.move_vertical(next)
        } else {
            false
        }
    }

    /// One char left; never wraps to the previous line.
    pub fn move_left(&mut self) -> bool {
        let cur = self.view.cursor;
        if cur.col == 0 {
            return false;
        }
        self.set_cursor(Position::new(cur.line, cur.col - 1));
        true
    }

    /// One char right, up to the end-of-line position; never wraps.
    pub fn move_right(&mut self) -> bool {
        let cur = self.view.cursor;
        if cur.col >= self.line_len(cur.line) {
            return false;
        }
        self.set_cursor(Position::new(cur.line, cur.col + 1));
        true
    }

    pub fn line_start(&mut self) -> bool {
        let cur = self.view.cursor;
        if cur.col == 0 {
            return false;
        }
        self.set_cursor(Position::new(cur.line, 0));
        true
    }

    pub fn line_end(&mut self) -> bool {
        let cur = self.view.cursor;
        let len = self.line_len(cur.line);
        if cur.col == len {
            return false;
        }
        self.set_cursor(Position::new(cur.line, len));
        true
    }

    /// Step left at least once, stopping on the first space or at column 0.
    pub fn word_left(&mut self) -> bool {
        let cur = self.view.cursor;
        if cur.col == 0 {
            return false;
        }
        let doc = &self.state.document;
        let mut col = cur.col;
        loop {
            col -= 1;
            if col == 0 || doc.char_at(cur.line, col) == Some(' ') {
                break;
            }
        }
        self.set_cursor(Position::new(cur.line, col));
        true
    }

    /// Step right at least once, stopping on the first space or at end of line.
    pub fn word_right(&mut self) -> bool {
        let cur = self.view.cursor;
        let len = self.line_len(cur.line);
        if cur.col >= len {
            return false;
        }
        let doc = &self.state.document;
        let mut col = cur.col;
        loop {
            col += 1;
            if col >= len || doc.char_at(cur.line, col) == Some(' ') {
                break;
            }
        }
        self.set_cursor(Position::new(cur.line, col));
        true
    }

    /// Jump to `pos`, clamped into the document.
    pub fn move_to(&mut self, mut pos: Position) {
        let doc = &self.state.document;
        pos.clamp_to(doc.line_count(), |l| doc.line_len(l));
        self.set_cursor(pos);
    }
}
