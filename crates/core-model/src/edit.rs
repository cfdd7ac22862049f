//! Structural edits at the cursor. Each successful edit marks the state dirty.

use core_text::Position;

use crate::{EditError, EditorModel};

impl EditorModel {
    /// Insert `ch` before the cursor and advance. `'\n'` splits the line.
    pub fn insert_character(&mut self, ch: char) -> Result<(), EditError> {
        if ch == '\n' {
            return self.split_line();
        }
        let at = self.checked_cursor()?;
        self.state.document.insert_char(at, ch)?;
        self.state.dirty = true;
        self.set_cursor(Position::new(at.line, at.col + 1));
        Ok(())
    }

    /// Split at the cursor; the cursor moves to the start of the new line.
    pub fn split_line(&mut self) -> Result<(), EditError> {
        let at = self.checked_cursor()?;
        self.state.document.split_line(at)?;
        self.state.dirty = true;
        self.set_cursor(Position::new(at.line + 1, 0));
        Ok(())
    }

    /// At column 0 of a non-first line, append it to the previous line.
    /// Returns false (no-op) on the first line.
    pub fn join_with_previous(&mut self) -> Result<bool, EditError> {
        let at = self.checked_cursor()?;
        if at.line == 0 {
            return Ok(false);
        }
        let prev_len = self.state.document.join_with_previous(at.line)?;
        self.state.dirty = true;
        self.set_cursor(Position::new(at.line - 1, prev_len));
        Ok(true)
    }

    /// Remove the char before the cursor. Returns false at column 0.
    pub fn delete_character_before(&mut self) -> Result<bool, EditError> {
        let at = self.checked_cursor()?;
        if at.col == 0 {
            return Ok(false);
        }
        self.state
            .document
            .remove_char(Position::new(at.line, at.col - 1))?;
        self.state.dirty = true;
        self.set_cursor(Position::new(at.line, at.col - 1));
        Ok(true)
    }

    /// Backspace: join at column 0, otherwise delete the previous char.
    pub fn backspace(&mut self) -> Result<bool, EditError> {
        if self.view.cursor.col == 0 {
            self.join_with_previous()
        } else {
            self.delete_character_before()
        }
    }
}
