//! Viewport/cursor controller.
//!
//! `EditorModel` owns the `EditorState` and the single `View`. Every cursor
//! movement and every structural edit goes through its methods, which keep
//! two invariants after each public call:
//!
//! * the cursor is a valid document position
//!   (`line < line_count`, `col <= line_len(line)`);
//! * whenever the view has a non-zero extent, the cursor lies inside it
//!   (`row_offset <= line < row_offset + rows`, same horizontally).
//!
//! `ensure_cursor_visible` is the only routine that changes the offsets.

use core_state::EditorState;
use core_text::{Position, TextError};
use thiserror::Error;

mod edit;
mod layout;
mod motion;
pub use layout::{GUTTER_WIDTH, Layout, LayoutRegion, STATUS_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("cursor {line}:{col} is outside the document")]
    OutOfBounds { line: usize, col: usize },
}

impl From<TextError> for EditError {
    fn from(e: TextError) -> Self {
        match e {
            TextError::OutOfBounds { line, col } => EditError::OutOfBounds { line, col },
            // Callers route '\n' to split_line before reaching the document.
            TextError::LineBreak => EditError::OutOfBounds { line: 0, col: 0 },
        }
    }
}

/// Cursor plus the visible window into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    cursor: Position,
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
}

impl View {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }
    pub fn col_offset(&self) -> usize {
        self.col_offset
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cursor relative to the view origin, or `None` if it is not visible.
    pub fn screen_cursor(&self) -> Option<(usize, usize)> {
        let row = self.cursor.line.checked_sub(self.row_offset)?;
        let col = self.cursor.col.checked_sub(self.col_offset)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    fn ensure_cursor_visible(&mut self) -> bool {
        let new_rows = scroll_to_fit(self.row_offset, self.cursor.line, self.rows);
        let new_cols = scroll_to_fit(self.col_offset, self.cursor.col, self.cols);
        let changed = new_rows.is_some() || new_cols.is_some();
        if let Some(r) = new_rows {
            self.row_offset = r;
        }
        if let Some(c) = new_cols {
            self.col_offset = c;
        }
        changed
    }
}

/// New offset along one axis so that `pos` falls in `[offset, offset + extent)`.
/// Returns `None` when no scroll is needed or the extent is zero.
pub fn scroll_to_fit(offset: usize, pos: usize, extent: usize) -> Option<usize> {
    if extent == 0 {
        return None;
    }
    if pos < offset {
        Some(pos)
    } else if pos >= offset + extent {
        Some(pos + 1 - extent)
    } else {
        None
    }
}

pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState, rows: usize, cols: usize) -> Self {
        Self {
            state,
            view: View::new(rows, cols),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn cursor(&self) -> Position {
        self.view.cursor
    }

    /// Re-establish the viewport invariant; returns true if an offset changed.
    pub fn ensure_cursor_visible(&mut self) -> bool {
        let changed = self.view.ensure_cursor_visible();
        if changed {
            tracing::trace!(
                target: "model.scroll",
                row_offset = self.view.row_offset,
                col_offset = self.view.col_offset,
                "scrolled"
            );
        }
        changed
    }

    /// Change the visible extent (text rows / text columns).
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.view.rows = rows;
        self.view.cols = cols;
        self.ensure_cursor_visible();
    }

    /// Cursor and offsets back to the origin, e.g. after the document was replaced.
    pub fn reset_cursor(&mut self) {
        self.view.cursor = Position::origin();
        self.view.row_offset = 0;
        self.view.col_offset = 0;
    }

    /// Clamp the cursor into the document. Needed only when the document was
    /// changed behind the controller's back (`state_mut`).
    pub fn clamp_cursor(&mut self) {
        let doc = &self.state.document;
        self.view
            .cursor
            .clamp_to(doc.line_count(), |l| doc.line_len(l));
        self.ensure_cursor_visible();
    }

    fn line_len(&self, line: usize) -> usize {
        self.state.document.line_len(line)
    }

    /// Cursor after validating it against the document.
    fn checked_cursor(&self) -> Result<Position, EditError> {
        let c = self.view.cursor;
        if self.state.document.contains(c) {
            Ok(c)
        } else {
            tracing::error!(target: "model", line = c.line, col = c.col, "cursor_out_of_bounds");
            Err(EditError::OutOfBounds {
                line: c.line,
                col: c.col,
            })
        }
    }

    fn set_cursor(&mut self, pos: Position) {
        self.view.cursor = pos;
        self.ensure_cursor_visible();
    }
}
