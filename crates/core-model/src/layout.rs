//! Screen geometry: gutter, text area and status row.
//!
//! The bottom row is the status bar. The remaining rows are split into a
//! fixed-width line-number gutter on the left and the text area.

/// Columns reserved for line numbers.
pub const GUTTER_WIDTH: u16 = 3;
/// Rows reserved below the text area.
pub const STATUS_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub gutter: LayoutRegion,
    pub text: LayoutRegion,
    pub status: LayoutRegion,
}

impl Layout {
    /// Split a `cols` x `rows` screen. Degenerate sizes produce zero-sized
    /// regions rather than failing.
    pub fn for_screen(cols: u16, rows: u16) -> Self {
        let text_rows = rows.saturating_sub(STATUS_ROWS);
        let gutter_w = GUTTER_WIDTH.min(cols);
        Self {
            gutter: LayoutRegion::new(0, 0, gutter_w, text_rows),
            text: LayoutRegion::new(gutter_w, 0, cols - gutter_w, text_rows),
            status: LayoutRegion::new(0, text_rows, cols, rows - text_rows),
        }
    }
}
