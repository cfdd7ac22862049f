use anyhow::Result;
use core_events::InputEvent;

use crate::style::CellStyle;

/// Cell-addressed drawing surface plus blocking input source.
///
/// Drawing calls only touch an off-screen frame; nothing reaches the
/// terminal until `flush`. Coordinates outside `size()` are ignored.
pub trait Screen {
    /// Current extent as (columns, rows).
    fn size(&self) -> (u16, u16);
    /// Reset every cell of the off-screen frame to a blank default cell.
    fn clear(&mut self);
    fn set_cell(&mut self, col: u16, row: u16, ch: char, style: CellStyle);
    /// Hardware cursor placement applied on the next flush; `None` hides it.
    fn set_cursor(&mut self, pos: Option<(u16, u16)>);
    fn flush(&mut self) -> Result<()>;
    /// Block until the next key or resize event. Resize events also resize
    /// the off-screen frame before being returned.
    fn poll_event(&mut self) -> Result<InputEvent>;

    /// Draw `text` left to right from (col,row), clipped at `max_width` cells.
    /// Returns the number of cells written.
    fn put_str(&mut self, col: u16, row: u16, text: &str, max_width: u16, style: CellStyle) -> u16 {
        let mut written = 0u16;
        for ch in text.chars() {
            if written >= max_width {
                break;
            }
            self.set_cell(col.saturating_add(written), row, ch, style);
            written += 1;
        }
        written
    }
}
