//! Line-number gutter and text area.

use core_config::{Role, StyleSet};
use core_model::{EditorModel, Layout, LayoutRegion};
use core_terminal::{CellStyle, Screen};

/// Marker drawn in the gutter for rows past the end of the document.
const EMPTY_ROW_MARKER: &str = "~";

/// Paint gutter and text. Returns the screen position of the cursor when it
/// falls inside the text area.
pub(crate) fn draw_document<S: Screen + ?Sized>(
    screen: &mut S,
    layout: &Layout,
    model: &EditorModel,
    styles: &StyleSet,
) -> Option<(u16, u16)> {
    let doc = &model.state().document;
    let view = model.view();
    let text = layout.text;
    let main = styles.style(Role::Main);
    for row in 0..text.height {
        let line = view.row_offset() + row as usize;
        draw_gutter_cell(screen, layout.gutter, row, line, doc.line_count(), styles);
        fill_row(screen, text, row, main);
        if let Some(content) = doc.line(line) {
            let visible = content
                .chars()
                .skip(view.col_offset())
                .take(text.width as usize)
                .map(|c| if c.is_control() { ' ' } else { c });
            for (i, ch) in visible.enumerate() {
                screen.set_cell(text.x + i as u16, text.y + row, ch, main);
            }
        }
    }
    let (row, col) = view.screen_cursor()?;
    let (row, col) = (u16::try_from(row).ok()?, u16::try_from(col).ok()?);
    (row < text.height && col < text.width).then_some((text.x + col, text.y + row))
}

fn draw_gutter_cell<S: Screen + ?Sized>(
    screen: &mut S,
    gutter: LayoutRegion,
    row: u16,
    line: usize,
    line_count: usize,
    styles: &StyleSet,
) {
    let width = gutter.width as usize;
    if width == 0 {
        return;
    }
    let label = if line < line_count {
        (line + 1).to_string()
    } else {
        EMPTY_ROW_MARKER.to_string()
    };
    let mut cell = format!("{label:>width$}");
    // Keep the low digits when a number outgrows the gutter.
    if cell.len() > width {
        cell = cell.split_off(cell.len() - width);
    }
    screen.put_str(gutter.x, gutter.y + row, &cell, gutter.width, styles.style(Role::LineCount));
}

fn fill_row<S: Screen + ?Sized>(screen: &mut S, region: LayoutRegion, row: u16, style: CellStyle) {
    for col in region.x..region.x + region.width {
        screen.set_cell(col, region.y + row, ' ', style);
    }
}
