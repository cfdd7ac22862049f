//! Frame composition: paints an `EditorModel` onto a `Screen`.
//!
//! Every call repaints the whole off-screen frame and flushes it; the
//! `Screen` implementation decides how much actually reaches the terminal.
//!
//! Layers, bottom to top:
//! 1. Document (gutter + text) or, in Settings mode, the settings view.
//! 2. Status bar with any transient message.
//! 3. Filename prompt box when a prompt is open.
//!
//! Colors come from the live `StyleSet`, so a palette change in Settings
//! mode shows up on the very next frame.

use anyhow::Result;
use core_config::StyleSet;
use core_model::{EditorModel, Layout, LayoutRegion};
use core_state::Mode;
use core_terminal::Screen;
use std::time::Instant;

mod document;
mod prompt;
mod settings;
pub mod status;

pub use status::{StatusContext, StatusSegment, compose_status, format_left, format_right};

pub fn render<S: Screen + ?Sized>(
    screen: &mut S,
    model: &EditorModel,
    styles: &StyleSet,
) -> Result<()> {
    let start = Instant::now();
    let (cols, rows) = screen.size();
    let layout = Layout::for_screen(cols, rows);
    let state = model.state();
    screen.clear();

    let mut cursor = match (state.mode, &state.settings) {
        (Mode::Settings, Some(session)) => {
            let area = LayoutRegion::new(0, 0, cols, layout.text.height);
            settings::draw_settings(screen, area, session, styles);
            None
        }
        _ => document::draw_document(screen, &layout, model, styles),
    };
    let command_end = status::draw_status(screen, layout.status, model, styles);
    if state.mode == Mode::Command && !state.command_line.is_empty() {
        cursor = Some((command_end, layout.status.y));
    }
    if let Some(p) = &state.prompt {
        cursor = prompt::draw_prompt(screen, &layout, p, styles);
    }
    screen.set_cursor(cursor);
    screen.flush()?;
    tracing::trace!(
        target: "render",
        mode = state.mode.label(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "frame"
    );
    Ok(())
}
