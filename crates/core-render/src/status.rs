//! Status bar composition.
//!
//! Format: `[MODE] <name>[*] ❯ <command>` on the left and `row N col M` on
//! the right edge.
//! * `<name>` is the base file name or `[No Name]` for an unsaved document.
//! * `*` appears only when the document is dirty.
//! * The `❯ <command>` segment is shown only in Command mode.
//!
//! Two stages: `compose_status` builds ordered `StatusSegment`s, then
//! `format_left` / `format_right` turn them into strings. `draw_status`
//! paints the row, slotting any transient message between the two sides.

use core_config::{Role, StyleSet};
use core_model::{EditorModel, LayoutRegion};
use core_state::{MessageKind, Mode};
use core_terminal::Screen;
use std::borrow::Cow;
use std::path::Path;

pub const COMMAND_PROMPT: char = '❯';

/// What the status bar needs to know about the editor.
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub line: usize, // 0-based
    pub col: usize,  // 0-based
    pub command_buffer: &'a str,
    pub file_name: Option<&'a Path>,
    pub dirty: bool,
}

impl<'a> StatusContext<'a> {
    pub fn from_model(model: &'a EditorModel) -> Self {
        let state = model.state();
        let cursor = model.cursor();
        Self {
            mode: state.mode,
            line: cursor.line,
            col: cursor.col,
            command_buffer: state.command_line.buffer(),
            file_name: state.file_name.as_deref(),
            dirty: state.dirty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    /// File name with the dirty marker already applied.
    FileName(Cow<'a, str>),
    Command(&'a str),
    /// 1-based cursor line and column.
    Position { line_1: usize, col_1: usize },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name.and_then(|p| p.file_name()) {
        Some(n) => n.to_string_lossy(),
        None => Cow::Borrowed("[No Name]"),
    };
    let name = if ctx.dirty {
        Cow::Owned(format!("{name}*"))
    } else {
        name
    };
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::Mode(ctx.mode.label()));
    out.push(StatusSegment::FileName(name));
    if ctx.mode == Mode::Command {
        out.push(StatusSegment::Command(ctx.command_buffer));
    }
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    out
}

/// Left-hand side: mode, file name and the command line.
pub fn format_left(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(48);
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                s.push('[');
                s.push_str(m);
                s.push(']');
            }
            StatusSegment::FileName(name) => {
                s.push(' ');
                s.push_str(name);
            }
            StatusSegment::Command(cmd) => {
                s.push(' ');
                s.push(COMMAND_PROMPT);
                s.push(' ');
                s.push_str(cmd);
            }
            StatusSegment::Position { .. } => {}
        }
    }
    s
}

pub fn format_right(segments: &[StatusSegment<'_>]) -> String {
    segments
        .iter()
        .find_map(|seg| match seg {
            StatusSegment::Position { line_1, col_1 } => Some(format!("row {line_1} col {col_1}")),
            _ => None,
        })
        .unwrap_or_default()
}

/// Paint the status row. Returns the column just past the left-hand text,
/// where the command-line cursor sits.
pub fn draw_status<S: Screen + ?Sized>(
    screen: &mut S,
    region: LayoutRegion,
    model: &EditorModel,
    styles: &StyleSet,
) -> u16 {
    if region.height == 0 || region.width == 0 {
        return 0;
    }
    let style = styles.style(Role::Status);
    let row = region.y;
    for col in region.x..region.x + region.width {
        screen.set_cell(col, row, ' ', style);
    }
    let ctx = StatusContext::from_model(model);
    let segments = compose_status(&ctx);
    let left = format_left(&segments);
    let right = format_right(&segments);

    let left_w = screen.put_str(region.x, row, &left, region.width, style);
    let right_w = right.chars().count() as u16;
    // Right side only when it fits without touching the left side.
    let right_x = if left_w + right_w + 1 < region.width {
        let x = region.x + region.width - right_w - 1;
        screen.put_str(x, row, &right, right_w, style);
        x
    } else {
        region.x + region.width
    };

    if let Some(msg) = &model.state().ephemeral_status {
        let role = match msg.kind {
            MessageKind::Info => Role::Message,
            MessageKind::Error => Role::Error,
        };
        let x = region.x + left_w + 2;
        if x < right_x {
            let padded = format!(" {} ", msg.text);
            screen.put_str(x, row, &padded, right_x - x - 1, styles.style(role));
        }
    }
    region.x + left_w
}
