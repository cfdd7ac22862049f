//! Cursor movement. Valid in Command and Insert modes.

use super::DispatchResult;
use crate::MotionKind;
use core_model::EditorModel;

pub(crate) fn handle_motion(kind: MotionKind, model: &mut EditorModel) -> DispatchResult {
    let before = model.cursor();
    let moved = match kind {
        MotionKind::Up => model.move_up(),
        MotionKind::Down => model.move_down(),
        MotionKind::Left => model.move_left(),
        MotionKind::Right => model.move_right(),
        MotionKind::WordLeft => model.word_left(),
        MotionKind::WordRight => model.word_right(),
        MotionKind::LineStart => model.line_start(),
        MotionKind::LineEnd => model.line_end(),
    };
    let after = model.cursor();
    tracing::trace!(target: "actions.dispatch", ?kind, from_line = before.line, from_col = before.col, to_line = after.line, to_col = after.col, moved, "motion");
    DispatchResult::from_flag(moved)
}
