//! Text edits. Only Insert mode mutates the document from keys.

use super::DispatchResult;
use crate::EditKind;
use core_model::EditorModel;
use core_state::{EPHEMERAL_TTL, Mode};

pub(crate) fn handle_edit(kind: EditKind, model: &mut EditorModel) -> DispatchResult {
    if model.state().mode != Mode::Insert {
        return DispatchResult::clean();
    }
    let before = model.cursor();
    let result = match kind {
        EditKind::InsertChar(ch) => model.insert_character(ch).map(|_| true),
        EditKind::Newline => model.split_line().map(|_| true),
        EditKind::Backspace => model.backspace(),
    };
    match result {
        Ok(changed) => {
            let after = model.cursor();
            tracing::trace!(target: "actions.dispatch", ?kind, line = before.line, col = before.col, to_line = after.line, to_col = after.col, changed, "edit");
            DispatchResult::from_flag(changed)
        }
        Err(e) => {
            tracing::error!(target: "actions.dispatch", ?kind, error = %e, "edit_failed");
            model.state_mut().set_error(e.to_string(), EPHEMERAL_TTL);
            DispatchResult::dirty()
        }
    }
}
