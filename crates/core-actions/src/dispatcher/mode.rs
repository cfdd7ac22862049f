//! Mode transitions and terminal resize.

use super::DispatchResult;
use core_config::Config;
use core_model::{EditorModel, Layout};
use core_state::Mode;

pub(crate) fn handle_enter_mode(
    target: Mode,
    model: &mut EditorModel,
    config: &Config,
) -> DispatchResult {
    let state = model.state_mut();
    if state.mode == target {
        return DispatchResult::clean();
    }
    match target {
        Mode::Settings => state.begin_settings(config.styles),
        Mode::Command | Mode::Insert => state.enter_mode(target),
    }
    DispatchResult::dirty()
}

/// Re-derive the text area from the new screen size.
pub(crate) fn handle_resize(cols: u16, rows: u16, model: &mut EditorModel) -> DispatchResult {
    let layout = Layout::for_screen(cols, rows);
    model.resize(layout.text.height as usize, layout.text.width as usize);
    tracing::debug!(target: "actions.dispatch", cols, rows, text_rows = layout.text.height, text_cols = layout.text.width, "resize");
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use crate::Action;
    use core_state::Mode;
    use core_text::Position;

    #[test]
    fn esc_from_insert_returns_to_command() {
        let mut h = Harness::new(&["x"]);
        h.type_command("write");
        assert_eq!(h.model.state().mode, Mode::Insert);
        assert!(h.run(Action::EnterMode(Mode::Command)).dirty);
        assert_eq!(h.model.state().mode, Mode::Command);
        assert!(!h.run(Action::EnterMode(Mode::Command)).dirty);
    }

    #[test]
    fn resize_shrinks_text_area() {
        let mut h = Harness::new(&["0123456789"; 20]);
        h.model.move_to(Position::new(15, 9));
        h.run(Action::Resize(8, 6));
        // 6 rows minus status = 5 text rows, 8 cols minus gutter = 5 text cols
        assert_eq!(h.model.view().rows(), 5);
        assert_eq!(h.model.view().cols(), 5);
        assert_eq!(h.model.view().screen_cursor(), Some((4, 4)));
    }
}
