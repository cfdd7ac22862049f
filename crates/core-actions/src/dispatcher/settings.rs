//! Settings mode: pick a color slot, cycle it through the palette with
//! live preview, then commit (persist) or cancel (restore).

use super::DispatchResult;
use crate::SettingsAction;
use core_config::Config;
use core_model::EditorModel;
use core_state::{EPHEMERAL_TTL, Mode};

pub(crate) fn handle_settings(
    action: SettingsAction,
    model: &mut EditorModel,
    config: &mut Config,
) -> DispatchResult {
    let state = model.state_mut();
    let Some(session) = state.settings.as_mut() else {
        tracing::warn!(target: "actions.settings", ?action, "settings_action_without_session");
        return DispatchResult::clean();
    };
    match action {
        SettingsAction::SelectPrev => session.select_prev(),
        SettingsAction::SelectNext => session.select_next(),
        SettingsAction::CyclePrev | SettingsAction::CycleNext => {
            let delta = if action == SettingsAction::CycleNext { 1 } else { -1 };
            let slot = session.slot();
            // Applied straight to the live styles so the next frame previews it.
            let color = slot.cycle(&mut config.styles, delta);
            tracing::trace!(target: "actions.settings", key = slot.key(), %color, "preview");
        }
        SettingsAction::Commit => {
            state.enter_mode(Mode::Command);
            match config.save() {
                Ok(()) => state.set_ephemeral("Settings saved", EPHEMERAL_TTL),
                Err(e) => {
                    tracing::warn!(target: "actions.settings", error = %e, "settings_save_failed");
                    state.set_error(format!("Settings not saved: {e}"), EPHEMERAL_TTL);
                }
            }
        }
        SettingsAction::Cancel => {
            config.styles = *session.original();
            state.enter_mode(Mode::Command);
            tracing::debug!(target: "actions.settings", "settings_discarded");
        }
    }
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use crate::{Action, SettingsAction};
    use core_config::{Color, Config, StyleSet, load_from};
    use core_state::Mode;

    #[test]
    fn cycle_previews_and_cancel_restores() {
        let mut h = Harness::new(&["x"]);
        h.type_command("settings");
        assert_eq!(h.model.state().mode, Mode::Settings);
        h.run(Action::Settings(SettingsAction::SelectNext)); // main background
        h.run(Action::Settings(SettingsAction::CycleNext));
        assert_eq!(h.config.styles.main.bg, Color::DarkGrey);
        h.run(Action::Settings(SettingsAction::Cancel));
        assert_eq!(h.config.styles, StyleSet::default());
        assert_eq!(h.model.state().mode, Mode::Command);
        assert!(h.model.state().settings.is_none());
    }

    #[test]
    fn commit_persists_and_returns_to_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        let mut h = Harness::new(&["x"]);
        h.config = Config::with_path(path.clone());
        h.type_command("config");
        h.run(Action::Settings(SettingsAction::SelectPrev)); // error background
        h.run(Action::Settings(SettingsAction::CyclePrev));
        h.run(Action::Settings(SettingsAction::CyclePrev));
        h.run(Action::Settings(SettingsAction::Commit));
        assert_eq!(h.model.state().mode, Mode::Command);
        assert_eq!(h.config.styles.error.bg, Color::DarkCyan);
        let reloaded = load_from(Some(path)).unwrap();
        assert_eq!(reloaded.styles, h.config.styles);
    }

    #[test]
    fn settings_actions_without_session_are_ignored() {
        let mut h = Harness::new(&["x"]);
        let r = h.run(Action::Settings(SettingsAction::CycleNext));
        assert!(!r.dirty);
        assert_eq!(h.config.styles, StyleSet::default());
    }
}
