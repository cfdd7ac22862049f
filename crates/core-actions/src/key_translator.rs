//! Key event -> `Action` translation for each mode.
//!
//! Stateless: the mode and whether a filename prompt is open fully decide
//! the mapping. Keys with no meaning in the current mode yield `None`.

use crate::{Action, EditKind, MotionKind, SettingsAction};
use core_events::{KeyCode, KeyEvent};
use core_state::Mode;

pub fn translate_key(mode: Mode, prompt_active: bool, key: &KeyEvent) -> Option<Action> {
    if key.is_ctrl() && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match mode {
        Mode::Command if prompt_active => translate_prompt(key),
        Mode::Command => translate_command(key),
        Mode::Insert => translate_insert(key),
        Mode::Settings => translate_settings(key),
    };
    tracing::trace!(target: "actions.translate", mode = mode.label(), key = %key, ?action, "translate");
    action
}

/// Cursor keys shared by Command and Insert modes.
fn motion_for(key: &KeyEvent) -> Option<MotionKind> {
    let ctrl = key.is_ctrl();
    Some(match key.code {
        KeyCode::Up => MotionKind::Up,
        KeyCode::Down => MotionKind::Down,
        KeyCode::Left if ctrl => MotionKind::WordLeft,
        KeyCode::Right if ctrl => MotionKind::WordRight,
        KeyCode::Left => MotionKind::Left,
        KeyCode::Right => MotionKind::Right,
        KeyCode::Home => MotionKind::LineStart,
        KeyCode::End => MotionKind::LineEnd,
        _ => return None,
    })
}

fn translate_command(key: &KeyEvent) -> Option<Action> {
    if let Some(c) = key.text_char() {
        return Some(Action::CommandChar(c));
    }
    match key.code {
        KeyCode::Backspace => Some(Action::CommandBackspace),
        KeyCode::Enter => Some(Action::CommandExecute),
        _ => motion_for(key).map(Action::Motion),
    }
}

fn translate_prompt(key: &KeyEvent) -> Option<Action> {
    if let Some(c) = key.text_char() {
        return Some(Action::PromptChar(c));
    }
    match key.code {
        KeyCode::Backspace => Some(Action::PromptBackspace),
        KeyCode::Enter => Some(Action::PromptSubmit),
        KeyCode::Esc => Some(Action::PromptCancel),
        _ => None,
    }
}

fn translate_insert(key: &KeyEvent) -> Option<Action> {
    if let Some(c) = key.text_char() {
        return Some(Action::Edit(EditKind::InsertChar(c)));
    }
    match key.code {
        KeyCode::Tab => Some(Action::Edit(EditKind::InsertChar('\t'))),
        KeyCode::Enter => Some(Action::Edit(EditKind::Newline)),
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Esc => Some(Action::EnterMode(Mode::Command)),
        _ => motion_for(key).map(Action::Motion),
    }
}

fn translate_settings(key: &KeyEvent) -> Option<Action> {
    let a = match key.code {
        KeyCode::Up => SettingsAction::SelectPrev,
        KeyCode::Down => SettingsAction::SelectNext,
        KeyCode::Left => SettingsAction::CyclePrev,
        KeyCode::Right => SettingsAction::CycleNext,
        KeyCode::Enter => SettingsAction::Commit,
        KeyCode::Esc => SettingsAction::Cancel,
        _ => return None,
    };
    Some(Action::Settings(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyModifiers;

    #[test]
    fn ctrl_c_quits_everywhere() {
        let k = KeyEvent::ctrl(KeyCode::Char('c'));
        for mode in [Mode::Command, Mode::Insert, Mode::Settings] {
            assert_eq!(translate_key(mode, false, &k), Some(Action::Quit));
        }
        assert_eq!(translate_key(Mode::Command, true, &k), Some(Action::Quit));
    }

    #[test]
    fn command_mode_accumulates_text_and_moves() {
        assert_eq!(
            translate_key(Mode::Command, false, &KeyEvent::char('q')),
            Some(Action::CommandChar('q'))
        );
        assert_eq!(
            translate_key(Mode::Command, false, &KeyEvent::plain(KeyCode::Enter)),
            Some(Action::CommandExecute)
        );
        assert_eq!(
            translate_key(Mode::Command, false, &KeyEvent::ctrl(KeyCode::Right)),
            Some(Action::Motion(MotionKind::WordRight))
        );
        assert_eq!(
            translate_key(Mode::Command, false, &KeyEvent::plain(KeyCode::Esc)),
            None
        );
    }

    #[test]
    fn shifted_chars_are_text() {
        let k = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(
            translate_key(Mode::Insert, false, &k),
            Some(Action::Edit(EditKind::InsertChar('Q')))
        );
        let alt = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(translate_key(Mode::Insert, false, &alt), None);
    }

    #[test]
    fn prompt_captures_keys_before_command_line() {
        assert_eq!(
            translate_key(Mode::Command, true, &KeyEvent::char('a')),
            Some(Action::PromptChar('a'))
        );
        assert_eq!(
            translate_key(Mode::Command, true, &KeyEvent::plain(KeyCode::Esc)),
            Some(Action::PromptCancel)
        );
        assert_eq!(
            translate_key(Mode::Command, true, &KeyEvent::plain(KeyCode::Up)),
            None
        );
    }

    #[test]
    fn insert_and_settings_keys() {
        assert_eq!(
            translate_key(Mode::Insert, false, &KeyEvent::plain(KeyCode::Esc)),
            Some(Action::EnterMode(Mode::Command))
        );
        assert_eq!(
            translate_key(Mode::Insert, false, &KeyEvent::plain(KeyCode::Tab)),
            Some(Action::Edit(EditKind::InsertChar('\t')))
        );
        assert_eq!(
            translate_key(Mode::Settings, false, &KeyEvent::plain(KeyCode::Right)),
            Some(Action::Settings(SettingsAction::CycleNext))
        );
        assert_eq!(
            translate_key(Mode::Settings, false, &KeyEvent::char('x')),
            None
        );
    }
}
