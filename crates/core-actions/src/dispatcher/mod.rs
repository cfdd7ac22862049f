//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules by concern:
//! * `motion`   - cursor movement
//! * `edit`     - text mutation in Insert mode
//! * `mode`     - mode transitions and resize
//! * `command`  - command-line editing, execution and the filename prompt
//! * `settings` - slot selection, palette cycling, commit/cancel
//!
//! Errors never escape `dispatch`: command and IO failures become a
//! transient error message on the state.

use crate::{Action, registry::CommandRegistry};
use core_config::Config;
use core_model::EditorModel;

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;
mod settings;

pub use command_parser::{CommandLine, parse_command_line};

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
    fn from_flag(changed: bool) -> Self {
        if changed { Self::dirty() } else { Self::clean() }
    }
}

/// Apply an action. Returns whether a redraw is needed and whether to exit.
pub fn dispatch(
    action: Action,
    model: &mut EditorModel,
    registry: &CommandRegistry,
    config: &mut Config,
) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", ?action, mode = model.state().mode.label(), "dispatch");
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, model),
        Action::Edit(kind) => edit::handle_edit(kind, model),
        Action::EnterMode(m) => mode::handle_enter_mode(m, model, config),
        Action::Resize(cols, rows) => mode::handle_resize(cols, rows, model),
        Action::CommandChar(_)
        | Action::CommandBackspace
        | Action::CommandExecute
        | Action::PromptChar(_)
        | Action::PromptBackspace
        | Action::PromptSubmit
        | Action::PromptCancel => command::handle_command_action(action, model, registry, config),
        Action::Settings(a) => settings::handle_settings(a, model, config),
        Action::Quit => {
            tracing::info!(target: "actions.dispatch", "quit_requested");
            DispatchResult::quit()
        }
    }
}
