//! Actions, the command registry and the mode controller.
//!
//! Input flows through two steps: `translate_key` maps a key event (given
//! the current mode) to an `Action`, then `dispatch` applies it to the
//! `EditorModel`. Command-mode lines are resolved through the
//! `CommandRegistry`, which holds the built-in commands plus whatever
//! plugins contributed.

use core_state::Mode;

pub mod builtins;
pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod registry;

pub use builtins::register_builtins;
pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate_key;
pub use registry::{
    Command, CommandContext, CommandError, CommandHandler, CommandInfo, CommandRegistry,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    EnterMode(Mode),
    /// Append a char to the command-line accumulator.
    CommandChar(char),
    CommandBackspace,
    /// Tokenize and run the accumulated command line.
    CommandExecute,
    PromptChar(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    Settings(SettingsAction),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Up,
    Down,
    Left,
    Right,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    Newline,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    SelectPrev,
    SelectNext,
    CyclePrev,
    CycleNext,
    Commit,
    Cancel,
}
