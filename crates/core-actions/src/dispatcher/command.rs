//! Command-line editing and execution, plus the filename prompt opened by
//! `save` / `open` without an argument.

use super::DispatchResult;
use super::command_parser::parse_command_line;
use crate::Action;
use crate::builtins::{open_path, save_to};
use crate::registry::{CommandContext, CommandError, CommandRegistry};
use core_config::Config;
use core_model::EditorModel;
use core_state::{EPHEMERAL_TTL, PendingFileOp};
use std::path::PathBuf;

pub(crate) fn handle_command_action(
    action: Action,
    model: &mut EditorModel,
    registry: &CommandRegistry,
    config: &mut Config,
) -> DispatchResult {
    let state = model.state_mut();
    match action {
        Action::CommandChar(ch) => {
            state.command_line.push_char(ch);
            DispatchResult::dirty()
        }
        Action::CommandBackspace => {
            state.command_line.backspace();
            DispatchResult::dirty()
        }
        Action::CommandExecute => execute_command_line(model, registry, config),
        Action::PromptChar(ch) => {
            if let Some(p) = state.prompt.as_mut() {
                p.input.push(ch);
            }
            DispatchResult::dirty()
        }
        Action::PromptBackspace => {
            if let Some(p) = state.prompt.as_mut() {
                p.input.pop();
            }
            DispatchResult::dirty()
        }
        Action::PromptCancel => {
            state.prompt = None;
            DispatchResult::dirty()
        }
        Action::PromptSubmit => submit_prompt(model, registry, config),
        other => {
            tracing::error!(target: "actions.command", action = ?other, "non_command_action_routed");
            DispatchResult::clean()
        }
    }
}

fn execute_command_line(
    model: &mut EditorModel,
    registry: &CommandRegistry,
    config: &mut Config,
) -> DispatchResult {
    // The accumulator is cleared whether or not the command succeeds.
    let raw = model.state_mut().command_line.take();
    let Some(line) = parse_command_line(&raw) else {
        return DispatchResult::dirty();
    };
    tracing::debug!(target: "actions.command", name = %line.name, args = line.args.len(), "command_line");
    let mut ctx = CommandContext::new(model, config, registry);
    let outcome = registry.execute(&line.name, &mut ctx, &line.args);
    finish(ctx, outcome, &line.name)
}

fn submit_prompt(
    model: &mut EditorModel,
    registry: &CommandRegistry,
    config: &mut Config,
) -> DispatchResult {
    let Some(prompt) = model.state_mut().prompt.take() else {
        return DispatchResult::clean();
    };
    let name = prompt.input.trim();
    let label = match prompt.op {
        PendingFileOp::Save => "save",
        PendingFileOp::Open => "open",
    };
    let mut ctx = CommandContext::new(model, config, registry);
    let outcome = if name.is_empty() {
        Err(CommandError::NoFilename)
    } else {
        let path = PathBuf::from(name);
        match prompt.op {
            PendingFileOp::Save => save_to(&mut ctx, Some(path)),
            PendingFileOp::Open => open_path(&mut ctx, path),
        }
    };
    finish(ctx, outcome, label)
}

/// Translate a command outcome into a dispatch result, surfacing errors as
/// a transient error message.
fn finish(
    mut ctx: CommandContext<'_>,
    outcome: Result<(), CommandError>,
    name: &str,
) -> DispatchResult {
    match outcome {
        Ok(()) if ctx.quit_requested() => DispatchResult::quit(),
        Ok(()) => DispatchResult::dirty(),
        Err(e) => {
            tracing::warn!(target: "actions.command", name, error = %e, "command_failed");
            ctx.model.state_mut().set_error(e.to_string(), EPHEMERAL_TTL);
            DispatchResult::dirty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use crate::Action;
    use core_state::{MessageKind, Mode, PendingFileOp};
    use pretty_assertions::assert_eq;

    #[test]
    fn accumulator_cleared_after_execute_even_on_error() {
        let mut h = Harness::new(&["x"]);
        let r = h.type_command("bogus arg");
        assert!(!r.quit);
        let st = h.model.state();
        assert!(st.command_line.is_empty());
        assert_eq!(st.mode, Mode::Command);
        let msg = st.ephemeral_status.as_ref().unwrap();
        assert_eq!(msg.kind, MessageKind::Error);
        assert_eq!(msg.text, "unknown command: bogus");
    }

    #[test]
    fn name_is_case_insensitive() {
        let mut h = Harness::new(&["x"]);
        assert!(h.type_command("Q").quit);
        let mut h = Harness::new(&["x"]);
        assert!(h.type_command("  QUIT  ").quit);
    }

    #[test]
    fn backspace_and_blank_line() {
        let mut h = Harness::new(&["x"]);
        h.run(Action::CommandChar('w'));
        h.run(Action::CommandBackspace);
        h.run(Action::CommandBackspace);
        assert!(h.model.state().command_line.is_empty());
        let r = h.run(Action::CommandExecute);
        assert!(!r.quit);
        assert!(h.model.state().ephemeral_status.is_none());
    }

    #[test]
    fn prompt_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.txt");
        let mut h = Harness::new(&["one", "two"]);
        h.type_command("save");
        assert_eq!(
            h.model.state().prompt.as_ref().map(|p| p.op),
            Some(PendingFileOp::Save)
        );
        for ch in path.display().to_string().chars() {
            h.run(Action::PromptChar(ch));
        }
        h.run(Action::PromptChar('!'));
        h.run(Action::PromptBackspace);
        h.run(Action::PromptSubmit);
        assert!(h.model.state().prompt.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo");
        assert_eq!(h.model.state().file_name.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn prompt_open_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();
        let mut h = Harness::new(&["x"]);
        h.type_command("o");
        for ch in path.display().to_string().chars() {
            h.run(Action::PromptChar(ch));
        }
        assert!(h.run(Action::PromptSubmit).dirty);
        assert_eq!(h.model.state().file_name.as_deref(), Some(path.as_path()));
        assert_eq!(h.model.state().document.lines(), vec!["alpha", "beta"]);
    }

    #[test]
    fn prompt_cancel_and_empty_submit() {
        let mut h = Harness::new(&["x"]);
        h.type_command("open");
        h.run(Action::PromptCancel);
        assert!(h.model.state().prompt.is_none());
        assert!(h.model.state().ephemeral_status.is_none());
        h.type_command("open");
        h.run(Action::PromptSubmit);
        let msg = h.model.state().ephemeral_status.as_ref().unwrap();
        assert_eq!(msg.text, "no file name");
    }
}
