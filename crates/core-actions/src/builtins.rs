//! Built-in commands: quit, write, save, open, help, settings.

use crate::io_ops::{open_into, write_file};
use crate::registry::{Command, CommandContext, CommandError, CommandRegistry};
use core_state::{Mode, PendingFileOp};
use std::path::PathBuf;

pub fn register_builtins(registry: &mut CommandRegistry) {
    registry.register(
        Command::new("quit", "Exit the editor", |ctx, _| {
            ctx.request_quit();
            Ok(())
        })
        .with_aliases(&["q"]),
    );
    registry.register(
        Command::new("write", "Enter insert mode", |ctx, _| {
            ctx.model.state_mut().enter_mode(Mode::Insert);
            Ok(())
        })
        .with_aliases(&["w"]),
    );
    registry.register(
        Command::new("save", "Save the document [path]", save).with_aliases(&["s"]),
    );
    registry.register(
        Command::new("open", "Open a file [path]", open).with_aliases(&["o"]),
    );
    registry.register(
        Command::new("help", "List available commands", help).with_aliases(&["h", "?"]),
    );
    registry.register(
        Command::new("settings", "Edit display colors", |ctx, _| {
            let styles = ctx.config.styles;
            ctx.model.state_mut().begin_settings(styles);
            Ok(())
        })
        .with_aliases(&["config"]),
    );
}

/// Tokens after the command name re-joined into a path, so names with
/// spaces survive whitespace tokenization.
fn path_arg(args: &[String]) -> Option<PathBuf> {
    if args.is_empty() {
        None
    } else {
        Some(PathBuf::from(args.join(" ")))
    }
}

fn save(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let target = path_arg(args);
    if target.is_none() && ctx.model.state().file_name.is_none() {
        ctx.model.state_mut().open_prompt(PendingFileOp::Save);
        return Ok(());
    }
    save_to(ctx, target)
}

pub(crate) fn save_to(
    ctx: &mut CommandContext<'_>,
    target: Option<PathBuf>,
) -> Result<(), CommandError> {
    let path = write_file(ctx.model.state_mut(), target.as_deref())?;
    let lines = ctx.model.state().document.line_count();
    ctx.info(format!("Saved {} ({lines} lines)", path.display()));
    Ok(())
}

fn open(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    match path_arg(args) {
        Some(path) => open_path(ctx, path),
        None => {
            ctx.model.state_mut().open_prompt(PendingFileOp::Open);
            Ok(())
        }
    }
}

pub(crate) fn open_path(ctx: &mut CommandContext<'_>, path: PathBuf) -> Result<(), CommandError> {
    let lines = open_into(ctx.model, &path)?;
    ctx.info(format!("Opened {} ({lines} lines)", path.display()));
    Ok(())
}

fn help(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    let names = ctx
        .registry
        .describe()
        .into_iter()
        .map(|c| {
            if c.aliases.is_empty() {
                c.name
            } else {
                format!("{}|{}", c.name, c.aliases.join("|"))
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    ctx.info(format!("Commands: {names}"));
    Ok(())
}
