//! Plugins bundled with the binary.

use core_actions::{Command, CommandContext, CommandError};
use core_plugin::{HostContext, Plugin, PluginError, StaticLoader};
use core_text::Position;
use tracing::debug;

/// Loader over every plugin compiled into `quire`.
pub(crate) fn bundled_plugins() -> StaticLoader {
    StaticLoader::new().with(|| Box::new(StatsPlugin::default()))
}

/// Document statistics and line jumps.
#[derive(Debug, Default)]
pub(crate) struct StatsPlugin {
    host_version: Option<String>,
}

impl Plugin for StatsPlugin {
    fn name(&self) -> &str {
        "stats"
    }

    fn commands(&self) -> Vec<Command> {
        vec![
            Command::new("stats", "Count lines, words and chars", stats).with_aliases(&["wc"]),
            Command::new("goto", "Jump to line <n>", goto).with_aliases(&["g"]),
        ]
    }

    fn initialize(&mut self, ctx: &mut HostContext<'_>) -> Result<(), PluginError> {
        for name in ["stats", "wc", "goto", "g"] {
            if ctx.registry().contains(name) {
                debug!(target: "plugin.stats", name, "overriding_existing_command");
            }
        }
        self.host_version = Some(ctx.version().to_string());
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), PluginError> {
        debug!(target: "plugin.stats", host = ?self.host_version, "cleanup");
        Ok(())
    }
}

fn stats(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
    let doc = &ctx.model.state().document;
    let lines = doc.line_count();
    let words: usize = doc
        .lines()
        .iter()
        .map(|l| l.split_whitespace().count())
        .sum();
    let chars = doc.char_count();
    ctx.info(format!("{lines} lines, {words} words, {chars} chars"));
    Ok(())
}

fn goto(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
    let [arg] = args else {
        return Err(CommandError::InvalidArgument("usage: goto <line>".into()));
    };
    let line: usize = arg
        .parse()
        .map_err(|_| CommandError::InvalidArgument(format!("not a line number: {arg}")))?;
    // 1-based; anything past the end lands on the last line.
    ctx.model.move_to(Position::new(line.saturating_sub(1), 0));
    Ok(())
}
