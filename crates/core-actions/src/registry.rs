//! Command registry: named commands with aliases.
//!
//! Every name and alias is a key in one map pointing at a shared `Command`.
//! Registering a key that already exists replaces the previous binding
//! (last writer wins); the earlier command stays reachable through any of
//! its other keys.

use core_config::Config;
use core_model::{EditError, EditorModel};
use core_state::EPHEMERAL_TTL;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    NotFound(String),
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file name")]
    NoFilename,
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("plugin: {0}")]
    Plugin(String),
}

/// What a command may touch while it runs.
pub struct CommandContext<'a> {
    pub model: &'a mut EditorModel,
    pub config: &'a mut Config,
    pub registry: &'a CommandRegistry,
    quit: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        model: &'a mut EditorModel,
        config: &'a mut Config,
        registry: &'a CommandRegistry,
    ) -> Self {
        Self {
            model,
            config,
            registry,
            quit: false,
        }
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
    /// Show a transient informational message.
    pub fn info<S: Into<String>>(&mut self, msg: S) {
        self.model.state_mut().set_ephemeral(msg, EPHEMERAL_TTL);
    }
}

pub type CommandHandler =
    Rc<dyn Fn(&mut CommandContext<'_>, &[String]) -> Result<(), CommandError>>;

#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    handler: CommandHandler,
}

impl Command {
    pub fn new<F>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[String]) -> Result<(), CommandError> + 'static,
    {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: description.to_string(),
            handler: Rc::new(handler),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn run(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        (self.handler)(ctx, args)
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Help listing entry: canonical name, aliases that still resolve to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Rc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the command's name and aliases, replacing existing bindings.
    pub fn register(&mut self, command: Command) {
        let command = Rc::new(command);
        for key in command.keys() {
            if let Some(prev) = self.commands.insert(key.to_string(), command.clone())
                && prev.name != command.name
            {
                tracing::debug!(
                    target: "actions.command",
                    key,
                    previous = %prev.name,
                    replacement = %command.name,
                    "command_overwritten"
                );
            }
        }
        tracing::trace!(target: "actions.command", name = %command.name, aliases = command.aliases.len(), "command_registered");
    }

    pub fn lookup(&self, name: &str) -> Result<&Command, CommandError> {
        self.commands
            .get(name)
            .map(Rc::as_ref)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn execute(
        &self,
        name: &str,
        ctx: &mut CommandContext<'_>,
        args: &[String],
    ) -> Result<(), CommandError> {
        let command = self.lookup(name)?;
        tracing::debug!(target: "actions.command", name, resolved = %command.name, args = args.len(), "execute");
        command.run(ctx, args)
    }

    /// Distinct canonical names of every reachable command, sorted.
    pub fn list_names(&self) -> Vec<String> {
        self.describe().into_iter().map(|c| c.name).collect()
    }

    /// Help data for every reachable command, sorted by canonical name.
    pub fn describe(&self) -> Vec<CommandInfo> {
        let mut by_name: BTreeMap<&str, CommandInfo> = BTreeMap::new();
        for (key, cmd) in &self.commands {
            let entry = by_name
                .entry(cmd.name.as_str())
                .or_insert_with(|| CommandInfo {
                    name: cmd.name.clone(),
                    aliases: Vec::new(),
                    description: cmd.description.clone(),
                });
            if key != &cmd.name {
                entry.aliases.push(key.clone());
            }
        }
        by_name
            .into_values()
            .map(|mut info| {
                info.aliases.sort();
                info
            })
            .collect()
    }

    /// Number of distinct commands.
    pub fn len(&self) -> usize {
        self.describe().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
