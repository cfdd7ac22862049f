//! Command line tokenization.
//!
//! The line is split on whitespace; the first token is the command name
//! (lower-cased, so `QUIT` resolves like `quit`) and the remaining tokens are
//! passed through untouched as arguments. Pure classification, no side effects.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

/// `None` for a blank line.
pub fn parse_command_line(raw: &str) -> Option<CommandLine> {
    let mut tokens = raw.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    Some(CommandLine {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}
