#![allow(dead_code)] // Shared across integration test binaries; each uses a subset.

use core_actions::{CommandRegistry, DispatchResult, dispatch, register_builtins, translate_key};
use core_config::{Config, StyleSet};
use core_events::{KeyCode, KeyEvent};
use core_model::EditorModel;
use core_state::EditorState;
use core_text::Document;

/// Drives the editor purely through key events, the way the binary does.
pub struct Session {
    pub model: EditorModel,
    pub registry: CommandRegistry,
    pub config: Config,
    pub quit: bool,
}

impl Session {
    pub fn new(lines: &[&str]) -> Self {
        Self::with_config(lines, Config::in_memory(StyleSet::default()))
    }

    pub fn with_config(lines: &[&str], config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        let doc = Document::from_lines(lines.iter().copied());
        Self {
            model: EditorModel::new(EditorState::new(doc), 10, 40),
            registry,
            config,
            quit: false,
        }
    }

    pub fn key(&mut self, key: KeyEvent) -> Option<DispatchResult> {
        let st = self.model.state();
        let action = translate_key(st.mode, st.prompt.is_some(), &key)?;
        let r = dispatch(action, &mut self.model, &self.registry, &mut self.config);
        self.quit |= r.quit;
        Some(r)
    }

    pub fn press(&mut self, code: KeyCode) -> Option<DispatchResult> {
        self.key(KeyEvent::plain(code))
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(KeyEvent::char(ch));
        }
    }

    /// Type a command line and press Enter.
    pub fn command(&mut self, line: &str) -> Option<DispatchResult> {
        self.type_text(line);
        self.press(KeyCode::Enter)
    }

    pub fn lines(&self) -> Vec<String> {
        self.model.state().document.lines()
    }

    pub fn message(&self) -> Option<&str> {
        self.model
            .state()
            .ephemeral_status
            .as_ref()
            .map(|m| m.text.as_str())
    }
}
