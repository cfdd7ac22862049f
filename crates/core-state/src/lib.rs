//! Editor state: document, mode, transient input accumulators and file metadata.
//!
//! Cursor and scroll state live in `core-model::View`; this crate stays
//! document-centric. Transient state belonging to a mode (the command-line
//! accumulator, an open filename prompt, the settings session) is dropped by
//! `EditorState::enter_mode` whenever that mode is left.

use core_config::{SettingSlot, StyleSet};
use core_text::Document;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod line_ending;
pub use line_ending::{LineEnding, NormalizedText, denormalize, normalize_line_endings};

/// How long transient messages stay on the status row.
pub const EPHEMERAL_TTL: Duration = Duration::from_secs(4);

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Command line accumulator; the startup mode.
    #[default]
    Command,
    /// Text entry into the document.
    Insert,
    /// Style editor with live preview.
    Settings,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Command => "COMMAND",
            Mode::Insert => "INSERT",
            Mode::Settings => "SETTINGS",
        }
    }
}

/// Raw text typed in Command mode, tokenized on Enter.
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Remove the last char; no-op when empty.
    pub fn backspace(&mut self) {
        self.buf.pop();
    }
    /// Return the accumulated text and reset.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

/// File operation waiting for a filename typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingFileOp {
    Save,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub op: PendingFileOp,
    pub input: String,
}

impl PromptState {
    pub fn new(op: PendingFileOp) -> Self {
        Self {
            op,
            input: String::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.op {
            PendingFileOp::Save => "Save as: ",
            PendingFileOp::Open => "Open file: ",
        }
    }
}

/// Settings mode session: the selected slot plus the styles captured on
/// entry so Esc can discard the live preview.
#[derive(Debug, Clone)]
pub struct SettingsSession {
    selected: usize,
    original: StyleSet,
}

impl SettingsSession {
    pub fn new(original: StyleSet) -> Self {
        Self {
            selected: 0,
            original,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn slot(&self) -> SettingSlot {
        SettingSlot::ALL[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SettingSlot::ALL.len();
    }

    pub fn select_prev(&mut self) {
        let n = SettingSlot::ALL.len();
        self.selected = (self.selected + n - 1) % n;
    }

    pub fn original(&self) -> &StyleSet {
        &self.original
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

/// Transient status message.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub kind: MessageKind,
    pub expires_at: Instant,
}

/// Top-level editor state container.
pub struct EditorState {
    pub document: Document,
    pub mode: Mode,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    pub command_line: CommandLineState,
    pub prompt: Option<PromptState>,
    pub settings: Option<SettingsSession>,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub original_line_ending: LineEnding,
    pub had_trailing_newline: bool,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            mode: Mode::Command,
            file_name: None,
            dirty: false,
            command_line: CommandLineState::default(),
            prompt: None,
            settings: None,
            ephemeral_status: None,
            original_line_ending: LineEnding::Lf,
            had_trailing_newline: false,
        }
    }

    /// Switch mode, resetting the transient state of the mode being left.
    pub fn enter_mode(&mut self, mode: Mode) {
        let from = self.mode;
        if from == mode {
            return;
        }
        match from {
            Mode::Command => {
                self.command_line.clear();
                self.prompt = None;
            }
            Mode::Settings => self.settings = None,
            Mode::Insert => {}
        }
        self.mode = mode;
        tracing::debug!(target: "state.mode", from = from.label(), to = mode.label(), "mode_change");
    }

    /// Enter Settings with a session snapshotting `current` styles.
    pub fn begin_settings(&mut self, current: StyleSet) {
        self.enter_mode(Mode::Settings);
        self.settings = Some(SettingsSession::new(current));
    }

    pub fn open_prompt(&mut self, op: PendingFileOp) {
        self.command_line.clear();
        self.prompt = Some(PromptState::new(op));
    }

    /// Set an informational message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.set_message(msg.into(), MessageKind::Info, ttl);
    }

    /// Set an error message shown with the error style.
    pub fn set_error<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.set_message(msg.into(), MessageKind::Error, ttl);
    }

    fn set_message(&mut self, text: String, kind: MessageKind, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text,
            kind,
            expires_at: Instant::now() + ttl,
        });
    }

    /// Tick ephemeral status; returns true if message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        if let Some(m) = &self.ephemeral_status
            && Instant::now() >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    /// Replace the document after a successful open.
    pub fn replace_document(
        &mut self,
        document: Document,
        file_name: PathBuf,
        line_ending: LineEnding,
        had_trailing_newline: bool,
    ) {
        self.document = document;
        self.file_name = Some(file_name);
        self.original_line_ending = line_ending;
        self.had_trailing_newline = had_trailing_newline;
        self.dirty = false;
    }

    /// Display name for the status bar.
    pub fn display_name(&self) -> String {
        self.file_name
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }
}
