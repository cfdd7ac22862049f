//! Persisted style configuration.
//!
//! The editor draws five display roles (main text, status bar, messages, the
//! line-number gutter and errors), each with a foreground/background color.
//! They are stored as a flat TOML document of ten keys:
//!
//! ```toml
//! fg_color = "white"
//! bg_color = "black"
//! status_fg_color = "black"
//! # ...
//! ```
//!
//! A missing file is created with defaults on first run (`load_or_init`).
//! A file that cannot be read or parsed falls back to defaults with a
//! warning; missing keys take their default individually.

use anyhow::{Context, Result};
pub use core_terminal::{CellStyle, Color};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "quire.toml";

/// Fixed cycling order used by the settings screen.
pub const PALETTE: [Color; 16] = [
    Color::Black,
    Color::DarkGrey,
    Color::Grey,
    Color::White,
    Color::DarkRed,
    Color::Red,
    Color::DarkGreen,
    Color::Green,
    Color::DarkYellow,
    Color::Yellow,
    Color::DarkBlue,
    Color::Blue,
    Color::DarkMagenta,
    Color::Magenta,
    Color::DarkCyan,
    Color::Cyan,
];

/// Step `c` through `PALETTE` by `delta` positions, wrapping at both ends.
pub fn palette_step(c: Color, delta: isize) -> Color {
    let len = PALETTE.len() as isize;
    let idx = PALETTE.iter().position(|p| *p == c).unwrap_or(0) as isize;
    PALETTE[(idx + delta).rem_euclid(len) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Main,
    Status,
    Message,
    LineCount,
    Error,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Main,
        Role::Status,
        Role::Message,
        Role::LineCount,
        Role::Error,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::Main => "Main",
            Role::Status => "Status bar",
            Role::Message => "Message",
            Role::LineCount => "Line numbers",
            Role::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub const fn style(self) -> CellStyle {
        CellStyle::new(self.fg, self.bg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSet {
    pub main: ColorPair,
    pub status: ColorPair,
    pub message: ColorPair,
    pub line_count: ColorPair,
    pub error: ColorPair,
}

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            main: ColorPair::new(Color::White, Color::Black),
            status: ColorPair::new(Color::Black, Color::White),
            message: ColorPair::new(Color::Black, Color::White),
            line_count: ColorPair::new(Color::Blue, Color::White),
            error: ColorPair::new(Color::Red, Color::Black),
        }
    }
}

impl StyleSet {
    pub fn get(&self, role: Role) -> ColorPair {
        match role {
            Role::Main => self.main,
            Role::Status => self.status,
            Role::Message => self.message,
            Role::LineCount => self.line_count,
            Role::Error => self.error,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut ColorPair {
        match role {
            Role::Main => &mut self.main,
            Role::Status => &mut self.status,
            Role::Message => &mut self.message,
            Role::LineCount => &mut self.line_count,
            Role::Error => &mut self.error,
        }
    }

    pub fn style(&self, role: Role) -> CellStyle {
        self.get(role).style()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Foreground,
    Background,
}

/// One editable color: a role and which half of its pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingSlot {
    pub role: Role,
    pub channel: Channel,
}

impl SettingSlot {
    pub const fn new(role: Role, channel: Channel) -> Self {
        Self { role, channel }
    }

    /// Display order of the settings screen.
    pub const ALL: [SettingSlot; 10] = [
        SettingSlot::new(Role::Main, Channel::Foreground),
        SettingSlot::new(Role::Main, Channel::Background),
        SettingSlot::new(Role::Status, Channel::Foreground),
        SettingSlot::new(Role::Status, Channel::Background),
        SettingSlot::new(Role::Message, Channel::Foreground),
        SettingSlot::new(Role::Message, Channel::Background),
        SettingSlot::new(Role::LineCount, Channel::Foreground),
        SettingSlot::new(Role::LineCount, Channel::Background),
        SettingSlot::new(Role::Error, Channel::Foreground),
        SettingSlot::new(Role::Error, Channel::Background),
    ];

    pub fn label(self) -> String {
        let half = match self.channel {
            Channel::Foreground => "foreground",
            Channel::Background => "background",
        };
        format!("{} {}", self.role.label(), half)
    }

    /// Key of this slot in the persisted file.
    pub fn key(self) -> &'static str {
        match (self.role, self.channel) {
            (Role::Main, Channel::Foreground) => "fg_color",
            (Role::Main, Channel::Background) => "bg_color",
            (Role::Status, Channel::Foreground) => "status_fg_color",
            (Role::Status, Channel::Background) => "status_bg_color",
            (Role::Message, Channel::Foreground) => "msg_fg_color",
            (Role::Message, Channel::Background) => "msg_bg_color",
            (Role::LineCount, Channel::Foreground) => "line_count_fg_color",
            (Role::LineCount, Channel::Background) => "line_count_bg_color",
            (Role::Error, Channel::Foreground) => "error_fg_color",
            (Role::Error, Channel::Background) => "error_bg_color",
        }
    }

    pub fn get(self, styles: &StyleSet) -> Color {
        let pair = styles.get(self.role);
        match self.channel {
            Channel::Foreground => pair.fg,
            Channel::Background => pair.bg,
        }
    }

    pub fn set(self, styles: &mut StyleSet, color: Color) {
        let pair = styles.get_mut(self.role);
        match self.channel {
            Channel::Foreground => pair.fg = color,
            Channel::Background => pair.bg = color,
        }
    }

    /// Move this slot's color `delta` steps through the palette; returns the new color.
    pub fn cycle(self, styles: &mut StyleSet, delta: isize) -> Color {
        let next = palette_step(self.get(styles), delta);
        self.set(styles, next);
        next
    }
}

/// On-disk representation: ten flat keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleFile {
    pub fg_color: Color,
    pub bg_color: Color,
    pub status_fg_color: Color,
    pub status_bg_color: Color,
    pub msg_fg_color: Color,
    pub msg_bg_color: Color,
    pub line_count_fg_color: Color,
    pub line_count_bg_color: Color,
    pub error_fg_color: Color,
    pub error_bg_color: Color,
}

impl Default for StyleFile {
    fn default() -> Self {
        StyleSet::default().into()
    }
}

impl From<StyleSet> for StyleFile {
    fn from(s: StyleSet) -> Self {
        Self {
            fg_color: s.main.fg,
            bg_color: s.main.bg,
            status_fg_color: s.status.fg,
            status_bg_color: s.status.bg,
            msg_fg_color: s.message.fg,
            msg_bg_color: s.message.bg,
            line_count_fg_color: s.line_count.fg,
            line_count_bg_color: s.line_count.bg,
            error_fg_color: s.error.fg,
            error_bg_color: s.error.bg,
        }
    }
}

impl From<StyleFile> for StyleSet {
    fn from(f: StyleFile) -> Self {
        Self {
            main: ColorPair::new(f.fg_color, f.bg_color),
            status: ColorPair::new(f.status_fg_color, f.status_bg_color),
            message: ColorPair::new(f.msg_fg_color, f.msg_bg_color),
            line_count: ColorPair::new(f.line_count_fg_color, f.line_count_bg_color),
            error: ColorPair::new(f.error_fg_color, f.error_bg_color),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backing file; `None` keeps the configuration in memory only.
    path: Option<PathBuf>,
    pub styles: StyleSet,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quire").join(CONFIG_FILE_NAME);
    }
    local
}

/// Read configuration from `path` (or the discovered path). Missing,
/// unreadable or malformed files yield defaults bound to that path.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            if path.exists() {
                warn!(target: "config", path = %path.display(), error = %e, "config_unreadable");
            }
            return Ok(Config::with_path(path));
        }
    };
    match toml::from_str::<StyleFile>(&content) {
        Ok(file) => {
            debug!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                styles: file.into(),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::with_path(path))
        }
    }
}

/// Like `load_from`, but a missing file is created with the defaults.
pub fn load_or_init(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if path.exists() {
        return load_from(Some(path));
    }
    let cfg = Config::with_path(path);
    cfg.save()?;
    info!(target: "config", path = ?cfg.path(), "config_initialized");
    Ok(cfg)
}

impl Config {
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            styles: StyleSet::default(),
        }
    }

    /// Configuration that is never written to disk.
    pub fn in_memory(styles: StyleSet) -> Self {
        Self {
            path: None,
            styles,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&StyleFile::from(self.styles))?)
    }

    /// Persist the current styles, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            debug!(target: "config", "config_save_skipped_in_memory");
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let text = self.to_toml()?;
        fs::write(path, text).with_context(|| format!("writing config {}", path.display()))?;
        info!(target: "config", path = %path.display(), "config_saved");
        Ok(())
    }
}
