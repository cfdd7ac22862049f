//! File IO for `open` and `save`.
//!
//! Files are normalized to LF on read; the original line-ending style and
//! trailing newline presence are recorded on the state and restored on write.

use crate::registry::CommandError;
use core_model::EditorModel;
use core_state::{EditorState, LineEnding, denormalize, normalize_line_endings};
use core_text::Document;
use std::path::{Path, PathBuf};

/// A file read and normalized, ready to replace the current document.
#[derive(Debug)]
pub struct OpenedFile {
    pub document: Document,
    pub path: PathBuf,
    pub line_ending: LineEnding,
    pub had_trailing_newline: bool,
    pub mixed_line_endings: bool,
}

pub fn read_file(path: &Path) -> Result<OpenedFile, CommandError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
        CommandError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let norm = normalize_line_endings(&content);
    // The final separator is file metadata, not an extra empty line.
    let body = if norm.had_trailing_newline {
        &norm.normalized[..norm.normalized.len() - 1]
    } else {
        norm.normalized.as_str()
    };
    if norm.mixed {
        tracing::warn!(target: "io", path = %path.display(), "mixed_line_endings_detected");
    }
    Ok(OpenedFile {
        document: Document::from_text(body),
        path: path.to_path_buf(),
        line_ending: norm.original,
        had_trailing_newline: norm.had_trailing_newline,
        mixed_line_endings: norm.mixed,
    })
}

/// Read `path` and replace the model's document with it. Returns the line count.
pub fn open_into(model: &mut EditorModel, path: &Path) -> Result<usize, CommandError> {
    let opened = read_file(path)?;
    let lines = opened.document.line_count();
    model.state_mut().replace_document(
        opened.document,
        opened.path,
        opened.line_ending,
        opened.had_trailing_newline,
    );
    model.reset_cursor();
    tracing::info!(target: "io", path = %path.display(), lines, "file_opened");
    Ok(lines)
}

/// Write the document to `target`, or to the state's file name when `None`.
/// A successful write binds the state to the written path and clears `dirty`.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> Result<PathBuf, CommandError> {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None => state.file_name.clone().ok_or(CommandError::NoFilename)?,
    };
    let content = denormalize(
        state.document.lines(),
        state.original_line_ending,
        state.had_trailing_newline,
    );
    std::fs::write(&path, content.as_bytes()).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        CommandError::Io {
            path: path.clone(),
            source,
        }
    })?;
    state.file_name = Some(path.clone());
    state.dirty = false;
    tracing::info!(target: "io", path = %path.display(), bytes = content.len(), "file_written");
    Ok(path)
}
