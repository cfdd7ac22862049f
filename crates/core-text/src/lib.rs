//! Rope-backed, line-oriented document storage.
//!
//! A `Document` is an ordered sequence of lines, each an ordered sequence of
//! Unicode scalar values. Lines are separated by `'\n'` inside a
//! `ropey::Rope`; ropey is built without Unicode line-break recognition so no
//! other character ever starts a new line. Because an empty rope still
//! reports one line, the "at least one line" invariant holds structurally.
//!
//! Columns are char indices (not bytes, not graphemes). The document performs
//! bounds checks and nothing else; keeping the cursor valid is the view
//! controller's job.

use ropey::Rope;
use thiserror::Error;

/// A position inside a document expressed as (line index, char column).
///
/// `col` may equal the line length, meaning "after the last character".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub const fn origin() -> Self {
        Self { line: 0, col: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("position {line}:{col} is outside the document")]
    OutOfBounds { line: usize, col: usize },
    #[error("line breaks must be inserted with split_line")]
    LineBreak,
}

#[derive(Clone, Default)]
pub struct Document {
    rope: Rope,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("lines", &self.line_count())
            .field("chars", &self.rope.len_chars())
            .finish()
    }
}

impl Document {
    /// Empty document: exactly one empty line.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build from LF-separated text. A trailing `'\n'` yields a final empty line.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc = Self::new();
        doc.replace_all(lines);
        doc
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Char length of a line excluding its separator; 0 for an out-of-range index.
    pub fn line_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(idx);
        let n = line.len_chars();
        if n > 0 && line.char(n - 1) == '\n' {
            n - 1
        } else {
            n
        }
    }

    pub fn char_at(&self, line: usize, col: usize) -> Option<char> {
        if line >= self.line_count() || col >= self.line_len(line) {
            return None;
        }
        Some(self.rope.char(self.rope.line_to_char(line) + col))
    }

    /// Line content without its separator.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(idx).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|i| self.line(i))
            .collect()
    }

    /// Total number of chars across all lines, separators excluded.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars() - (self.line_count() - 1)
    }

    /// Replace the whole content. An empty iterator leaves one empty line.
    pub fn replace_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (i, l) in lines.into_iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(l.as_ref());
        }
        self.rope = Rope::from_str(&text);
    }

    /// Content with lines joined by `'\n'` (no trailing separator).
    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.line < self.line_count() && pos.col <= self.line_len(pos.line)
    }

    fn char_index(&self, pos: Position) -> Result<usize, TextError> {
        if !self.contains(pos) {
            return Err(TextError::OutOfBounds {
                line: pos.line,
                col: pos.col,
            });
        }
        Ok(self.rope.line_to_char(pos.line) + pos.col)
    }

    /// Insert `ch` immediately before `pos.col` on `pos.line`.
    pub fn insert_char(&mut self, pos: Position, ch: char) -> Result<(), TextError> {
        if ch == '\n' {
            return Err(TextError::LineBreak);
        }
        let idx = self.char_index(pos)?;
        self.rope.insert_char(idx, ch);
        Ok(())
    }

    /// Split `pos.line` at `pos.col`; the right part becomes line `pos.line + 1`.
    pub fn split_line(&mut self, pos: Position) -> Result<(), TextError> {
        let idx = self.char_index(pos)?;
        self.rope.insert_char(idx, '\n');
        Ok(())
    }

    /// Append line `line` to line `line - 1`. Returns the previous line's
    /// length before the join.
    pub fn join_with_previous(&mut self, line: usize) -> Result<usize, TextError> {
        if line == 0 || line >= self.line_count() {
            return Err(TextError::OutOfBounds { line, col: 0 });
        }
        let prev_len = self.line_len(line - 1);
        // Separator sits right before the first char of `line`.
        let sep = self.rope.line_to_char(line) - 1;
        self.rope.remove(sep..sep + 1);
        Ok(prev_len)
    }

    /// Remove and return the char at `pos` (which must not be end-of-line).
    pub fn remove_char(&mut self, pos: Position) -> Result<char, TextError> {
        if pos.line >= self.line_count() || pos.col >= self.line_len(pos.line) {
            return Err(TextError::OutOfBounds {
                line: pos.line,
                col: pos.col,
            });
        }
        let idx = self.rope.line_to_char(pos.line) + pos.col;
        let ch = self.rope.char(idx);
        self.rope.remove(idx..idx + 1);
        Ok(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_has_one_empty_line() {
        let d = Document::new();
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.line_len(0), 0);
        assert_eq!(d.line(0).as_deref(), Some(""));
        let mut d = Document::from_lines(["x"]);
        d.replace_all(Vec::<String>::new());
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.lines(), vec![String::new()]);
    }

    #[test]
    fn from_text_and_accessors() {
        let d = Document::from_text("hello\nwörld\n");
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.line_len(0), 5);
        assert_eq!(d.line_len(1), 5);
        assert_eq!(d.line_len(2), 0);
        assert_eq!(d.char_at(1, 1), Some('ö'));
        assert_eq!(d.char_at(1, 5), None);
        assert_eq!(d.char_at(9, 0), None);
        assert_eq!(d.line_len(9), 0);
        assert_eq!(d.char_count(), 10);
    }

    #[test]
    fn carriage_return_is_not_a_line_break() {
        let d = Document::from_text("a\rb\u{2028}c");
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.line_len(0), 5);
    }

    #[test]
    fn insert_split_join_remove() {
        let mut d = Document::from_lines(["hello"]);
        d.insert_char(Position::new(0, 5), '!').unwrap();
        assert_eq!(d.lines(), vec!["hello!"]);
        d.split_line(Position::new(0, 2)).unwrap();
        assert_eq!(d.lines(), vec!["he", "llo!"]);
        let prev = d.join_with_previous(1).unwrap();
        assert_eq!(prev, 2);
        assert_eq!(d.lines(), vec!["hello!"]);
        assert_eq!(d.remove_char(Position::new(0, 5)).unwrap(), '!');
        assert_eq!(d.to_text(), "hello");
    }

    #[test]
    fn bounds_are_checked() {
        let mut d = Document::from_lines(["ab", "c"]);
        assert_eq!(
            d.insert_char(Position::new(0, 3), 'x'),
            Err(TextError::OutOfBounds { line: 0, col: 3 })
        );
        assert!(d.split_line(Position::new(2, 0)).is_err());
        assert!(d.join_with_previous(0).is_err());
        assert!(d.join_with_previous(2).is_err());
        assert!(d.remove_char(Position::new(1, 1)).is_err());
        assert_eq!(d.insert_char(Position::new(0, 0), '\n'), Err(TextError::LineBreak));
        assert_eq!(d.lines(), vec!["ab", "c"]);
    }

    #[test]
    fn split_at_line_end_creates_empty_line() {
        let mut d = Document::from_lines(["ab", "cd"]);
        d.split_line(Position::new(1, 2)).unwrap();
        assert_eq!(d.lines(), vec!["ab", "cd", ""]);
        assert_eq!(d.to_text(), "ab\ncd\n");
    }

    #[test]
    fn position_clamp() {
        let d = Document::from_lines(["abc", "d"]);
        let mut p = Position::new(5, 9);
        p.clamp_to(d.line_count(), |l| d.line_len(l));
        assert_eq!(p, Position::new(1, 1));
    }
}
