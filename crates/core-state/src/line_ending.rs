//! Line ending detection and LF normalization for file IO.

/// Line ending style detected from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Result of normalizing line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub normalized: String,         // LF-only content
    pub original: LineEnding,       // majority style
    pub had_trailing_newline: bool, // original trailing newline presence
    pub mixed: bool,                // more than one style encountered
}

/// Rewrite CRLF and lone CR to LF, recording the majority style.
/// Ties resolve with precedence CRLF > LF > CR.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                out.push('\n');
            }
            '\r' => {
                cr += 1;
                out.push('\n');
            }
            '\n' => {
                lf += 1;
                out.push('\n');
            }
            c => out.push(c),
        }
    }
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let styles_seen = [crlf, lf, cr].iter().filter(|c| **c > 0).count();
    NormalizedText {
        had_trailing_newline: out.ends_with('\n'),
        normalized: out,
        original,
        mixed: styles_seen > 1,
    }
}

/// Join `lines` with `ending`, appending a final separator when requested.
pub fn denormalize<I, S>(lines: I, ending: LineEnding, trailing_newline: bool) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            out.push_str(ending.as_str());
        }
        out.push_str(line.as_ref());
    }
    if trailing_newline {
        out.push_str(ending.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_crlf() {
        let n = normalize_line_endings("a\r\nb\r\n");
        assert_eq!(n.normalized, "a\nb\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(n.had_trailing_newline);
        assert!(!n.mixed);
    }

    #[test]
    fn normalize_cr() {
        let n = normalize_line_endings("😀\r😀\r");
        assert_eq!(n.normalized, "😀\n😀\n");
        assert_eq!(n.original, LineEnding::Cr);
    }

    #[test]
    fn normalize_mixed_majority() {
        let n = normalize_line_endings("α\r\nβ\nγ\r\n");
        assert_eq!(n.normalized, "α\nβ\nγ\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(n.mixed);
    }

    #[test]
    fn no_newlines_defaults_to_lf() {
        let n = normalize_line_endings("plain");
        assert_eq!(n.original, LineEnding::Lf);
        assert!(!n.had_trailing_newline);
        assert!(!n.mixed);
    }

    #[test]
    fn denormalize_restores_style() {
        let n = normalize_line_endings("a\r\nb\r\n");
        let body = n.normalized.strip_suffix('\n').unwrap_or(&n.normalized);
        let back = denormalize(body.split('\n'), n.original, n.had_trailing_newline);
        assert_eq!(back, "a\r\nb\r\n");
        assert_eq!(denormalize(["x"], LineEnding::Lf, false), "x");
    }
}
