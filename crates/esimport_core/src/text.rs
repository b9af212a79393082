//! Source text and span types.
//!
//! Offsets are measured in `char`s from the start of the source, which is the
//! unit the scanner advances by. Byte offsets are derived on demand for
//! consumers that need them (diagnostic rendering).

use std::fmt;

/// A position in source text, measured in characters from the start.
pub type TextPos = usize;

/// How many characters before an error position the context window shows.
pub const CONTEXT_WINDOW: usize = 10;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    /// The char offset where this span starts.
    pub start: TextPos,
    /// The length of this span in chars.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Immutable, char-indexed view of one input text.
#[derive(Debug, Clone, Default)]
pub struct SourceText {
    chars: Vec<char>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Number of chars in the text.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// The char at `pos`, or `None` past the end.
    #[inline]
    pub fn char_at(&self, pos: TextPos) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Collect the chars in `[start, end)` into a `String`, clamped to the text.
    pub fn slice(&self, start: TextPos, end: TextPos) -> String {
        let e = end.min(self.chars.len());
        let s = start.min(e);
        self.chars[s..e].iter().collect()
    }

    /// Whether the text at `pos` starts with `pattern`.
    pub fn starts_with_at(&self, pos: TextPos, pattern: &str) -> bool {
        let mut offset = pos;
        for expected in pattern.chars() {
            if self.char_at(offset) != Some(expected) {
                return false;
            }
            offset += 1;
        }
        true
    }

    /// UTF-8 byte offset of a char position.
    pub fn byte_offset(&self, pos: TextPos) -> usize {
        self.chars[..pos.min(self.chars.len())]
            .iter()
            .map(|c| c.len_utf8())
            .sum()
    }

    /// Render the diagnostic context window for `pos`: up to
    /// [`CONTEXT_WINDOW`] chars before the position plus the char at it, and a
    /// caret line pointing at that char. Trimmed windows start with `...`.
    pub fn context_window(&self, pos: TextPos) -> String {
        let pos = pos.min(self.chars.len());
        let from = pos.saturating_sub(CONTEXT_WINDOW);
        let trimmed = from > 0;
        let padding = if trimmed { 3 } else { 0 } + (pos - from);
        let snippet: String = self
            .slice(from, pos + 1)
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        format!(
            "{}{}\n{}^",
            if trimmed { "..." } else { "" },
            snippet,
            " ".repeat(padding)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span() {
        let span = TextSpan::new(5, 10);
        assert_eq!(span.end(), 15);
        assert_eq!(span.to_string(), "[5, 15)");
        assert_eq!(format!("{:?}", span), "5..15");
    }

    #[test]
    fn test_text_span_from_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span.start, 5);
        assert_eq!(span.length, 10);
        assert!(TextSpan::empty(3).is_empty());
    }

    #[test]
    fn test_slice_is_clamped() {
        let text = SourceText::new("import");
        assert_eq!(text.slice(0, 3), "imp");
        assert_eq!(text.slice(4, 100), "rt");
        assert_eq!(text.slice(10, 12), "");
    }

    #[test]
    fn test_byte_offset_counts_utf8_width() {
        let text = SourceText::new("aé\"x");
        assert_eq!(text.byte_offset(0), 0);
        assert_eq!(text.byte_offset(2), 3);
        assert_eq!(text.byte_offset(99), 5);
    }

    #[test]
    fn test_starts_with_at() {
        let text = SourceText::new("a /* b */");
        assert!(text.starts_with_at(2, "/*"));
        assert!(!text.starts_with_at(8, "*/"));
    }

    #[test]
    fn test_context_window_short_prefix() {
        let text = SourceText::new("ab#cd");
        assert_eq!(text.context_window(2), "ab#\n  ^");
    }

    #[test]
    fn test_context_window_trimmed_prefix() {
        let text = SourceText::new("import x from #");
        let window = text.context_window(14);
        assert_eq!(window, format!("...rt x from #\n{}^", " ".repeat(13)));
    }
}
