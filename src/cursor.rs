// Shared parse position, threaded by reference through every parser node.
//
// The cursor is the only mutable state of a parse. Besides the raw
// position it exposes per-line views (`current_line` / `next_line`) that
// container blocks rewrite in place to strip their prefix markers
// (`"> "`, list indentation) before delegating to children — that
// rewriting is what makes block nesting work without re-scanning text,
// so `column` is signed and transiently dips below zero when a prefix
// is cut out from under it.

use crate::media::RedditData;

pub(crate) struct Cursor<'a> {
    /// Full (pre-trimmed) markdown source. Never changes during a parse.
    text: &'a str,
    /// `text` split into lines, each retaining its trailing newline.
    all_lines: Vec<String>,
    /// Current line index into `all_lines`.
    pub row: usize,
    /// Column within `current_line`, in characters. Container blocks
    /// decrement this when they strip prefix markers.
    pub column: i32,
    /// Characters consumed so far.
    char_index: usize,
    /// Byte offset of the current character in `text`.
    byte_index: usize,
    /// Total character count of `text`.
    total_chars: usize,
    /// View of the current line; container blocks may shorten it.
    pub current_line: String,
    /// View of the following line, if any; container blocks may shorten it.
    pub next_line: Option<String>,
    /// Character at the current position.
    pub current_char: Option<char>,
    /// Character before the current position.
    pub previous_char: Option<char>,
    /// Whether the current character is the last one.
    pub is_last_char: bool,
    /// One-shot flag: the active parent is a syntactic boundary, so
    /// word-boundary checks against `previous_char` don't apply.
    pub is_new_node: bool,
    data: &'a RedditData,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, data: &'a RedditData) -> Self {
        let all_lines: Vec<String> = text.split('\n').map(|l| format!("{l}\n")).collect();
        let current_line = all_lines[0].clone();
        let next_line = all_lines.get(1).cloned();
        let total_chars = text.chars().count();
        Self {
            text,
            all_lines,
            row: 0,
            column: 0,
            char_index: 0,
            byte_index: 0,
            total_chars,
            current_line,
            next_line,
            current_char: text.chars().next(),
            previous_char: None,
            is_last_char: total_chars < 2,
            is_new_node: false,
            data,
        }
    }

    /// Step one character forward, recomputing every derived field and
    /// crossing the line boundary when the column runs off the line.
    pub fn advance(&mut self) {
        if let Some(c) = self.current_char {
            self.byte_index += c.len_utf8();
        }
        self.char_index += 1;
        self.column += 1;
        self.previous_char = self.current_char;
        self.current_char = self.text[self.byte_index..].chars().next();
        self.is_last_char = self.char_index + 1 == self.total_chars;
        self.is_new_node = false;
        if self.column == self.current_line.chars().count() as i32 {
            self.row += 1;
            self.column = 0;
            self.current_line = self.all_lines.get(self.row).cloned().unwrap_or_default();
            self.next_line = self.all_lines.get(self.row + 1).cloned();
        }
    }

    pub fn at_end(&self) -> bool {
        self.char_index >= self.total_chars
    }

    /// Suffix of the source from the current position.
    pub fn remaining(&self) -> &str {
        &self.text[self.byte_index..]
    }

    /// Prefix of the source up to the current position.
    pub fn previous_text(&self) -> &str {
        &self.text[..self.byte_index]
    }

    /// `n`-th character of `remaining()` (0 = current character).
    pub fn remaining_char(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Whether the next line exists and holds only whitespace.
    pub fn next_line_is_blank(&self) -> bool {
        self.next_line.as_deref().is_some_and(is_blank_line)
    }

    pub fn data(&self) -> &'a RedditData {
        self.data
    }
}

/// Whether a newline-terminated line holds only whitespace.
pub(crate) fn is_blank_line(line: &str) -> bool {
    !line.is_empty() && line.ends_with('\n') && line.chars().all(char::is_whitespace)
}

/// The line minus its first `n` characters; empty when the line is shorter.
pub(crate) fn strip_chars(line: &str, n: usize) -> String {
    line.char_indices()
        .nth(n)
        .map(|(i, _)| line[i..].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let data = RedditData::default();
        let mut cursor = Cursor::new("ab\ncd", &data);
        assert_eq!(cursor.current_char, Some('a'));
        assert_eq!(cursor.current_line, "ab\n");
        assert_eq!(cursor.next_line.as_deref(), Some("cd\n"));

        cursor.advance(); // b
        cursor.advance(); // \n
        assert_eq!(cursor.current_char, Some('\n'));
        assert_eq!(cursor.row, 0);

        cursor.advance(); // c — crossed the line boundary
        assert_eq!(cursor.row, 1);
        assert_eq!(cursor.column, 0);
        assert_eq!(cursor.current_line, "cd\n");
        assert_eq!(cursor.next_line, None);
        assert_eq!(cursor.previous_char, Some('\n'));
        assert_eq!(cursor.remaining(), "cd");

        cursor.advance(); // d
        assert!(cursor.is_last_char);
        cursor.advance();
        assert!(cursor.at_end());
    }

    #[test]
    fn test_line_rewrite_keeps_boundary_math() {
        let data = RedditData::default();
        let mut cursor = Cursor::new("> a\nb", &data);
        // Strip the quote prefix the way the quote parser does.
        cursor.advance();
        cursor.current_line = strip_chars(&cursor.current_line, 2);
        cursor.column -= 2;
        assert_eq!(cursor.column, -1);
        cursor.advance(); // 'a' at column 0 of the rewritten line
        assert_eq!(cursor.column, 0);
        assert_eq!(cursor.current_line, "a\n");
        cursor.advance(); // newline, still on the rewritten line
        assert_eq!(cursor.row, 0);
        cursor.advance(); // crosses into the next line
        assert_eq!(cursor.row, 1);
        assert_eq!(cursor.current_line, "b\n");
    }

    #[test]
    fn test_blank_line() {
        assert!(is_blank_line("\n"));
        assert!(is_blank_line("  \t\n"));
        assert!(!is_blank_line("a\n"));
        assert!(!is_blank_line(""));
    }
}
