// Leaf blocks: paragraphs, headings, horizontal rules, and the two
// code-block forms (four-space indented and backtick fenced).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cursor::Cursor;
use crate::inline::BasicText;
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

/// A paragraph runs to the first blank line (or the end of input).
pub(crate) struct Paragraph {
    inner: Composite,
}

impl Paragraph {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::BasicText {
                excluded: Vec::new(),
                allow_links: true,
            }]),
        }
    }

    /// A paragraph wrapping inline content that was already parsed —
    /// used when a list entry's text is promoted into a block sequence.
    pub fn with_text(text: BasicText) -> Self {
        let mut paragraph = Self::new();
        paragraph.inner.push_completed(Box::new(text));
        paragraph
    }
}

impl ParserNode for Paragraph {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_start(cursor)
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        let at_line_end = cursor.column + 1 == cursor.current_line.chars().count() as i32;
        if at_line_end && (cursor.next_line.is_none() || cursor.next_line_is_blank()) {
            ParseResult::Ended
        } else {
            self.inner.parse_char(cursor)
        }
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        format!("<p>{}</p>", self.inner.html(data).trim())
    }
}

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}.*(\n|$)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingState {
    Start,
    Content,
}

/// `# Heading`, levels 1-6; extra `#` clamp to 6. The space after the
/// marker is optional.
pub(crate) struct Heading {
    inner: Composite,
    level: u32,
    state: HeadingState,
}

impl Heading {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::BasicText {
                excluded: Vec::new(),
                allow_links: true,
            }]),
            level: 0,
            state: HeadingState::Start,
        }
    }
}

impl ParserNode for Heading {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        HEADING_RE.is_match(&cursor.current_line)
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if self.state == HeadingState::Start {
            if cursor.current_char == Some('#') {
                self.level += 1;
                return ParseResult::Consumed;
            }
            self.level = self.level.min(6);
            self.state = HeadingState::Content;
            if cursor.current_char == Some(' ') {
                return ParseResult::Consumed;
            }
        }
        if cursor.current_char == Some('\n') {
            return ParseResult::Ended;
        }
        if cursor.is_last_char {
            self.inner.parse_char(cursor);
            return ParseResult::Ended;
        }
        self.inner.parse_char(cursor);
        ParseResult::Consumed
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        format!("<h{0}>{1}</h{0}>", self.level, self.inner.html(data))
    }
}

static HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-{3,}|\*{3,}|_{3,})(\n|$)").unwrap());

/// `---`, `***` or `___` alone on a line.
pub(crate) struct HorizontalLine;

impl HorizontalLine {
    pub fn new() -> Self {
        Self
    }
}

impl ParserNode for HorizontalLine {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        HR_RE.is_match(&cursor.current_line)
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if matches!(cursor.current_char, Some('-') | Some('*') | Some('_')) {
            ParseResult::Consumed
        } else {
            ParseResult::Ended
        }
    }

    fn to_html(&self, _data: &RedditData) -> String {
        "<hr/>".to_string()
    }
}

static INDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( {4}|\t)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeState {
    Start,
    Content,
    End,
    Completed,
}

/// Code block indented by four spaces or one tab per line.
pub(crate) struct IndentedCode {
    inner: Composite,
    state: CodeState,
    parsed_indent: u32,
}

impl IndentedCode {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::code_text()]),
            state: CodeState::Start,
            parsed_indent: 0,
        }
    }
}

impl ParserNode for IndentedCode {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        cursor.column == 0 && INDENT_RE.is_match(&cursor.current_line)
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if self.state == CodeState::Content {
            if cursor.column == 0 {
                self.parsed_indent = 0;
                self.state = CodeState::Start;
            } else {
                if cursor.current_char == Some('\n')
                    && !cursor
                        .next_line
                        .as_deref()
                        .is_some_and(|line| INDENT_RE.is_match(line))
                {
                    return ParseResult::Ended;
                }
                self.inner.parse_char(cursor);
                return ParseResult::Consumed;
            }
        }
        if self.state == CodeState::Start {
            self.parsed_indent += 1;
            if self.parsed_indent == 4 || cursor.current_char == Some('\t') {
                self.state = CodeState::Content;
            }
        }
        ParseResult::Consumed
    }

    fn can_consume_char(&self, _cursor: &Cursor<'_>) -> bool {
        true
    }

    fn to_html(&self, data: &RedditData) -> String {
        format!("<pre><code>{}\n</code></pre>", self.inner.html(data))
    }
}

/// Whether a backtick fence opening at the start of `remaining` has a
/// matching closing fence on a later line.
fn fence_closes(remaining: &str) -> bool {
    let run = remaining.chars().take_while(|&c| c == '`').count();
    if run < 3 {
        return false;
    }
    let rest = &remaining[run..];
    if !rest.starts_with('\n') {
        return false;
    }
    let fence = "`".repeat(run);
    rest[1..].lines().any(|line| line == fence)
}

/// Code block fenced by lines of three or more backticks. An unclosed
/// fence degrades to its literal characters.
pub(crate) struct FencedCode {
    inner: Composite,
    state: CodeState,
    ticks: usize,
}

impl FencedCode {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::code_text()]),
            state: CodeState::Start,
            ticks: 0,
        }
    }
}

impl ParserNode for FencedCode {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        cursor.column == 0 && fence_closes(cursor.remaining())
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        match self.state {
            CodeState::Start => {
                if cursor.current_char == Some('\n') {
                    self.state = CodeState::Content;
                } else {
                    self.ticks += 1;
                }
                ParseResult::Consumed
            }
            CodeState::Content => {
                let closing_fence = format!("{}\n", "`".repeat(self.ticks));
                if cursor.current_char == Some('\n')
                    && cursor.next_line.as_deref() == Some(closing_fence.as_str())
                {
                    self.state = CodeState::End;
                    return ParseResult::Consumed;
                }
                self.inner.parse_char(cursor);
                ParseResult::Consumed
            }
            CodeState::End => {
                if cursor.current_char == Some('\n') || cursor.is_last_char {
                    self.state = CodeState::Completed;
                    return ParseResult::Ended;
                }
                ParseResult::Consumed
            }
            CodeState::Completed => ParseResult::Consumed,
        }
    }

    fn can_consume_char(&self, _cursor: &Cursor<'_>) -> bool {
        true
    }

    fn to_html(&self, data: &RedditData) -> String {
        if self.state == CodeState::Completed {
            format!("<pre><code>{}\n</code></pre>", self.inner.html(data))
        } else {
            format!("{}{}", "`".repeat(self.ticks), self.inner.html(data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_close_detection() {
        assert!(fence_closes("```\ncode\n```"));
        assert!(fence_closes("```\ncode\n```\nafter"));
        assert!(fence_closes("````\na\n````"));
        assert!(!fence_closes("```\ncode"));
        assert!(!fence_closes("``\na\n``"));
        assert!(!fence_closes("```rust\ncode\n```rust"));
        // A longer closing run is not an exact match.
        assert!(!fence_closes("````\na\n```"));
    }
}
