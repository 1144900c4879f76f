// Plain text, the universal inline fallback.
//
// Text never claims a character outright: every `parse_char` answers
// `Text`, letting the owning composite retry a structured
// interpretation on the following character. All the interesting work
// happens at render time: backslash unescaping, HTML escaping, hard
// line breaks and soft-wrap reflow.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cursor::Cursor;
use crate::escape::escape_html;
use crate::media::RedditData;
use crate::node::{ParseResult, ParserNode};

// Characters a backslash may escape: ` ~ * _ - \ > < ] [ ^ / # | )
static ESCAPED_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\([`~*_\\><\[\]^/#|)-])").unwrap());

// Two or more trailing spaces before a newline force a hard break.
static HARD_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}\n").unwrap());

pub(crate) struct Text {
    parsed: String,
    /// Reflow mode: unescape backslashes, honor hard breaks, join
    /// soft-wrapped lines. Off inside code blocks.
    reflow: bool,
    /// Widen tabs to 4 spaces instead of collapsing them to one.
    preserve_tabs: bool,
}

impl Text {
    pub fn new(reflow: bool, preserve_tabs: bool) -> Self {
        Self { parsed: String::new(), reflow, preserve_tabs }
    }
}

impl ParserNode for Text {
    fn can_start(&self, _cursor: &Cursor<'_>) -> bool {
        true
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if let Some(c) = cursor.current_char {
            self.parsed.push(c);
        }
        ParseResult::Text
    }

    fn to_html(&self, _data: &RedditData) -> String {
        let text = if self.preserve_tabs {
            self.parsed.replace('\t', "    ")
        } else {
            self.parsed.replace('\t', " ")
        };
        if !self.reflow {
            return escape_html(&text);
        }
        let text = ESCAPED_CHAR_RE.replace_all(&text, "$1");
        let text = escape_html(&text);
        let text = HARD_BREAK_RE.replace_all(&text, "<br/>\n");
        reflow_soft_breaks(&text)
    }
}

/// Join soft-wrapped lines: a whitespace run ending in a newline becomes
/// a single space when text continues after it, except directly after an
/// inserted `<br/>`.
fn reflow_soft_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let run = &chars[i..j];
        let after_break = out.len() >= 5 && out[out.len() - 5..] == ['<', 'b', 'r', '/', '>'];
        match run.iter().rposition(|&c| c == '\n') {
            // Text continues either within the run (trailing spaces) or
            // right after it.
            Some(k) if !after_break && (k + 1 < run.len() || j < chars.len()) => {
                out.push(' ');
                out.extend(&run[k + 1..]);
            }
            _ => out.extend(run),
        }
        i = j;
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &str, reflow: bool, preserve_tabs: bool) -> String {
        let text = Text {
            parsed: raw.to_string(),
            reflow,
            preserve_tabs,
        };
        text.to_html(&RedditData::default())
    }

    #[test]
    fn test_backslash_unescape() {
        assert_eq!(render(r"\*not em\*", true, false), "*not em*");
        assert_eq!(render(r"\\", true, false), r"\");
    }

    #[test]
    fn test_code_mode_keeps_backslashes() {
        assert_eq!(render(r"\*raw\*", false, false), r"\*raw\*");
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(render("one  \ntwo", true, false), "one<br/>\ntwo");
    }

    #[test]
    fn test_soft_break_joins_lines() {
        assert_eq!(render("one\ntwo", true, false), "one two");
        assert_eq!(render("one \ntwo", true, false), "one two");
    }

    #[test]
    fn test_trailing_newline_kept() {
        assert_eq!(render("one\n", true, false), "one\n");
    }

    #[test]
    fn test_tabs() {
        assert_eq!(render("a\tb", true, false), "a b");
        assert_eq!(render("a\tb", false, true), "a    b");
    }
}
