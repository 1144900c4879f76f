// Inline code spans.
//
// A span opens with a run of N backticks and closes with an equal run
// later on the same line. One layer of whitespace padding directly
// inside the markers is stripped, which is how a literal backtick gets
// into a span (`` ` ``). Interior content is raw text, HTML-escaped
// only.

use crate::cursor::Cursor;
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TickStart,
    WsStart,
    Content,
    WsEnd,
    TickEnd,
    Completed,
}

pub(crate) struct InlineCode {
    inner: Composite,
    parsed_start: String,
    parsed_end: String,
    ticks: usize,
    ticks_end: usize,
    state: State,
}

impl InlineCode {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::Text {
                reflow: false,
                preserve_tabs: false,
            }]),
            parsed_start: String::new(),
            parsed_end: String::new(),
            ticks: 0,
            ticks_end: 0,
            state: State::TickStart,
        }
    }
}

/// Whether an opening backtick run at the start of `remaining` has a
/// matching close run on the same line. Mirrors backtracking: a shorter
/// opening run may pair with a shorter close (`` `a` `` inside ```` `` ````).
fn has_close_run(remaining: &str) -> bool {
    let run = remaining.chars().take_while(|&c| c == '`').count();
    if run == 0 {
        return false;
    }
    let line_end = remaining.find('\n').unwrap_or(remaining.len());
    for k in (1..=run).rev() {
        let close = "`".repeat(k);
        if remaining[k..line_end].contains(&close) {
            return true;
        }
    }
    false
}

/// Whether the close run (possibly after whitespace padding) begins at
/// the cursor.
fn close_ahead(remaining: &str, ticks: usize) -> bool {
    let rest = remaining.trim_start_matches(char::is_whitespace);
    rest.starts_with(&"`".repeat(ticks))
}

impl ParserNode for InlineCode {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        has_close_run(cursor.remaining()) && cursor.previous_char != Some('\\')
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        let current = cursor.current_char;
        if self.state == State::TickStart {
            if current == Some('`') {
                self.ticks += 1;
                self.parsed_start.push('`');
                return ParseResult::Consumed;
            }
            if current.is_some_and(char::is_whitespace) {
                self.parsed_start.extend(current);
                self.state = State::WsStart;
                return ParseResult::Consumed;
            }
            self.state = State::Content;
        }
        if self.state == State::WsStart {
            if current.is_some_and(char::is_whitespace) {
                self.parsed_start.extend(current);
                return ParseResult::Consumed;
            }
            self.state = State::Content;
        }
        if self.state == State::Content {
            if close_ahead(cursor.remaining(), self.ticks) {
                if current.is_some_and(char::is_whitespace) {
                    self.state = State::WsEnd;
                    return ParseResult::Consumed;
                }
                self.state = State::TickEnd;
            } else {
                self.inner.parse_char(cursor);
                return ParseResult::Consumed;
            }
        }
        if self.state == State::WsEnd {
            if current.is_some_and(char::is_whitespace) {
                self.parsed_end.extend(current);
                return ParseResult::Consumed;
            }
            self.state = State::TickEnd;
        }
        if self.state == State::TickEnd {
            if current == Some('`') {
                self.parsed_end.push('`');
                self.ticks_end += 1;
                if self.ticks == self.ticks_end {
                    self.state = State::Completed;
                    return ParseResult::Ended;
                }
                return ParseResult::Consumed;
            }
        }
        self.inner.parse_char(cursor)
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        // A blank line breaks the span's claim on the close marker.
        let line = &cursor.current_line;
        !(!line.is_empty() && line.chars().all(char::is_whitespace))
    }

    fn to_html(&self, data: &RedditData) -> String {
        if self.state == State::Completed {
            format!("<code>{}</code>", self.inner.html(data))
        } else {
            format!(
                "{}{}{}",
                self.parsed_start,
                self.inner.html(data),
                self.parsed_end
            )
        }
    }
}
