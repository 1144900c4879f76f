// Block quotes.
//
// Each quoted line starts with `"> "`. The parser cuts that prefix out
// of the cursor's line views before handing the characters to its inner
// blocks, so arbitrary block content (including further quotes) nests
// without ever re-scanning the source.

use crate::cursor::{strip_chars, Cursor};
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Content,
    Completed,
}

pub(crate) struct Quote {
    inner: Composite,
    state: State,
}

impl Quote {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::Block { excluded: Vec::new() }])
                .repeating()
                .joined_with("\n\n"),
            state: State::Start,
        }
    }
}

impl ParserNode for Quote {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        cursor.current_line.starts_with("> ")
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        match self.state {
            State::Start => {
                if cursor.current_char == Some(' ') {
                    self.state = State::Content;
                    cursor.current_line = strip_chars(&cursor.current_line, 2);
                    cursor.column -= 2;
                }
                ParseResult::Consumed
            }
            State::Content => {
                if cursor.current_char == Some('\n') {
                    if cursor
                        .next_line
                        .as_deref()
                        .is_some_and(|line| line.starts_with("> "))
                    {
                        let next = cursor.next_line.take().unwrap_or_default();
                        cursor.next_line = Some(strip_chars(&next, 2));
                        self.inner.parse_char(cursor);
                        self.state = State::Start;
                        return ParseResult::Consumed;
                    }
                    self.state = State::Completed;
                    return ParseResult::Ended;
                }
                if cursor.is_last_char {
                    self.inner.parse_char(cursor);
                    return ParseResult::Ended;
                }
                self.inner.parse_char(cursor);
                ParseResult::Consumed
            }
            State::Completed => ParseResult::Consumed,
        }
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        format!("<blockquote>\n{}\n</blockquote>", self.inner.html(data))
    }
}
