// Superscript: `^word` runs to the next whitespace, `^(phrase)` to the
// closing parenthesis.

use crate::cursor::Cursor;
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Start,
    Content,
    Completed,
}

pub(crate) struct Superscript {
    inner: Composite,
    parsed_start: String,
    uses_parens: bool,
    state: State,
}

impl Superscript {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::BasicText {
                excluded: Vec::new(),
                allow_links: false,
            }])
            .repeating(),
            parsed_start: String::new(),
            uses_parens: false,
            state: State::NotStarted,
        }
    }
}

impl ParserNode for Superscript {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        cursor.remaining().starts_with('^')
            && cursor.remaining_char(1).is_some_and(|c| !c.is_whitespace())
            && cursor.previous_char != Some('\\')
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if self.state == State::NotStarted {
            self.uses_parens = cursor.remaining_char(1) == Some('(');
            self.state = if self.uses_parens { State::Start } else { State::Content };
            self.parsed_start.extend(cursor.current_char);
            return ParseResult::Consumed;
        }
        if self.state == State::Start {
            self.parsed_start.extend(cursor.current_char);
            self.state = State::Content;
            return ParseResult::Consumed;
        }
        if self.state == State::Content {
            if self.uses_parens && cursor.current_char == Some(')') {
                self.state = State::Completed;
                return ParseResult::Ended;
            }
            if !self.uses_parens && cursor.remaining_char(1).map_or(true, char::is_whitespace) {
                self.state = State::Completed;
                self.inner.parse_char(cursor);
                return ParseResult::Ended;
            }
            return self.inner.parse_char(cursor);
        }
        ParseResult::Consumed
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        if self.state == State::Completed || !self.uses_parens {
            format!("<sup>{}</sup>", self.inner.html(data))
        } else {
            format!("^({}", self.inner.html(data))
        }
    }
}
