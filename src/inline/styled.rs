// Styled inline spans: bold, italics, strikethrough, spoilers.
//
// Table-driven over ordered markers; the two-character markers are
// listed before their one-character prefixes so `**` is never read as
// two `*`. Interior content recurses through basic text with the active
// marker excluded, which keeps a span from reopening inside itself.
// Unterminated spans degrade to the literal marker characters.

use crate::cursor::Cursor;
use crate::escape::escape_html;
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

pub(crate) struct StyleKind {
    pub open: &'static str,
    pub close: &'static str,
    tag: &'static str,
    extra: &'static str,
    /// The span may not close mid-word (underscore italics).
    no_mid_word_end: bool,
}

pub(crate) const STYLE_KINDS: &[StyleKind] = &[
    StyleKind { open: "**", close: "**", tag: "strong", extra: "", no_mid_word_end: false },
    StyleKind { open: "__", close: "__", tag: "strong", extra: "", no_mid_word_end: false },
    StyleKind { open: "*", close: "*", tag: "em", extra: "", no_mid_word_end: false },
    StyleKind { open: "_", close: "_", tag: "em", extra: "", no_mid_word_end: true },
    StyleKind { open: "~~", close: "~~", tag: "del", extra: "", no_mid_word_end: false },
    StyleKind {
        open: ">!",
        close: "!<",
        tag: "span",
        extra: " class=\"md-spoiler-text\"",
        no_mid_word_end: false,
    },
];

/// Open marker at the cursor with its close marker somewhere ahead.
fn marker_pair_ahead(style: &StyleKind, remaining: &str) -> bool {
    remaining.starts_with(style.open) && remaining[style.open.len()..].contains(style.close)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Start,
    Content,
    End,
    Completed,
}

pub(crate) struct StyledText {
    excluded: Vec<&'static str>,
    allow_links: bool,
    inner: Composite,
    style: Option<&'static StyleKind>,
    parsed_start: String,
    parsed_end: String,
    state: State,
}

impl StyledText {
    pub fn new(excluded: Vec<&'static str>, allow_links: bool) -> Self {
        Self {
            excluded,
            allow_links,
            inner: Composite::new(Vec::new()),
            style: None,
            parsed_start: String::new(),
            parsed_end: String::new(),
            state: State::NotStarted,
        }
    }

    fn style(&self) -> &'static StyleKind {
        self.style.expect("style marker selected at start")
    }
}

impl ParserNode for StyledText {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        let remaining = cursor.remaining();
        STYLE_KINDS.iter().any(|style| {
            !self.excluded.contains(&style.open)
                && marker_pair_ahead(style, remaining)
                && remaining[style.open.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_whitespace())
                && cursor.previous_char != Some('\\')
        })
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if self.state == State::NotStarted {
            self.style = STYLE_KINDS.iter().find(|style| {
                !self.excluded.contains(&style.open)
                    && marker_pair_ahead(style, cursor.remaining())
            });
            let mut excluded = self.excluded.clone();
            excluded.push(self.style().open);
            self.inner = Composite::new(vec![ChildSpec::BasicText {
                excluded,
                allow_links: self.allow_links,
            }])
            .repeating();
            self.state = State::Start;
        }
        if self.state == State::Start {
            self.parsed_start.extend(cursor.current_char);
            if self.parsed_start == self.style().open {
                self.state = State::Content;
            }
            return ParseResult::Consumed;
        }
        if self.state == State::Content {
            let style = self.style();
            let remaining = cursor.remaining();
            let ends_mid_word = style.no_mid_word_end
                && remaining
                    .get(style.close.len()..)
                    .unwrap_or("")
                    .chars()
                    .next()
                    .is_some_and(|c| !c.is_whitespace());
            if remaining.starts_with(style.close)
                && !ends_mid_word
                && self.inner.has_active_child()
                && !self.inner.can_consume_char(cursor)
            {
                self.state = State::End;
            } else {
                cursor.is_new_node = true;
                return self.inner.parse_char(cursor);
            }
        }
        if self.state == State::End {
            self.parsed_end.extend(cursor.current_char);
            if self.parsed_end == self.style().close {
                self.state = State::Completed;
                return ParseResult::Ended;
            }
            return ParseResult::Consumed;
        }
        ParseResult::Consumed
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        match self.style {
            Some(style) => {
                let rest = &style.close[self.parsed_end.len()..];
                cursor.remaining().starts_with(rest) || self.inner.can_consume_char(cursor)
            }
            None => self.inner.can_consume_char(cursor),
        }
    }

    fn to_html(&self, data: &RedditData) -> String {
        if self.state == State::Completed {
            let style = self.style();
            format!(
                "<{}{}>{}</{}>",
                style.tag,
                style.extra,
                self.inner.html(data),
                style.tag
            )
        } else {
            format!(
                "{}{}{}",
                escape_html(&self.parsed_start),
                self.inner.html(data),
                escape_html(&self.parsed_end)
            )
        }
    }
}
