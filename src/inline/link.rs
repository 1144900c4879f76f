// Hyperlinks, in three forms tried in priority order:
//   1. reddit shorthand — `/r/name`, `/u/name`, `/user/name`, expanded
//      into a link whose text is the URL itself (plus the `r/foo+reddit.com`
//      multireddit suffix special case),
//   2. bare URLs with a recognized scheme, ending at whitespace or `)`,
//   3. manual `[label](url "title")`, tolerating backslash-escaped
//      parens inside the URL.
// A link may only start at a word boundary, unless the enclosing parser
// flagged the cursor as a fresh syntactic boundary.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cursor::Cursor;
use crate::escape::{encode_uri, escape_attr, escape_html};
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

static REDDIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/?(r|u|user)/[^/]+").unwrap());

static SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(http://|https://|ftp://|mailto:|git://|steam://|irc://|news://|mumble://|ssh://|ircs://|ts3server://).+",
    )
    .unwrap()
});

static MANUAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^\[.+\]\((http://|https://|ftp://|mailto:|git://|steam://|irc://|news://|mumble://|ssh://|ircs://|ts3server://|/|#)([^)]|\\\)|\\\()+\)",
    )
    .unwrap()
});

// `r/foo+reddit.com` style multireddit suffixes.
static REDDIT_COM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(r/|\+)reddit$").unwrap());
static REDDIT_COM_PARTIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(r/|\+)reddi$").unwrap());

fn is_shorthand_char(c: char) -> bool {
    c == '/' || c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    NotStarted,
    Reddit,
    Scheme,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManualState {
    Start,
    Label,
    Separation,
    Url,
    Title,
    End,
}

pub(crate) struct Link {
    inner: Composite,
    form: Form,
    manual_state: ManualState,
    title_quote: Option<char>,
    url: String,
    alt_text: String,
    title: String,
}

impl Link {
    pub fn new() -> Self {
        Self {
            inner: Composite::new(vec![ChildSpec::BasicText {
                excluded: Vec::new(),
                allow_links: false,
            }]),
            form: Form::NotStarted,
            manual_state: ManualState::Start,
            title_quote: None,
            url: String::new(),
            alt_text: String::new(),
            title: String::new(),
        }
    }

    fn parse_manual_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        let current = cursor.current_char;
        match self.manual_state {
            ManualState::Start => {
                self.manual_state = ManualState::Label;
            }
            ManualState::Label => {
                if current == Some(']') && cursor.previous_char != Some('\\') {
                    self.manual_state = ManualState::Separation;
                } else {
                    self.inner.parse_char(cursor);
                }
            }
            ManualState::Separation => {
                self.manual_state = ManualState::Url;
            }
            ManualState::Url => {
                if current == Some(')') && cursor.previous_char != Some('\\') {
                    return ParseResult::Ended;
                } else if current == Some(' ') {
                    self.manual_state = ManualState::Title;
                } else {
                    self.url.extend(current);
                }
            }
            ManualState::Title => {
                if self.title.is_empty()
                    && self.title_quote.is_none()
                    && matches!(current, Some('"') | Some('\''))
                {
                    self.title_quote = current;
                } else if self.title_quote.is_some() && current == self.title_quote {
                    self.manual_state = ManualState::End;
                } else if matches!(current, Some(')') | Some('\n')) {
                    return ParseResult::Ended;
                } else {
                    self.title.extend(current);
                }
            }
            ManualState::End => {
                return ParseResult::Ended;
            }
        }
        ParseResult::Consumed
    }
}

impl ParserNode for Link {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        let remaining = cursor.remaining();
        let recognized = REDDIT_RE.is_match(remaining)
            || SCHEME_RE.is_match(remaining)
            || (MANUAL_RE.is_match(remaining) && cursor.previous_char != Some('\\'));
        let at_boundary =
            cursor.previous_char.map_or(true, |c| !is_word_char(c)) || cursor.is_new_node;
        recognized && at_boundary
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if self.form == Form::NotStarted {
            let remaining = cursor.remaining();
            if REDDIT_RE.is_match(remaining) {
                self.form = Form::Reddit;
            } else if SCHEME_RE.is_match(remaining) {
                self.form = Form::Scheme;
            } else if MANUAL_RE.is_match(remaining) {
                self.form = Form::Manual;
            }
        }
        match self.form {
            Form::Reddit => {
                let current = cursor.current_char;
                if self.url.is_empty() && current != Some('/') {
                    self.url.push('/');
                }
                let continues_dot_com = cursor.remaining().starts_with(".com")
                    && REDDIT_COM_RE.is_match(cursor.previous_text());
                if current.is_some_and(is_shorthand_char) || continues_dot_com {
                    self.url.extend(current);
                    self.alt_text.extend(current);
                    let next_continues = cursor.remaining_char(1).is_some_and(is_shorthand_char)
                        || (cursor.remaining().starts_with("t.com")
                            && REDDIT_COM_PARTIAL_RE.is_match(cursor.previous_text()));
                    if next_continues {
                        return ParseResult::Consumed;
                    }
                    return ParseResult::Ended;
                }
                ParseResult::Ended
            }
            Form::Scheme => {
                self.url.extend(cursor.current_char);
                self.alt_text.extend(cursor.current_char);
                match cursor.remaining_char(1) {
                    Some(c) if !c.is_whitespace() && c != ')' && c != '|' => ParseResult::Consumed,
                    _ => ParseResult::Ended,
                }
            }
            Form::Manual => self.parse_manual_char(cursor),
            Form::NotStarted => ParseResult::Consumed,
        }
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        let label = self.inner.html(data);
        let label = if label.is_empty() {
            escape_html(&self.alt_text)
        } else {
            label
        };
        let title = if self.title.is_empty() {
            String::new()
        } else {
            format!(" title=\"{}\"", escape_attr(&self.title))
        };
        format!(
            "<a href=\"{}\"{}>{}</a>",
            escape_attr(&encode_uri(&self.url)),
            title,
            label
        )
    }
}
