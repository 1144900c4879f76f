// Inline-level grammar constructs.

pub(crate) mod code;
pub(crate) mod image;
pub(crate) mod link;
pub(crate) mod styled;
pub(crate) mod superscript;
pub(crate) mod text;

use crate::cursor::Cursor;
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserNode};

/// A run of inline content: structured constructs in precedence order
/// with plain text as the fallback. Links and images only participate
/// where the enclosing construct permits them, and an exclusion list
/// keeps a styled span from restarting inside itself.
pub(crate) struct BasicText {
    inner: Composite,
}

impl BasicText {
    pub fn new(excluded: Vec<&'static str>, allow_links: bool) -> Self {
        let mut specs = Vec::new();
        if allow_links {
            specs.push(ChildSpec::Link);
            specs.push(ChildSpec::Image);
        }
        specs.push(ChildSpec::Styled { excluded, allow_links });
        specs.push(ChildSpec::Superscript);
        specs.push(ChildSpec::InlineCode);
        specs.push(ChildSpec::text());
        Self { inner: Composite::new(specs).repeating() }
    }
}

impl ParserNode for BasicText {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_start(cursor)
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        self.inner.parse_char(cursor)
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        self.inner.html(data)
    }
}
