// Block-level grammar constructs.

pub(crate) mod leaf;
pub(crate) mod list;
pub(crate) mod quote;
pub(crate) mod table;

use crate::cursor::{is_blank_line, Cursor};
use crate::media::RedditData;
use crate::node::{ChildSpec, Composite, ParseResult, ParserKind, ParserNode};

/// One block of any kind, dispatched by precedence. Leading blank lines
/// are swallowed before the block proper starts. Lists exclude nested
/// `Block` children from being lists themselves; sublists are handled
/// by the list parser directly.
pub(crate) struct Block {
    inner: Composite,
    started: bool,
}

impl Block {
    pub fn new(excluded: &[ParserKind]) -> Self {
        let specs = [
            ChildSpec::Quote,
            ChildSpec::Table,
            ChildSpec::List,
            ChildSpec::IndentedCode,
            ChildSpec::FencedCode,
            ChildSpec::Heading,
            ChildSpec::HorizontalLine,
            ChildSpec::Paragraph,
        ]
        .into_iter()
        .filter(|spec| !excluded.contains(&spec.kind()))
        .collect();
        Self { inner: Composite::new(specs), started: false }
    }

    /// A block wrapping an already-parsed child (used when a list
    /// entry's inline text is promoted into a block sequence).
    pub fn with_child(child: Box<dyn ParserNode>, excluded: &[ParserKind]) -> Self {
        let mut block = Self::new(excluded);
        block.inner.push_completed(child);
        block.started = true;
        block
    }
}

impl ParserNode for Block {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_start(cursor)
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if !self.started {
            if is_blank_line(&cursor.current_line) {
                return ParseResult::Consumed;
            }
            self.started = true;
        }
        self.inner.parse_char(cursor)
    }

    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.inner.can_consume_char(cursor)
    }

    fn to_html(&self, data: &RedditData) -> String {
        self.inner.html(data)
    }
}
