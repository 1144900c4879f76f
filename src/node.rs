// The parser-node protocol shared by every grammar construct.
//
// A parse is a tree of nodes stepping over one shared cursor. At each
// character exactly one leaf of the tree is active; it either consumes
// the character, signals `Ended` so its parent resumes control, or
// signals `Text` — the plain-text fallback's way of saying "this may
// still become something structured". On `Text` the owning composite
// re-selects a child on the NEXT character with the plain-text fallback
// excluded, giving styled text and links first refusal before literal
// text. That one-character-deferred retry is the engine's only
// ambiguity-resolution device; preserve its timing when touching it.

use crate::cursor::Cursor;
use crate::media::RedditData;
use crate::{block, inline};

/// Outcome of feeding one character to a parser node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseResult {
    /// The node is complete as of this character; the parent takes over
    /// from the next one.
    Ended,
    /// The character was consumed.
    Consumed,
    /// Consumed as plain text, but a structured reinterpretation may be
    /// attempted on the next character.
    Text,
}

/// Identity tag for grammar constructs, used by exclusion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParserKind {
    Text,
    InlineCode,
    Styled,
    Superscript,
    Link,
    Image,
    BasicText,
    Paragraph,
    Heading,
    HorizontalLine,
    Quote,
    List,
    Table,
    IndentedCode,
    FencedCode,
    Block,
}

/// The three-operation contract every grammar construct implements, plus
/// the lookahead-claim check used by bounded constructs.
pub(crate) trait ParserNode {
    /// Pure lookahead: whether this construct can begin at the cursor.
    /// Must not mutate the cursor.
    fn can_start(&self, cursor: &Cursor<'_>) -> bool;

    /// Step over the current character.
    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult;

    /// Whether this node still lays claim to upcoming characters — used
    /// by enclosing constructs to decide if a close marker really closes
    /// them or belongs to this node as content.
    fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        let _ = cursor;
        false
    }

    /// Render the accumulated parse to an HTML fragment.
    fn to_html(&self, data: &RedditData) -> String;
}

/// Factory description for a child parser. A composite's spec list is
/// ordered: earlier entries win, and that order encodes grammar
/// precedence (links before styled text before literal text).
#[derive(Debug, Clone)]
pub(crate) enum ChildSpec {
    Text { reflow: bool, preserve_tabs: bool },
    InlineCode,
    Styled { excluded: Vec<&'static str>, allow_links: bool },
    Superscript,
    Link,
    Image,
    BasicText { excluded: Vec<&'static str>, allow_links: bool },
    Paragraph,
    Heading,
    HorizontalLine,
    Quote,
    List,
    Table,
    IndentedCode,
    FencedCode,
    Block { excluded: Vec<ParserKind> },
}

impl ChildSpec {
    /// Plain reflowing text, the universal inline fallback.
    pub fn text() -> Self {
        ChildSpec::Text { reflow: true, preserve_tabs: false }
    }

    /// Raw text for code blocks: no reflow, tabs widened to 4 spaces.
    pub fn code_text() -> Self {
        ChildSpec::Text { reflow: false, preserve_tabs: true }
    }

    pub fn kind(&self) -> ParserKind {
        match self {
            ChildSpec::Text { .. } => ParserKind::Text,
            ChildSpec::InlineCode => ParserKind::InlineCode,
            ChildSpec::Styled { .. } => ParserKind::Styled,
            ChildSpec::Superscript => ParserKind::Superscript,
            ChildSpec::Link => ParserKind::Link,
            ChildSpec::Image => ParserKind::Image,
            ChildSpec::BasicText { .. } => ParserKind::BasicText,
            ChildSpec::Paragraph => ParserKind::Paragraph,
            ChildSpec::Heading => ParserKind::Heading,
            ChildSpec::HorizontalLine => ParserKind::HorizontalLine,
            ChildSpec::Quote => ParserKind::Quote,
            ChildSpec::List => ParserKind::List,
            ChildSpec::Table => ParserKind::Table,
            ChildSpec::IndentedCode => ParserKind::IndentedCode,
            ChildSpec::FencedCode => ParserKind::FencedCode,
            ChildSpec::Block { .. } => ParserKind::Block,
        }
    }

    /// Instantiate a fresh parser node for this spec.
    pub fn make(&self) -> Box<dyn ParserNode> {
        match self {
            ChildSpec::Text { reflow, preserve_tabs } => {
                Box::new(inline::text::Text::new(*reflow, *preserve_tabs))
            }
            ChildSpec::InlineCode => Box::new(inline::code::InlineCode::new()),
            ChildSpec::Styled { excluded, allow_links } => {
                Box::new(inline::styled::StyledText::new(excluded.clone(), *allow_links))
            }
            ChildSpec::Superscript => Box::new(inline::superscript::Superscript::new()),
            ChildSpec::Link => Box::new(inline::link::Link::new()),
            ChildSpec::Image => Box::new(inline::image::Image::new()),
            ChildSpec::BasicText { excluded, allow_links } => {
                Box::new(inline::BasicText::new(excluded.clone(), *allow_links))
            }
            ChildSpec::Paragraph => Box::new(block::leaf::Paragraph::new()),
            ChildSpec::Heading => Box::new(block::leaf::Heading::new()),
            ChildSpec::HorizontalLine => Box::new(block::leaf::HorizontalLine::new()),
            ChildSpec::Quote => Box::new(block::quote::Quote::new()),
            ChildSpec::List => Box::new(block::list::List::new()),
            ChildSpec::Table => Box::new(block::table::Table::new()),
            ChildSpec::IndentedCode => Box::new(block::leaf::IndentedCode::new()),
            ChildSpec::FencedCode => Box::new(block::leaf::FencedCode::new()),
            ChildSpec::Block { excluded } => Box::new(block::Block::new(excluded)),
        }
    }
}

/// Shared child-management machinery for composite constructs: ordered
/// child selection, optional sibling repetition, and the deferred
/// plain-text retry described at the top of this module.
pub(crate) struct Composite {
    specs: Vec<ChildSpec>,
    children: Vec<Box<dyn ParserNode>>,
    has_active: bool,
    try_text_alternative: bool,
    can_repeat: bool,
    join: &'static str,
}

impl Composite {
    pub fn new(specs: Vec<ChildSpec>) -> Self {
        Self {
            specs,
            children: Vec::new(),
            has_active: false,
            try_text_alternative: false,
            can_repeat: false,
            join: "",
        }
    }

    /// Allow a sibling child to start after one ends.
    pub fn repeating(mut self) -> Self {
        self.can_repeat = true;
        self
    }

    /// Join children with the given separator when rendering.
    pub fn joined_with(mut self, join: &'static str) -> Self {
        self.join = join;
        self
    }

    /// Adopt an already-parsed child (used when a list entry's inline
    /// text is retroactively promoted into a block sequence).
    pub fn push_completed(&mut self, child: Box<dyn ParserNode>) {
        self.children.push(child);
        self.has_active = false;
    }

    pub fn has_active_child(&self) -> bool {
        self.has_active
    }

    pub fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        self.specs.iter().any(|spec| spec.make().can_start(cursor))
    }

    pub fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if !self.has_active || self.try_text_alternative {
            let skip_text = self.try_text_alternative;
            for spec in &self.specs {
                if skip_text && spec.kind() == ParserKind::Text {
                    continue;
                }
                let candidate = spec.make();
                if candidate.can_start(cursor) {
                    self.children.push(candidate);
                    self.has_active = true;
                    break;
                }
            }
            // No startable child with none already running means the
            // grammar itself is wrong, not the input.
            if !self.has_active {
                panic!(
                    "no grammar construct can start at row {} column {}",
                    cursor.row, cursor.column
                );
            }
            self.try_text_alternative = false;
        }

        let child = self.children.last_mut().expect("composite has an active child");
        match child.parse_char(cursor) {
            ParseResult::Ended => {
                self.has_active = false;
                if self.can_repeat && self.can_start(cursor) {
                    ParseResult::Consumed
                } else {
                    ParseResult::Ended
                }
            }
            ParseResult::Consumed => ParseResult::Consumed,
            ParseResult::Text => {
                self.try_text_alternative = true;
                ParseResult::Consumed
            }
        }
    }

    pub fn can_consume_char(&self, cursor: &Cursor<'_>) -> bool {
        self.has_active
            && self
                .children
                .last()
                .is_some_and(|child| child.can_consume_char(cursor))
    }

    pub fn html(&self, data: &RedditData) -> String {
        self.children
            .iter()
            .map(|child| child.to_html(data))
            .collect::<Vec<_>>()
            .join(self.join)
    }
}
