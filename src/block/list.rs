// Bullet and numbered lists.
//
// Each entry starts as bare inline text. Only when a blank line is
// followed by still-indented content does the entry graduate to holding
// full blocks, at which point the text parsed so far is retroactively
// wrapped in a paragraph block. Nested lists hang off their entry as a
// sublist, fed characters with the indentation stripped from the
// cursor's line views.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{leaf::Paragraph, Block};
use crate::cursor::{is_blank_line, strip_chars, Cursor};
use crate::inline::BasicText;
use crate::media::RedditData;
use crate::node::{ParseResult, ParserKind, ParserNode};

struct ListType {
    /// Matches a line that may open a list of this type.
    initial_start: Regex,
    /// Matches a line that starts any further entry.
    start: Regex,
    /// Content indentation depth in spaces.
    indentation: usize,
    tag: &'static str,
}

static LIST_TYPES: Lazy<[ListType; 2]> = Lazy::new(|| {
    [
        ListType {
            initial_start: Regex::new(r"^[*-] ").unwrap(),
            start: Regex::new(r"^[*-] ").unwrap(),
            indentation: 2,
            tag: "ul",
        },
        ListType {
            initial_start: Regex::new(r"^1\. ").unwrap(),
            start: Regex::new(r"^\d+\. ").unwrap(),
            indentation: 3,
            tag: "ol",
        },
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Whitespace,
    Content,
    BlankLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentState {
    Text,
    Blocks,
    Sublist,
}

struct Entry {
    text_only: Option<BasicText>,
    blocks: Vec<Block>,
    sublist: Option<Box<List>>,
}

pub(crate) struct List {
    list_type: Option<&'static ListType>,
    state: State,
    content_state: ContentState,
    trim_next_line: bool,
    entries: Vec<Entry>,
    parsed_indents: usize,
    make_new_block: bool,
    is_new_line: bool,
    // Entry lines as they looked before child parsers rewrote the
    // cursor's views, for the lookahead predicates below.
    current_line_backup: String,
    next_line_backup: Option<String>,
}

impl List {
    pub fn new() -> Self {
        Self {
            list_type: None,
            state: State::Start,
            content_state: ContentState::Text,
            trim_next_line: false,
            entries: Vec::new(),
            parsed_indents: 0,
            make_new_block: false,
            is_new_line: true,
            current_line_backup: String::new(),
            next_line_backup: None,
        }
    }

    fn current_entry(&mut self) -> &mut Entry {
        self.entries.last_mut().expect("list has a current entry")
    }

    fn indentation(&self) -> usize {
        self.list_type.map_or(0, |t| t.indentation)
    }

    fn is_next_line_new_entry(&self) -> bool {
        match (&self.next_line_backup, self.list_type) {
            (Some(line), Some(list_type)) => list_type.start.is_match(line),
            _ => false,
        }
    }

    fn is_next_line_nested_list(&self) -> bool {
        let Some(line) = &self.next_line_backup else {
            return false;
        };
        if !line.starts_with(&" ".repeat(self.indentation())) {
            return false;
        }
        let rest = strip_chars(line, self.indentation());
        if LIST_TYPES.iter().any(|t| t.initial_start.is_match(&rest)) {
            return true;
        }
        self.entries
            .last()
            .and_then(|entry| entry.sublist.as_ref())
            .is_some_and(|sublist| sublist.is_next_line_list())
    }

    fn is_next_line_still_indented(&self) -> bool {
        self.next_line_backup
            .as_deref()
            .is_some_and(|line| line.starts_with(&" ".repeat(self.indentation())))
    }

    /// Whether the next line belongs to this list or any of its
    /// (recursively nested) sublists.
    fn is_next_line_list(&self) -> bool {
        self.is_next_line_new_entry()
            || (self.is_next_line_still_indented()
                && self
                    .entries
                    .last()
                    .and_then(|entry| entry.sublist.as_ref())
                    .is_some_and(|sublist| sublist.is_next_line_list()))
    }
}

impl ParserNode for List {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        cursor.column == 0
            && LIST_TYPES
                .iter()
                .any(|t| t.initial_start.is_match(&cursor.current_line))
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        if self.list_type.is_none() {
            self.list_type = LIST_TYPES
                .iter()
                .find(|t| t.initial_start.is_match(&cursor.current_line));
        }
        let list_type = self.list_type.expect("list type selected at start");
        let indentation = list_type.indentation;

        match self.state {
            State::Start => {
                if cursor.column == 0 {
                    self.current_line_backup = cursor.current_line.clone();
                    self.next_line_backup = cursor.next_line.clone();
                }
                let marker_len = list_type
                    .start
                    .find(&self.current_line_backup)
                    .map(|m| m.as_str().chars().count())
                    .expect("entry marker present in start state");
                if marker_len as i32 - 1 == cursor.column {
                    self.state = State::Content;
                    self.content_state = ContentState::Text;
                    self.entries.push(Entry {
                        text_only: Some(BasicText::new(Vec::new(), true)),
                        blocks: Vec::new(),
                        sublist: None,
                    });
                    cursor.current_line = strip_chars(&self.current_line_backup, marker_len);
                    self.current_line_backup = cursor.current_line.clone();
                    cursor.column -= marker_len as i32;
                }
            }
            State::Whitespace => {
                self.parsed_indents += 1;
                if self.parsed_indents == indentation {
                    self.state = State::Content;
                    self.trim_next_line = true;
                    self.parsed_indents = 0;
                }
            }
            State::Content => {
                if self.trim_next_line {
                    cursor.current_line = strip_chars(&cursor.current_line, indentation);
                    self.current_line_backup = cursor.current_line.clone();
                    self.next_line_backup = cursor.next_line.clone();
                    cursor.column -= indentation as i32;
                    self.trim_next_line = false;
                }
                let at_newline = cursor.current_char == Some('\n');
                let still_indented = self.is_next_line_still_indented();
                let new_entry = self.is_next_line_new_entry();
                let nested = self.is_next_line_nested_list();
                if at_newline && !(still_indented || new_entry) {
                    if cursor.next_line_is_blank() {
                        self.state = State::BlankLine;
                    } else {
                        return ParseResult::Ended;
                    }
                } else {
                    match self.content_state {
                        ContentState::Text => {
                            self.current_entry()
                                .text_only
                                .as_mut()
                                .expect("text entry holds inline text")
                                .parse_char(cursor);
                            if at_newline {
                                if new_entry {
                                    self.state = State::Start;
                                } else if nested {
                                    self.state = State::Whitespace;
                                    self.is_new_line = true;
                                    self.content_state = ContentState::Sublist;
                                } else if is_blank_line(&self.current_line_backup)
                                    && still_indented
                                    && !new_entry
                                    && !nested
                                {
                                    // Blank line, then still-indented
                                    // content: this entry holds blocks.
                                    self.state = State::Whitespace;
                                    self.content_state = ContentState::Blocks;
                                    let entry = self.current_entry();
                                    let text =
                                        entry.text_only.take().expect("text entry holds inline text");
                                    let first_block = Block::with_child(
                                        Box::new(Paragraph::with_text(text)),
                                        &[ParserKind::List],
                                    );
                                    entry.blocks.push(first_block);
                                    self.make_new_block = true;
                                } else {
                                    self.state = State::Whitespace;
                                }
                            }
                        }
                        ContentState::Blocks => {
                            if at_newline {
                                self.state = State::Whitespace;
                                if new_entry {
                                    self.is_new_line = true;
                                    self.state = State::Start;
                                    self.content_state = ContentState::Text;
                                } else if nested {
                                    self.is_new_line = true;
                                    self.content_state = ContentState::Sublist;
                                }
                            }
                            if self.make_new_block {
                                let block = Block::new(&[ParserKind::List]);
                                if block.can_start(cursor) {
                                    self.current_entry().blocks.push(block);
                                } else if cursor.next_line_is_blank() {
                                    self.state = State::BlankLine;
                                } else {
                                    return ParseResult::Ended;
                                }
                            }
                            let result = self
                                .current_entry()
                                .blocks
                                .last_mut()
                                .expect("block entry holds a block")
                                .parse_char(cursor);
                            self.make_new_block = result == ParseResult::Ended;
                        }
                        ContentState::Sublist => {
                            if self.current_entry().sublist.is_none() {
                                self.current_entry().sublist = Some(Box::new(List::new()));
                            }
                            if self.is_new_line {
                                if still_indented {
                                    let next = self
                                        .next_line_backup
                                        .clone()
                                        .unwrap_or_default();
                                    cursor.next_line = Some(strip_chars(&next, indentation));
                                }
                                self.is_new_line = false;
                            }
                            if at_newline {
                                self.is_new_line = true;
                                if still_indented {
                                    self.state = State::Whitespace;
                                } else if new_entry {
                                    self.state = State::Start;
                                }
                            }
                            self.current_entry()
                                .sublist
                                .as_mut()
                                .expect("sublist just created")
                                .parse_char(cursor);
                            return ParseResult::Consumed;
                        }
                    }
                }
            }
            State::BlankLine => {
                if cursor.current_char == Some('\n') {
                    self.current_line_backup = cursor.current_line.clone();
                    self.next_line_backup = cursor.next_line.clone();
                    self.is_new_line = true;
                    if self.is_next_line_new_entry() {
                        self.state = State::Start;
                    } else if self.is_next_line_still_indented()
                        && self.entries.last().is_some_and(|e| e.sublist.is_some())
                    {
                        self.state = State::Whitespace;
                    } else if cursor.next_line_is_blank() {
                        // Consecutive blank lines, keep waiting.
                    } else {
                        return ParseResult::Ended;
                    }
                }
            }
        }
        ParseResult::Consumed
    }

    fn to_html(&self, data: &RedditData) -> String {
        let tag = self.list_type.map_or("ul", |t| t.tag);
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                let mut html = String::from("<li>");
                if let Some(text) = &entry.text_only {
                    html.push_str(text.to_html(data).trim());
                }
                html.push_str(
                    &entry
                        .blocks
                        .iter()
                        .map(|block| block.to_html(data))
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                );
                if let Some(sublist) = &entry.sublist {
                    html.push_str("\n\n");
                    html.push_str(&sublist.to_html(data));
                }
                html.push_str("</li>");
                html
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<{tag}>\n{entries}\n</{tag}>")
    }
}
