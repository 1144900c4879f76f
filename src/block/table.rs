// Pipe tables: a header row, a divider row of dashes (with optional
// alignment colons), then any number of body rows.
//
// Rows are parsed cell by cell with a small per-row state machine that
// the header and body phases share. A body row shorter than the header
// renders its last cell with a colspan stretching to the table edge.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cursor::Cursor;
use crate::inline::BasicText;
use crate::media::RedditData;
use crate::node::{ParseResult, ParserNode};

static PIPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[^\\])\|").unwrap());
static HEADER_ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|((.*[^\\]|)\|+) *\n").unwrap());
static DIVIDER_ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|([:\- ]*\|+)+ *(\n|$)").unwrap());
static EMPTY_ROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|\s*(\n|$)").unwrap());
static PIPE_EOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\| *\n").unwrap());
static CELL_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(. +|[^\\])\|").unwrap());
static ROW_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *\| *\n").unwrap());

fn count_row_pipes(line: Option<&str>) -> usize {
    line.map_or(0, |l| PIPE_RE.find_iter(l).count())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    Header,
    Divider,
    Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    Pipe,
    LeadingWs,
    Content,
    End,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DividerState {
    Pipe,
    FirstChar,
    Spacer,
    LastChar,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Header,
    Body,
}

pub(crate) struct Table {
    state: TableState,
    row_state: RowState,
    divider_state: DividerState,
    columns: usize,
    current_column: usize,
    current_row: usize,
    alignment: Vec<Option<Align>>,
    header_cells: Vec<BasicText>,
    body_rows: Vec<Vec<BasicText>>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            state: TableState::Header,
            row_state: RowState::Pipe,
            divider_state: DividerState::Pipe,
            columns: 0,
            current_column: 0,
            current_row: 0,
            alignment: Vec::new(),
            header_cells: Vec::new(),
            body_rows: Vec::new(),
        }
    }

    fn set_alignment(&mut self, column: usize, align: Align) {
        if self.alignment.len() <= column {
            self.alignment.resize(column + 1, None);
        }
        self.alignment[column] = Some(align);
    }

    fn start_cell(&mut self, kind: RowKind) {
        match kind {
            // Header cells never parse links.
            RowKind::Header => self.header_cells.push(BasicText::new(Vec::new(), false)),
            RowKind::Body => self.body_rows[self.current_row]
                .push(BasicText::new(Vec::new(), true)),
        }
    }

    fn parse_cell_char(&mut self, kind: RowKind, cursor: &mut Cursor<'_>) {
        let cell = match kind {
            RowKind::Header => self.header_cells.last_mut(),
            RowKind::Body => self.body_rows[self.current_row].last_mut(),
        };
        if let Some(cell) = cell {
            cell.parse_char(cursor);
        }
    }

    fn complete_column(&mut self, kind: RowKind) {
        match kind {
            RowKind::Header => self.columns += 1,
            RowKind::Body => self.current_column += 1,
        }
    }

    fn complete_row(&mut self, kind: RowKind, cursor: &Cursor<'_>) -> ParseResult {
        match kind {
            RowKind::Header => {
                self.state = TableState::Divider;
                ParseResult::Consumed
            }
            RowKind::Body => {
                if count_row_pipes(cursor.next_line.as_deref()) < 2 {
                    ParseResult::Ended
                } else {
                    self.current_row += 1;
                    self.current_column = 0;
                    self.row_state = RowState::Pipe;
                    self.body_rows.push(Vec::new());
                    ParseResult::Consumed
                }
            }
        }
    }

    fn parse_row_char(&mut self, kind: RowKind, cursor: &mut Cursor<'_>) -> ParseResult {
        match self.row_state {
            RowState::Pipe => {
                if EMPTY_ROW_RE.is_match(cursor.remaining()) {
                    self.row_state = RowState::Completed;
                } else {
                    self.start_cell(kind);
                    if cursor.remaining_char(1) == Some(' ') {
                        self.row_state = RowState::LeadingWs;
                    } else if cursor.remaining_char(1) == Some('|') {
                        self.complete_column(kind);
                        self.row_state = RowState::Pipe;
                    } else if PIPE_EOL_RE.is_match(cursor.remaining()) {
                        self.row_state = RowState::Completed;
                    } else {
                        self.row_state = RowState::Content;
                    }
                }
            }
            RowState::LeadingWs => {
                if cursor.remaining_char(1) == Some('|') {
                    self.row_state = RowState::Pipe;
                    self.complete_column(kind);
                } else if cursor.remaining_char(1) != Some(' ') {
                    self.row_state = RowState::Content;
                }
            }
            RowState::Content => {
                cursor.is_new_node = true;
                self.parse_cell_char(kind, cursor);
                if cursor.remaining_char(1) == Some('|') && cursor.current_char != Some('\\') {
                    self.row_state = RowState::Pipe;
                    self.complete_column(kind);
                } else if CELL_END_RE.is_match(cursor.remaining()) {
                    self.row_state = RowState::End;
                }
            }
            RowState::End => {
                if cursor.remaining_char(1) == Some('|') {
                    self.complete_column(kind);
                    if ROW_TAIL_RE.is_match(cursor.remaining()) {
                        self.row_state = RowState::Completed;
                    } else {
                        self.row_state = RowState::Pipe;
                    }
                }
            }
            RowState::Completed => {
                if cursor.current_char == Some('\n') {
                    return self.complete_row(kind, cursor);
                }
            }
        }
        ParseResult::Consumed
    }

    fn parse_divider_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        match self.divider_state {
            DividerState::Pipe => {
                if PIPE_EOL_RE.is_match(cursor.remaining()) {
                    self.divider_state = DividerState::Completed;
                } else {
                    self.divider_state = DividerState::FirstChar;
                }
            }
            DividerState::FirstChar => {
                if cursor.current_char == Some(':') {
                    self.set_alignment(self.current_column, Align::Left);
                    if cursor.remaining_char(2) == Some('|') {
                        self.divider_state = DividerState::LastChar;
                    } else {
                        self.divider_state = DividerState::Spacer;
                    }
                } else if cursor.remaining_char(1) == Some('|') {
                    self.divider_state = DividerState::Pipe;
                    self.current_column += 1;
                } else if cursor.remaining_char(2) == Some('|') {
                    self.divider_state = DividerState::LastChar;
                } else {
                    self.divider_state = DividerState::Spacer;
                }
            }
            DividerState::Spacer => {
                if cursor.remaining_char(2) == Some('|') {
                    self.divider_state = DividerState::LastChar;
                }
            }
            DividerState::LastChar => {
                if cursor.current_char == Some(':') {
                    let align = if self.alignment.get(self.current_column) == Some(&Some(Align::Left))
                    {
                        Align::Center
                    } else {
                        Align::Right
                    };
                    self.set_alignment(self.current_column, align);
                }
                self.divider_state = DividerState::Pipe;
                self.current_column += 1;
            }
            DividerState::Completed => {
                if cursor.current_char == Some('\n') {
                    if count_row_pipes(cursor.next_line.as_deref()) >= 2 {
                        self.row_state = RowState::Pipe;
                        self.state = TableState::Rows;
                        self.current_column = 0;
                        self.body_rows.push(Vec::new());
                    } else {
                        return ParseResult::Ended;
                    }
                }
            }
        }
        ParseResult::Consumed
    }
}

impl ParserNode for Table {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        count_row_pipes(Some(&cursor.current_line)) >= 2
            && count_row_pipes(cursor.next_line.as_deref()) >= 2
            && HEADER_ROW_RE.is_match(&cursor.current_line)
            && cursor
                .next_line
                .as_deref()
                .is_some_and(|line| DIVIDER_ROW_RE.is_match(line))
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        match self.state {
            TableState::Header => self.parse_row_char(RowKind::Header, cursor),
            TableState::Divider => self.parse_divider_char(cursor),
            TableState::Rows => self.parse_row_char(RowKind::Body, cursor),
        }
    }

    fn to_html(&self, data: &RedditData) -> String {
        let align_attr = |i: usize| -> String {
            self.alignment
                .get(i)
                .copied()
                .flatten()
                .map(|a| format!(" align=\"{}\"", a.as_str()))
                .unwrap_or_default()
        };
        let mut out = String::from("<table><thead>\n<tr>\n");
        for i in 0..self.columns {
            let cell = self
                .header_cells
                .get(i)
                .map(|c| c.to_html(data))
                .unwrap_or_default();
            out.push_str(&format!("<th{}>{}</th>\n", align_attr(i), cell));
        }
        out.push_str("</tr>\n</thead><tbody>\n");
        for row in &self.body_rows {
            out.push_str("<tr>\n");
            for i in 0..self.columns {
                let colspan = if row.get(i).is_none() && i + 1 != self.columns {
                    format!(" colspan=\"{}\"", self.columns - i)
                } else {
                    String::new()
                };
                let align = align_attr(i);
                let phantom_space = if !colspan.is_empty() && !align.is_empty() { " " } else { "" };
                let cell = row.get(i).map(|c| c.to_html(data)).unwrap_or_default();
                out.push_str(&format!(
                    "<td{}{}{}>{}</td>\n",
                    colspan, phantom_space, align, cell
                ));
                if !colspan.is_empty() {
                    break;
                }
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody></table>");
        out
    }
}
