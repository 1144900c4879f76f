// reddit-markdown — Reddit-flavored Markdown to HTML renderer.
//
// Architecture:
//   markdown string → outer blank-line trim → character-stepping parse
//   (a tree of parser nodes over one shared cursor) → HTML render
//
// The grammar is recognized in a single left-to-right pass: every
// character is fed to exactly one active node, and plain text doubles
// as a one-character-deferred fallback so styled spans and links get
// first refusal. Malformed constructs never fail the parse; they
// degrade to literal text the way Reddit renders them.

mod block;
mod cursor;
mod escape;
mod inline;
mod media;
mod node;

pub use media::{MediaDisplayPolicy, MediaEntry, MediaVariant, RedditData};

use cursor::Cursor;
use node::{ChildSpec, Composite};

/// Render Reddit-flavored Markdown to an HTML fragment.
///
/// # Examples
///
/// ```
/// let html = reddit_markdown::parse_markdown("Hello **reddit**");
/// assert_eq!(html, "<p>Hello <strong>reddit</strong></p>");
/// ```
pub fn parse_markdown(markdown: &str) -> String {
    parse_markdown_with(markdown, &RedditData::default())
}

/// Render Reddit-flavored Markdown with API side-channel data, which
/// resolves `![alt](mediaId)` references through `media_metadata` and
/// applies the configured media display policy.
///
/// # Examples
///
/// ```
/// use reddit_markdown::{parse_markdown_with, RedditData};
///
/// let html = parse_markdown_with("> quoted", &RedditData::default());
/// assert_eq!(html, "<blockquote>\n<p>quoted</p>\n</blockquote>");
/// ```
pub fn parse_markdown_with(markdown: &str, data: &RedditData) -> String {
    let markdown = trim_outer_blank_lines(markdown);
    #[cfg(feature = "tracing")]
    tracing::debug!(chars = markdown.chars().count(), "parsing markdown");
    let mut cursor = Cursor::new(markdown, data);
    let mut root = Composite::new(vec![ChildSpec::Block { excluded: Vec::new() }])
        .repeating()
        .joined_with("\n\n");
    while !cursor.at_end() {
        root.parse_char(&mut cursor);
        cursor.advance();
    }
    root.html(data)
}

/// Strip leading blank lines and reduce trailing blank space to at most
/// one newline, leaving interior whitespace untouched.
fn trim_outer_blank_lines(text: &str) -> &str {
    let leading_ws = text.len() - text.trim_start().len();
    let start = text[..leading_ws].rfind('\n').map_or(0, |i| i + 1);
    let after_content = text.trim_end().len();
    let suffix = &text[after_content..];
    let end = if suffix.ends_with('\n') {
        after_content
    } else if let Some(i) = suffix.find('\n') {
        after_content + i + 1
    } else {
        text.len()
    };
    if start >= end {
        ""
    } else {
        &text[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_markdown(""), "");
        assert_eq!(parse_markdown("  \n\n \n"), "");
    }

    #[test]
    fn test_simple_paragraph() {
        assert_eq!(parse_markdown("hello"), "<p>hello</p>");
    }

    #[test]
    fn test_trim_outer_blank_lines() {
        assert_eq!(trim_outer_blank_lines("\n\n  \na"), "a");
        assert_eq!(trim_outer_blank_lines("a\n  \n\n"), "a");
        assert_eq!(trim_outer_blank_lines("a\n   "), "a\n");
        assert_eq!(trim_outer_blank_lines("a   "), "a   ");
        assert_eq!(trim_outer_blank_lines("  a  "), "  a  ");
    }

    #[test]
    fn test_paragraph_separation() {
        assert_eq!(parse_markdown("one\n\ntwo"), "<p>one</p>\n\n<p>two</p>");
    }

    #[test]
    fn test_soft_wrapped_paragraph() {
        assert_eq!(parse_markdown("one\ntwo"), "<p>one two</p>");
    }
}
