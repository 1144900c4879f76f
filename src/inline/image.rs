// Inline images: `![alt](url "title")`.
//
// The target is either a direct URL (https or site-relative) or a media
// ID resolved through `media_metadata`. Direct URLs outside the allowed
// reddit domains, and any reference the display policy forbids, degrade
// to a plain link instead of an `<img>` tag.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::cursor::Cursor;
use crate::escape::{encode_uri, escape_attr};
use crate::media::{MediaDisplayPolicy, RedditData};
use crate::node::{ParseResult, ParserNode};

static IMG_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^!\[.*\]\(((?:https://|/)(?:[^)]|\\\)|\\\()+)\)").unwrap());

static IMG_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)^!\[.*\]\(([\w|]+)(?: "[^"]*"| '[^']*')?\)"#).unwrap());

// Only these second-level domains may be embedded directly.
const ALLOWED_DOMAINS: &[&str] = &["redd.it", "reddit.com", "redditmedia.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Alt,
    Separation,
    Url,
    Title,
    End,
}

pub(crate) struct Image {
    state: State,
    title_quote: Option<char>,
    url: String,
    alt: String,
    title: String,
}

impl Image {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            title_quote: None,
            url: String::new(),
            alt: String::new(),
            title: String::new(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Last two DNS labels of an https URL's hostname, e.g.
/// `i.redd.it` → `redd.it`.
fn base_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    Some(labels[start..].join("."))
}

impl ParserNode for Image {
    fn can_start(&self, cursor: &Cursor<'_>) -> bool {
        let remaining = cursor.remaining();
        if !remaining.starts_with("![") {
            return false;
        }
        if !(cursor.previous_char.map_or(true, |c| !is_word_char(c)) || cursor.is_new_node) {
            return false;
        }
        if cursor.previous_char == Some('\\') {
            return false;
        }
        if IMG_URL_RE.is_match(remaining) {
            return true;
        }
        let metadata = &cursor.data().media_metadata;
        if !metadata.is_empty() {
            if let Some(captures) = IMG_ID_RE.captures(remaining) {
                return metadata.contains_key(&captures[1]);
            }
        }
        false
    }

    fn parse_char(&mut self, cursor: &mut Cursor<'_>) -> ParseResult {
        let current = cursor.current_char;
        match self.state {
            State::Start => {
                if current == Some('[') {
                    self.state = State::Alt;
                }
            }
            State::Alt => {
                if current == Some(']') && cursor.previous_char != Some('\\') {
                    self.state = State::Separation;
                } else {
                    self.alt.extend(current);
                }
            }
            State::Separation => {
                self.state = State::Url;
            }
            State::Url => {
                if current == Some(')') && cursor.previous_char != Some('\\') {
                    return ParseResult::Ended;
                } else if current == Some(' ') {
                    self.state = State::Title;
                } else {
                    self.url.extend(current);
                }
            }
            State::Title => {
                if self.title.is_empty()
                    && self.title_quote.is_none()
                    && matches!(current, Some('"') | Some('\''))
                {
                    self.title_quote = current;
                } else if self.title_quote.is_some() && current == self.title_quote {
                    self.state = State::End;
                } else if matches!(current, Some(')') | Some('\n')) {
                    return ParseResult::Ended;
                } else {
                    self.title.extend(current);
                }
            }
            State::End => {
                return ParseResult::Ended;
            }
        }
        ParseResult::Consumed
    }

    fn to_html(&self, data: &RedditData) -> String {
        let mut url = String::new();
        let mut dimensions: Option<(u32, u32)> = None;
        let mut media_id: Option<&str> = None;
        let mut use_link = false;
        let policy = data.media_display_policy;
        if let Some(media) = data.media_metadata.get(&self.url) {
            url = media.source_url().unwrap_or_default().to_string();
            media_id = Some(&self.url);
            if media.s.x > 0 && media.s.y > 0 {
                dimensions = Some((media.s.x, media.s.y));
            }
            if policy == MediaDisplayPolicy::EmoteOnly && !self.url.contains("emote|") {
                use_link = true;
            }
        } else if self.url.starts_with("https://") {
            match base_domain(&self.url) {
                Some(domain) if ALLOWED_DOMAINS.contains(&domain.as_str()) => {}
                _ => use_link = true,
            }
        }
        if policy == MediaDisplayPolicy::Link {
            use_link = true;
        }
        if url.is_empty() {
            url = self.url.clone();
        }

        let mut attributes: Vec<(&str, String)> = Vec::new();
        let mut inner_html = String::new();
        let tag;
        if use_link {
            tag = "a";
            attributes.push(("href", encode_uri(&url)));
            if !self.title.is_empty() {
                attributes.push(("title", self.title.clone()));
            }
            if !self.alt.is_empty() {
                inner_html = escape_attr(&self.alt);
            }
        } else {
            tag = "img";
            attributes.push(("src", encode_uri(&url)));
            if !self.title.is_empty() {
                attributes.push(("title", self.title.clone()));
            }
            if !self.alt.is_empty() {
                attributes.push(("alt", self.alt.clone()));
            }
            if let Some((width, height)) = dimensions {
                attributes.push(("width", width.to_string()));
                attributes.push(("height", height.to_string()));
            }
            if let Some(id) = media_id {
                attributes.push(("data-media-id", id.to_string()));
            }
        }
        let mut html = format!("<{tag}");
        for (key, value) in &attributes {
            html.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
        }
        if use_link {
            html.push_str(&format!(">{}</{}>", inner_html, tag));
        } else {
            html.push('>');
        }
        html
    }
}
