// Reddit-specific behavior: shorthand links, spoilers, and media
// resolved through API metadata.

use pretty_assertions::assert_eq;
use reddit_markdown::{
    parse_markdown, parse_markdown_with, MediaDisplayPolicy, MediaEntry, MediaVariant, RedditData,
};

fn media_data(id: &str) -> RedditData {
    let mut data = RedditData::default();
    data.media_metadata.insert(
        id.to_string(),
        MediaEntry {
            e: "Image".to_string(),
            id: id.to_string(),
            m: "image/png".to_string(),
            s: MediaVariant {
                x: 60,
                y: 60,
                u: Some("https://reddit.com/e.png".to_string()),
                ..MediaVariant::default()
            },
            status: "valid".to_string(),
            ..MediaEntry::default()
        },
    );
    data
}

#[test]
fn subreddit_shorthand() {
    assert_eq!(
        parse_markdown("visit r/AskReddit today"),
        "<p>visit <a href=\"/r/AskReddit\">r/AskReddit</a> today</p>"
    );
    assert_eq!(
        parse_markdown("/r/rust"),
        "<p><a href=\"/r/rust\">/r/rust</a></p>"
    );
}

#[test]
fn user_shorthand() {
    assert_eq!(
        parse_markdown("u/spez"),
        "<p><a href=\"/u/spez\">u/spez</a></p>"
    );
    assert_eq!(
        parse_markdown("/user/spez"),
        "<p><a href=\"/user/spez\">/user/spez</a></p>"
    );
}

#[test]
fn multireddit_reddit_com_suffix() {
    assert_eq!(
        parse_markdown("r/funny+reddit.com"),
        "<p><a href=\"/r/funny+reddit.com\">r/funny+reddit.com</a></p>"
    );
}

#[test]
fn spoiler_span() {
    assert_eq!(
        parse_markdown("the killer is >!the butler!<."),
        "<p>the killer is <span class=\"md-spoiler-text\">the butler</span>.</p>"
    );
}

#[test]
fn superscript_never_links() {
    assert_eq!(
        parse_markdown("^https://example.com"),
        "<p><sup>https://example.com</sup></p>"
    );
}

#[test]
fn table_header_cells_never_link() {
    assert_eq!(
        parse_markdown("|https://a.com|x|\n|-|-|\n|https://a.com|y|"),
        "<table><thead>\n<tr>\n<th>https://a.com</th>\n<th>x</th>\n</tr>\n</thead><tbody>\n<tr>\n<td><a href=\"https://a.com\">https://a.com</a></td>\n<td>y</td>\n</tr>\n</tbody></table>"
    );
}

#[test]
fn media_id_resolves_through_metadata() {
    let data = media_data("emote|t5_2qh0u|1234");
    assert_eq!(
        parse_markdown_with("![emote](emote|t5_2qh0u|1234)", &data),
        "<p><img src=\"https://reddit.com/e.png\" alt=\"emote\" width=\"60\" height=\"60\" data-media-id=\"emote|t5_2qh0u|1234\"></p>"
    );
}

#[test]
fn unknown_media_id_is_plain_text() {
    // No metadata entry, so the reference never parses as an image.
    assert_eq!(
        parse_markdown("![emote](abcdef)"),
        "<p>![emote](abcdef)</p>"
    );
}

#[test]
fn emote_only_policy_links_non_emotes() {
    let mut data = media_data("abc123");
    data.media_display_policy = MediaDisplayPolicy::EmoteOnly;
    assert_eq!(
        parse_markdown_with("![pic](abc123)", &data),
        "<p><a href=\"https://reddit.com/e.png\">pic</a></p>"
    );
}

#[test]
fn emote_only_policy_keeps_emotes_inline() {
    let mut data = media_data("emote|t5_2qh0u|1234");
    data.media_display_policy = MediaDisplayPolicy::EmoteOnly;
    assert_eq!(
        parse_markdown_with("![emote](emote|t5_2qh0u|1234)", &data),
        "<p><img src=\"https://reddit.com/e.png\" alt=\"emote\" width=\"60\" height=\"60\" data-media-id=\"emote|t5_2qh0u|1234\"></p>"
    );
}

#[test]
fn link_policy_links_everything() {
    let mut data = media_data("abc123");
    data.media_display_policy = MediaDisplayPolicy::Link;
    assert_eq!(
        parse_markdown_with("![pic](abc123)", &data),
        "<p><a href=\"https://reddit.com/e.png\">pic</a></p>"
    );
}

#[test]
fn gif_source_used_when_no_static_url() {
    let mut data = RedditData::default();
    data.media_metadata.insert(
        "gif1".to_string(),
        MediaEntry {
            s: MediaVariant {
                x: 0,
                y: 0,
                gif: Some("https://i.redd.it/a.gif".to_string()),
                ..MediaVariant::default()
            },
            ..MediaEntry::default()
        },
    );
    assert_eq!(
        parse_markdown_with("![g](gif1)", &data),
        "<p><img src=\"https://i.redd.it/a.gif\" alt=\"g\" data-media-id=\"gif1\"></p>"
    );
}

#[cfg(feature = "serde")]
#[test]
fn reddit_data_deserializes_from_api_json() {
    let json = r#"{
        "media_metadata": {
            "abc": {
                "e": "Image",
                "id": "abc",
                "m": "image/png",
                "p": [{"x": 108, "y": 108, "u": "https://preview.redd.it/small.png"}],
                "s": {"x": 960, "y": 540, "u": "https://preview.redd.it/full.png"},
                "status": "valid"
            }
        }
    }"#;
    let data: RedditData = serde_json::from_str(json).unwrap();
    assert_eq!(
        parse_markdown_with("![shot](abc)", &data),
        "<p><img src=\"https://preview.redd.it/full.png\" alt=\"shot\" width=\"960\" height=\"540\" data-media-id=\"abc\"></p>"
    );
}
