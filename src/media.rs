// Reddit API side-channel data consumed by the image parser.
//
// `media_metadata` mirrors the field of the same name on Reddit comment
// and post payloads: a map from media ID to an entry describing the
// uploaded asset and its scaled variants. Field names are kept as the API
// sends them so the optional serde derives round-trip API JSON directly.

use std::collections::HashMap;

/// How embedded media references are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MediaDisplayPolicy {
    /// Every media reference becomes a plain link.
    Link,
    /// Only `emote|`-keyed media render inline; everything else links.
    EmoteOnly,
    /// Images and GIFs render inline (default).
    #[default]
    ImageOrGif,
}

/// One resolution of a media asset.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaVariant {
    /// Width in pixels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: u32,
    /// Height in pixels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: u32,
    /// Static image URL.
    #[cfg_attr(feature = "serde", serde(default))]
    pub u: Option<String>,
    /// Animated GIF URL.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gif: Option<String>,
    /// MP4 URL.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp4: Option<String>,
}

/// One `media_metadata` entry.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaEntry {
    /// Media kind, e.g. `"Image"` or `"AnimatedImage"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub e: String,
    /// Media ID (also the map key).
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: String,
    /// MIME type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub m: String,
    /// Scaled-down variants, smallest first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub p: Vec<MediaVariant>,
    /// Source (full-size) variant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub s: MediaVariant,
    /// Processing status, `"valid"` for usable entries.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
    /// Title, present on some GIF entries.
    #[cfg_attr(feature = "serde", serde(default))]
    pub t: Option<String>,
}

impl MediaEntry {
    /// The URL the source variant resolves to, preferring the static image
    /// over the GIF.
    pub fn source_url(&self) -> Option<&str> {
        self.s.u.as_deref().or(self.s.gif.as_deref())
    }
}

/// Reddit-supplied context for one parse.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedditData {
    /// Media ID → entry, resolving `![alt](mediaId)` references.
    #[cfg_attr(feature = "serde", serde(default))]
    pub media_metadata: HashMap<String, MediaEntry>,
    /// Global display policy for media references.
    #[cfg_attr(feature = "serde", serde(default))]
    pub media_display_policy: MediaDisplayPolicy,
}
