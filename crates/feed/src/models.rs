// ABOUTME: Data model for the scrape-to-feed pipeline.
// ABOUTME: Channel requests, raw and normalized video records, channel metadata, and the feed model.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// A caller's link after resolution to a channel on the target host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRequest {
    /// The link exactly as the caller supplied it.
    pub raw_link: String,
    /// The caller's link as an absolute URL, with the scheme inferred when it was missing.
    pub resolved_link: String,
    /// Host the link resolved to (always the configured target host).
    pub resolved_host: String,
    /// Either `/name` or `/c/name`; never empty, always starts with '/'.
    pub channel_path: String,
}

impl ChannelRequest {
    /// The canonical channel URL for the given origin ("https://host").
    pub fn canonical_link(&self, origin: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), self.channel_path)
    }
}

/// One listing item as found in the page, before any defaulting or parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVideoRecord {
    pub title: String,
    pub description: String,
    pub duration_text: String,
    pub is_live: bool,
    /// ISO-8601 timestamp from the item's `<time datetime>` or empty.
    pub publish_time_text: String,
    pub thumbnail_url: String,
    pub link: String,
}

/// A listing item with defaults, truncation, link resolution and parsing applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedVideoRecord {
    pub title: String,
    pub description: String,
    pub duration_text: String,
    /// `None` when the badge was empty; `Some(0)` when it was present but unparseable.
    pub duration_seconds: Option<u64>,
    /// Captured for completeness; the RSS encoder has no element for it.
    pub is_live: bool,
    pub publish_time_text: String,
    /// `None` when the listing had no usable timestamp.
    pub publish_time: Option<DateTime<FixedOffset>>,
    pub thumbnail_url: String,
    /// Always an absolute URL.
    pub link: String,
}

impl NormalizedVideoRecord {
    /// Returns the textual fields as a raw record, e.g. to normalize again.
    pub fn to_raw(&self) -> RawVideoRecord {
        RawVideoRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            duration_text: self.duration_text.clone(),
            is_live: self.is_live,
            publish_time_text: self.publish_time_text.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            link: self.link.clone(),
        }
    }
}

/// Channel-level metadata read from the page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    /// Trimmed header title; passed through even when empty.
    pub title: String,
    /// The page's meta description, possibly empty.
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub canonical_link: String,
}

/// A single entry of the feed model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub duration_seconds: Option<u64>,
    pub image_url: Option<String>,
    pub is_live: bool,
}

/// The format-agnostic feed handed to the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub items: Vec<FeedItem>,
}
