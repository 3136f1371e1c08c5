// ABOUTME: Feed assembly from channel metadata and normalized records.
// ABOUTME: Selects one identity source (scraped page or caller overrides) for all feed-level fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChannelMetadata, ChannelRequest, Feed, FeedItem, NormalizedVideoRecord};
use crate::normalize::{UNKNOWN_DESCRIPTION, UNKNOWN_TITLE};

/// Caller-supplied feed identity. Unset fields fall back to sentinels or the fetch time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeedOverrides {
    /// True when no override field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.published_at.is_none()
            && self.updated_at.is_none()
    }
}

/// Where the feed's title, link, description and timestamps come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedIdentity {
    /// Everything is derived from the fetched page and the fetch time.
    #[default]
    Scraped,
    /// Everything is taken from the caller, with the caller's resolved link as the feed link.
    Caller(FeedOverrides),
}

impl FeedIdentity {
    /// Caller identity when any override is present, scraped identity otherwise.
    pub fn from_overrides(overrides: FeedOverrides) -> Self {
        if overrides.is_empty() {
            FeedIdentity::Scraped
        } else {
            FeedIdentity::Caller(overrides)
        }
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Maps a normalized record onto a feed item.
pub fn feed_item(record: NormalizedVideoRecord) -> FeedItem {
    FeedItem {
        title: record.title,
        link: record.link,
        description: record.description,
        published_at: record.publish_time,
        duration_seconds: record.duration_seconds,
        image_url: (!record.thumbnail_url.is_empty()).then_some(record.thumbnail_url),
        is_live: record.is_live,
    }
}

/// Builds the feed model.
///
/// Items keep the order of `records`. `fetched_at` stands in for any timestamp the
/// chosen identity does not provide.
pub fn assemble_feed(
    request: &ChannelRequest,
    channel: &ChannelMetadata,
    records: Vec<NormalizedVideoRecord>,
    identity: &FeedIdentity,
    fetched_at: DateTime<Utc>,
) -> Feed {
    let (title, link, description, published_at, updated_at) = match identity {
        FeedIdentity::Scraped => (
            channel.title.clone(),
            channel.canonical_link.clone(),
            channel.description.clone(),
            fetched_at,
            fetched_at,
        ),
        FeedIdentity::Caller(overrides) => (
            non_empty_or(overrides.title.as_deref(), UNKNOWN_TITLE),
            request.resolved_link.clone(),
            non_empty_or(overrides.description.as_deref(), UNKNOWN_DESCRIPTION),
            overrides.published_at.unwrap_or(fetched_at),
            overrides.updated_at.unwrap_or(fetched_at),
        ),
    };

    Feed {
        title,
        link,
        description,
        published_at,
        updated_at,
        image_url: channel.thumbnail_url.clone().filter(|u| !u.is_empty()),
        items: records.into_iter().map(feed_item).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn request() -> ChannelRequest {
        ChannelRequest {
            raw_link: "rumble.com/c/acme/videos".to_string(),
            resolved_link: "https://rumble.com/c/acme/videos".to_string(),
            resolved_host: "rumble.com".to_string(),
            channel_path: "/c/acme".to_string(),
        }
    }

    fn channel() -> ChannelMetadata {
        ChannelMetadata {
            title: "Acme".to_string(),
            description: "Acme videos".to_string(),
            thumbnail_url: Some("https://img/acme.jpg".to_string()),
            canonical_link: "https://rumble.com/c/acme".to_string(),
        }
    }

    fn record(title: &str, duration: Option<u64>, thumb: &str) -> NormalizedVideoRecord {
        NormalizedVideoRecord {
            title: title.to_string(),
            description: "d".to_string(),
            duration_seconds: duration,
            thumbnail_url: thumb.to_string(),
            link: format!("https://rumble.com/{}.html", title),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn scraped_identity_uses_page_metadata() {
        let feed = assemble_feed(&request(), &channel(), vec![], &FeedIdentity::Scraped, now());
        assert_eq!(feed.title, "Acme");
        assert_eq!(feed.link, "https://rumble.com/c/acme");
        assert_eq!(feed.description, "Acme videos");
        assert_eq!(feed.published_at, now());
        assert_eq!(feed.updated_at, now());
        assert_eq!(feed.image_url.as_deref(), Some("https://img/acme.jpg"));
    }

    #[test]
    fn scraped_identity_passes_empty_title_through() {
        let mut meta = channel();
        meta.title = String::new();
        let feed = assemble_feed(&request(), &meta, vec![], &FeedIdentity::Scraped, now());
        assert_eq!(feed.title, "");
    }

    #[test]
    fn caller_identity_governs_all_identity_fields() {
        let published = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let identity = FeedIdentity::Caller(FeedOverrides {
            title: Some("My Feed".to_string()),
            description: None,
            published_at: Some(published),
            updated_at: None,
        });
        let feed = assemble_feed(&request(), &channel(), vec![], &identity, now());
        assert_eq!(feed.title, "My Feed");
        assert_eq!(feed.link, "https://rumble.com/c/acme/videos");
        assert_eq!(feed.description, UNKNOWN_DESCRIPTION);
        assert_eq!(feed.published_at, published);
        assert_eq!(feed.updated_at, now());
        assert_eq!(feed.image_url.as_deref(), Some("https://img/acme.jpg"));
    }

    #[test]
    fn empty_overrides_mean_scraped_identity() {
        assert_eq!(FeedIdentity::from_overrides(FeedOverrides::default()), FeedIdentity::Scraped);
        let overrides = FeedOverrides {
            title: Some(String::new()),
            ..Default::default()
        };
        let identity = FeedIdentity::from_overrides(overrides);
        let feed = assemble_feed(&request(), &channel(), vec![], &identity, now());
        assert_eq!(feed.title, UNKNOWN_TITLE);
    }

    #[test]
    fn items_keep_order_and_annotations() {
        let records = vec![
            record("a", Some(225), "https://img/a.jpg"),
            record("b", Some(0), ""),
            record("c", None, ""),
        ];
        let feed = assemble_feed(&request(), &channel(), records, &FeedIdentity::Scraped, now());
        let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(feed.items[0].duration_seconds, Some(225));
        assert_eq!(feed.items[0].image_url.as_deref(), Some("https://img/a.jpg"));
        assert_eq!(feed.items[1].duration_seconds, Some(0));
        assert_eq!(feed.items[1].image_url, None);
        assert_eq!(feed.items[2].duration_seconds, None);
    }
}
