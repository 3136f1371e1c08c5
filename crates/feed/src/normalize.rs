// ABOUTME: Record normalization: sentinel defaults, text truncation, link resolution, and parsing.
// ABOUTME: Per-item duration and publish-time failures are logged and defaulted, never fatal.

use url::Url;

use crate::config::Limits;
use crate::duration_parse::parse_duration_seconds;
use crate::models::{ChannelMetadata, NormalizedVideoRecord, RawVideoRecord};
use crate::time_parse::parse_publish_time;

/// Title used when a listing item has none.
pub const UNKNOWN_TITLE: &str = "unknown title";
/// Description used when a listing item has none.
pub const UNKNOWN_DESCRIPTION: &str = "unknown description";
/// Appended to text cut at the configured maximum length.
pub const ELLIPSIS: &str = "...";

/// Cuts `text` to `max_len` characters and appends [`ELLIPSIS`].
///
/// Text of at most `max_len` characters is returned unchanged, as is any text when
/// `max_len` is zero. The marker is not counted against the limit.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Makes `link` absolute against `origin` ("https://host").
///
/// Absolute links pass through untouched and an empty link becomes the bare origin.
pub fn absolutize_link(origin: &str, link: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let link = link.trim();
    if link.is_empty() {
        return origin.to_string();
    }
    if is_absolute(link) {
        return link.to_string();
    }

    match Url::parse(origin).and_then(|base| base.join(link)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) if link.starts_with('/') => format!("{}{}", origin, link),
        Err(_) => format!("{}/{}", origin, link),
    }
}

fn is_absolute(link: &str) -> bool {
    Url::parse(link).map(|u| u.has_host()).unwrap_or(false)
}

fn default_if_empty(text: &str, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// Applies defaults, limits and parsing to raw listing records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    origin: String,
    limits: Limits,
}

impl Normalizer {
    /// Creates a normalizer resolving relative links against `origin`.
    pub fn new(origin: impl Into<String>, limits: Limits) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        Self { origin, limits }
    }

    /// Makes the channel thumbnail absolute; an empty thumbnail becomes `None`.
    pub fn normalize_channel(&self, channel: ChannelMetadata) -> ChannelMetadata {
        let thumbnail_url = channel
            .thumbnail_url
            .filter(|src| !src.trim().is_empty())
            .map(|src| absolutize_link(&self.origin, &src));
        ChannelMetadata {
            thumbnail_url,
            ..channel
        }
    }

    /// Normalizes a single record.
    pub fn normalize(&self, raw: &RawVideoRecord) -> NormalizedVideoRecord {
        let max_len = self.limits.max_text_length;
        let title = truncate_text(&default_if_empty(&raw.title, UNKNOWN_TITLE), max_len);
        let description = truncate_text(
            &default_if_empty(&raw.description, UNKNOWN_DESCRIPTION),
            max_len,
        );
        let link = absolutize_link(&self.origin, &raw.link);

        let duration_seconds = if raw.duration_text.is_empty() {
            None
        } else {
            match parse_duration_seconds(&raw.duration_text) {
                Ok(secs) => Some(secs),
                Err(err) => {
                    tracing::warn!(
                        link = %link,
                        duration = %raw.duration_text,
                        error = %err,
                        "unparseable duration badge, using zero"
                    );
                    Some(0)
                }
            }
        };

        let publish_time = if raw.publish_time_text.is_empty() {
            None
        } else {
            match parse_publish_time(&raw.publish_time_text) {
                Ok(dt) => Some(dt),
                Err(err) => {
                    tracing::warn!(
                        link = %link,
                        publish_time = %raw.publish_time_text,
                        error = %err,
                        "unparseable publish time, leaving it unset"
                    );
                    None
                }
            }
        };

        let thumbnail_url = if raw.thumbnail_url.is_empty() {
            String::new()
        } else {
            absolutize_link(&self.origin, &raw.thumbnail_url)
        };

        NormalizedVideoRecord {
            title,
            description,
            duration_text: raw.duration_text.clone(),
            duration_seconds,
            is_live: raw.is_live,
            publish_time_text: raw.publish_time_text.clone(),
            publish_time,
            thumbnail_url,
            link,
        }
    }

    /// Normalizes records in order, keeping at most the configured item count.
    pub fn normalize_all<'a, I>(&self, records: I) -> Vec<NormalizedVideoRecord>
    where
        I: IntoIterator<Item = &'a RawVideoRecord>,
    {
        let cap = self.limits.item_cap().unwrap_or(usize::MAX);
        records
            .into_iter()
            .take(cap)
            .map(|raw| self.normalize(raw))
            .collect()
    }
}
