// ABOUTME: Selector-driven extractor for channel listing pages.
// ABOUTME: Reads the channel header and each listing item's title, badge, time, link, and thumbnail.

use channelcast_feed::{ChannelMetadata, RawVideoRecord};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::extractors::{ChannelExtractor, ExtractedPage};

/// A selector plus the attribute to read from its first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrSelector {
    pub css: String,
    pub attr: String,
}

impl AttrSelector {
    pub fn new(css: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            attr: attr.into(),
        }
    }
}

/// Selectors describing a channel listing page.
///
/// Item selectors are evaluated relative to each listing item; header selectors
/// relative to the header element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSelectors {
    pub header: String,
    pub header_title: String,
    pub header_thumbnail: AttrSelector,
    pub channel_description: AttrSelector,
    pub item: String,
    pub item_title: String,
    pub item_description: String,
    pub item_duration: String,
    pub item_publish_time: AttrSelector,
    pub item_link: AttrSelector,
    pub item_thumbnail: AttrSelector,
    pub item_live_marker: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            header: "div.channel-header--content".to_string(),
            header_title: "div.channel-header--title h1".to_string(),
            header_thumbnail: AttrSelector::new("div.channel-header--thumb img", "src"),
            channel_description: AttrSelector::new("meta[name=\"description\"]", "content"),
            item: "section.channel-listing__container div.videostream.thumbnail__grid--item"
                .to_string(),
            item_title: "h3.thumbnail__title".to_string(),
            item_description: "div.videostream__description".to_string(),
            item_duration: "div.videostream__badge".to_string(),
            item_publish_time: AttrSelector::new("div.videostream__data time", "datetime"),
            item_link: AttrSelector::new("a.videostream__link", "href"),
            item_thumbnail: AttrSelector::new("img.thumbnail__image", "src"),
            item_live_marker: ".videostream__status--live".to_string(),
        }
    }
}

/// Extracts listing pages with a configurable [`ListingSelectors`] set.
///
/// Selectors are compiled once at construction, so a bad selector is reported
/// before any page is fetched.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    selectors: ListingSelectors,
    compiled: Compiled,
}

#[derive(Debug, Clone)]
struct Compiled {
    header: Selector,
    header_title: Selector,
    header_thumbnail: Selector,
    channel_description: Selector,
    item: Selector,
    item_title: Selector,
    item_description: Selector,
    item_duration: Selector,
    item_publish_time: Selector,
    item_link: Selector,
    item_thumbnail: Selector,
    item_live_marker: Selector,
}

impl Compiled {
    fn new(s: &ListingSelectors) -> Result<Self, ScrapeError> {
        Ok(Self {
            header: compile(&s.header)?,
            header_title: compile(&s.header_title)?,
            header_thumbnail: compile(&s.header_thumbnail.css)?,
            channel_description: compile(&s.channel_description.css)?,
            item: compile(&s.item)?,
            item_title: compile(&s.item_title)?,
            item_description: compile(&s.item_description)?,
            item_duration: compile(&s.item_duration)?,
            item_publish_time: compile(&s.item_publish_time.css)?,
            item_link: compile(&s.item_link.css)?,
            item_thumbnail: compile(&s.item_thumbnail.css)?,
            item_live_marker: compile(&s.item_live_marker)?,
        })
    }
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| {
        ScrapeError::extract(
            "",
            "Configure",
            Some(anyhow::anyhow!("invalid selector {:?}: {}", css, e)),
        )
    })
}

impl ListingExtractor {
    /// Compiles `selectors`; fails with an Extract error naming the first invalid one.
    pub fn new(selectors: ListingSelectors) -> Result<Self, ScrapeError> {
        let compiled = Compiled::new(&selectors)?;
        Ok(Self {
            selectors,
            compiled,
        })
    }

    fn extract_channel(&self, doc: &Html, canonical_link: &str) -> ChannelMetadata {
        let c = &self.compiled;
        let header = doc.select(&c.header).next();

        let title = header
            .and_then(|h| first_text(h, &c.header_title))
            .unwrap_or_default();
        let thumbnail_url = header
            .and_then(|h| first_attr(h, &c.header_thumbnail, &self.selectors.header_thumbnail.attr))
            .filter(|src| !src.is_empty());
        let description = doc
            .select(&c.channel_description)
            .find_map(|el| el.value().attr(&self.selectors.channel_description.attr))
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        ChannelMetadata {
            title,
            description,
            thumbnail_url,
            canonical_link: canonical_link.to_string(),
        }
    }

    fn extract_item(&self, item: ElementRef<'_>) -> RawVideoRecord {
        let c = &self.compiled;
        let s = &self.selectors;
        RawVideoRecord {
            title: first_text(item, &c.item_title).unwrap_or_default(),
            description: first_text(item, &c.item_description).unwrap_or_default(),
            duration_text: first_text(item, &c.item_duration).unwrap_or_default(),
            is_live: item.select(&c.item_live_marker).next().is_some(),
            publish_time_text: first_attr(item, &c.item_publish_time, &s.item_publish_time.attr)
                .unwrap_or_default(),
            thumbnail_url: first_attr(item, &c.item_thumbnail, &s.item_thumbnail.attr)
                .unwrap_or_default(),
            link: first_attr(item, &c.item_link, &s.item_link.attr).unwrap_or_default(),
        }
    }
}

impl ChannelExtractor for ListingExtractor {
    fn extract(
        &self,
        doc: &Html,
        canonical_link: &str,
        max_items: Option<usize>,
    ) -> Result<ExtractedPage, ScrapeError> {
        let channel = self.extract_channel(doc, canonical_link);

        let videos = doc
            .select(&self.compiled.item)
            .take(max_items.unwrap_or(usize::MAX))
            .map(|item| self.extract_item(item))
            .collect();

        Ok(ExtractedPage { channel, videos })
    }
}

/// Trimmed text of the first match under `scope`.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Trimmed attribute of the first match under `scope`.
fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
}
