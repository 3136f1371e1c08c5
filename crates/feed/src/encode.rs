// ABOUTME: RSS 2.0 serialization of the feed model with iTunes podcast extensions.
// ABOUTME: Writes channel metadata, images, and per-item duration/image tags using quick-xml.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use crate::error::FeedError;
use crate::models::{Feed, FeedItem};

/// Namespace URI for the iTunes podcast extensions.
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// Value of the channel `<generator>` element.
pub const GENERATOR: &str = concat!("channelcast ", env!("CARGO_PKG_VERSION"));

/// MIME type to serve encoded feeds with.
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Serializes a feed into an RSS document string.
pub fn encode_feed(feed: &Feed) -> Result<String, FeedError> {
    let mut buf = Vec::new();
    encode_feed_to(feed, &mut buf)?;
    String::from_utf8(buf).map_err(FeedError::encode)
}

/// Serializes a feed into the given writer.
///
/// Fails before writing anything if an item has neither a title nor a
/// description, since RSS requires one of them.
pub fn encode_feed_to<W: Write>(feed: &Feed, out: W) -> Result<(), FeedError> {
    if let Some(pos) = feed
        .items
        .iter()
        .position(|i| i.title.is_empty() && i.description.is_empty())
    {
        return Err(FeedError::encode(format!(
            "item {} has neither title nor description",
            pos
        )));
    }

    let mut w = Writer::new_with_indent(out, b' ', 2);
    emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let rss = BytesStart::new("rss")
        .with_attributes([("version", "2.0"), ("xmlns:itunes", ITUNES_NAMESPACE)]);
    emit(&mut w, Event::Start(rss))?;
    emit(&mut w, Event::Start(BytesStart::new("channel")))?;

    text_element(&mut w, "title", &feed.title)?;
    text_element(&mut w, "link", &feed.link)?;
    text_element(&mut w, "description", &feed.description)?;
    text_element(&mut w, "generator", GENERATOR)?;
    text_element(&mut w, "pubDate", &feed.published_at.to_rfc2822())?;
    text_element(&mut w, "lastBuildDate", &feed.updated_at.to_rfc2822())?;

    if let Some(ref image) = feed.image_url {
        emit(&mut w, Event::Start(BytesStart::new("image")))?;
        text_element(&mut w, "url", image)?;
        text_element(&mut w, "title", &feed.title)?;
        text_element(&mut w, "link", &feed.link)?;
        emit(&mut w, Event::End(BytesEnd::new("image")))?;
        itunes_image(&mut w, image)?;
    }

    for item in &feed.items {
        write_item(&mut w, item)?;
    }

    emit(&mut w, Event::End(BytesEnd::new("channel")))?;
    emit(&mut w, Event::End(BytesEnd::new("rss")))?;
    w.get_mut().flush().map_err(FeedError::encode)
}

fn write_item<W: Write>(w: &mut Writer<W>, item: &FeedItem) -> Result<(), FeedError> {
    emit(w, Event::Start(BytesStart::new("item")))?;
    text_element(w, "title", &item.title)?;
    text_element(w, "link", &item.link)?;

    let guid = BytesStart::new("guid").with_attributes([("isPermaLink", "true")]);
    emit(w, Event::Start(guid))?;
    emit(w, Event::Text(BytesText::new(&item.link)))?;
    emit(w, Event::End(BytesEnd::new("guid")))?;

    text_element(w, "description", &item.description)?;
    if let Some(published) = item.published_at {
        text_element(w, "pubDate", &published.to_rfc2822())?;
    }
    if let Some(secs) = item.duration_seconds {
        text_element(w, "itunes:duration", &secs.to_string())?;
    }
    if let Some(ref image) = item.image_url {
        itunes_image(w, image)?;
    }
    emit(w, Event::End(BytesEnd::new("item")))
}

fn itunes_image<W: Write>(w: &mut Writer<W>, href: &str) -> Result<(), FeedError> {
    let image = BytesStart::new("itunes:image").with_attributes([("href", href)]);
    emit(w, Event::Empty(image))
}

fn text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<(), FeedError> {
    emit(w, Event::Start(BytesStart::new(name)))?;
    emit(w, Event::Text(BytesText::new(text)))?;
    emit(w, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(w: &mut Writer<W>, event: Event<'_>) -> Result<(), FeedError> {
    w.write_event(event).map_err(FeedError::encode)
}
