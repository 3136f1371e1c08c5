// ABOUTME: Extraction strategies that turn a parsed channel page into metadata and raw records.
// ABOUTME: Defines the ChannelExtractor trait; the listing strategy targets the default site markup.

//! Page extraction.
//!
//! The rest of the pipeline only sees [`ExtractedPage`], so supporting a
//! different page layout means providing another [`ChannelExtractor`].
//!
//! Submodules:
//! - `listing`: selector-driven extractor for channel listing pages.

use std::fmt;

use channelcast_feed::{ChannelMetadata, RawVideoRecord};
use scraper::Html;

use crate::error::ScrapeError;

pub mod listing;

/// What an extractor produces from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub channel: ChannelMetadata,
    /// Listing items in document order.
    pub videos: Vec<RawVideoRecord>,
}

/// Produces channel metadata and raw video records from a parsed page.
pub trait ChannelExtractor: Send + Sync + fmt::Debug {
    /// Extracts at most `max_items` records (all when `None`) in document order.
    ///
    /// Missing nodes yield empty fields rather than errors.
    fn extract(
        &self,
        doc: &Html,
        canonical_link: &str,
        max_items: Option<usize>,
    ) -> Result<ExtractedPage, ScrapeError>;
}
