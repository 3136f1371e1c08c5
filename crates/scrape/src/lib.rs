// ABOUTME: Main library entry point for the channelcast scrape pipeline.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Options, ScrapeError, ErrorCode, and extractors.

//! Channelcast - turns a video channel's listing page into a podcast-style RSS feed.
//!
//! This crate resolves a caller's channel link, fetches the channel page from the
//! target site, extracts channel metadata and listing items, and hands them to
//! `channelcast-feed` for normalization, assembly and encoding.
//!
//! # Example
//!
//! ```no_run
//! use channelcast_scrape::{Client, FeedIdentity, ScrapeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().build()?;
//!     let xml = client
//!         .render(Some("https://rumble.com/c/example"), &FeedIdentity::Scraped)
//!         .await?;
//!     println!("{}", xml);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod extractors;
pub mod link;
pub mod options;
pub mod resource;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::listing::{AttrSelector, ListingExtractor, ListingSelectors};
pub use crate::extractors::{ChannelExtractor, ExtractedPage};
pub use crate::link::{LinkResolver, ResolveMode};
pub use crate::options::{ClientBuilder, Options, DEFAULT_ORIGIN, DEFAULT_TIMEOUT};

pub use channelcast_feed::{Feed, FeedIdentity, FeedOverrides, Limits, RSS_CONTENT_TYPE};
