// ABOUTME: Core feed library for channelcast: turns scraped listing records into an RSS feed.
// ABOUTME: Provides the data model, duration/time parsing, normalization, assembly, and encoding.

pub mod assemble;
pub mod config;
pub mod duration_parse;
pub mod encode;
pub mod error;
pub mod models;
pub mod normalize;
pub mod time_parse;

pub use assemble::{assemble_feed, FeedIdentity, FeedOverrides};
pub use config::Limits;
pub use duration_parse::parse_duration_seconds;
pub use encode::{encode_feed, encode_feed_to, RSS_CONTENT_TYPE};
pub use error::{DurationComponent, DurationError, FeedError, PublishTimeError};
pub use models::{
    ChannelMetadata, ChannelRequest, Feed, FeedItem, NormalizedVideoRecord, RawVideoRecord,
};
pub use normalize::{absolutize_link, truncate_text, Normalizer};
pub use time_parse::{parse_caller_time, parse_publish_time, PUBLISH_TIME_LAYOUT};
