// ABOUTME: The Client that runs the scrape-to-feed pipeline for one channel link.
// ABOUTME: Resolves the link, fetches and parses the page, extracts, normalizes, assembles, and encodes.

use std::sync::Arc;
use std::time::Instant;

use channelcast_feed::{
    assemble_feed, encode_feed, ChannelRequest, Feed, FeedIdentity, Normalizer,
};
use chrono::{DateTime, Utc};
use scraper::Html;

use crate::error::ScrapeError;
use crate::extractors::listing::ListingExtractor;
use crate::extractors::ChannelExtractor;
use crate::link::LinkResolver;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions};

/// The pipeline client. Holds only read-only configuration, so one instance
/// can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    resolver: LinkResolver,
    normalizer: Normalizer,
    extractor: Arc<dyn ChannelExtractor>,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let resolver = LinkResolver::new(&opts.origin, opts.resolve_mode)?;
        let normalizer = Normalizer::new(resolver.origin(), opts.limits);

        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        &opts.origin,
                        "Configure",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        let extractor: Arc<dyn ChannelExtractor> = match opts.extractor.clone() {
            Some(extractor) => extractor,
            None => Arc::new(ListingExtractor::new(opts.selectors.clone())?),
        };

        Ok(Self {
            opts,
            http_client,
            resolver,
            normalizer,
            extractor,
        })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// The target origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.resolver.origin()
    }

    /// Resolve a caller link into a channel request. Pure; performs no I/O.
    pub fn resolve(&self, link: Option<&str>) -> Result<ChannelRequest, ScrapeError> {
        self.resolver.resolve(link)
    }

    /// Fetch the channel page and decode it to text.
    pub async fn fetch_page(&self, request: &ChannelRequest) -> Result<String, ScrapeError> {
        let url = request.canonical_link(self.origin());
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            timeout: self.opts.timeout,
        };
        let result = fetch(&self.http_client, &url, &fetch_opts).await?;
        Ok(result.text_utf8())
    }

    /// Run extraction, normalization and assembly over an already-fetched page.
    pub fn build_feed(
        &self,
        request: &ChannelRequest,
        html: &str,
        identity: &FeedIdentity,
        fetched_at: DateTime<Utc>,
    ) -> Result<Feed, ScrapeError> {
        let canonical_link = request.canonical_link(self.origin());
        let doc = Html::parse_document(html);

        let page = self
            .extractor
            .extract(&doc, &canonical_link, self.opts.limits.item_cap())?;
        let channel = self.normalizer.normalize_channel(page.channel);
        let records = self.normalizer.normalize_all(&page.videos);

        Ok(assemble_feed(
            request,
            &channel,
            records,
            identity,
            fetched_at,
        ))
    }

    /// Build a feed for a caller link, fetching the channel page.
    pub async fn feed(
        &self,
        link: Option<&str>,
        identity: &FeedIdentity,
    ) -> Result<Feed, ScrapeError> {
        let start = Instant::now();
        let request = self.resolve(link)?;
        let html = self.fetch_page(&request).await?;
        let feed = self.build_feed(&request, &html, identity, Utc::now())?;

        tracing::info!(
            channel = %request.channel_path,
            items = feed.items.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built feed"
        );
        Ok(feed)
    }

    /// Build a feed for a caller link from page HTML that was obtained elsewhere.
    pub fn feed_from_html(
        &self,
        html: &str,
        link: Option<&str>,
        identity: &FeedIdentity,
    ) -> Result<Feed, ScrapeError> {
        let request = self.resolve(link)?;
        self.build_feed(&request, html, identity, Utc::now())
    }

    /// Encode a feed as RSS.
    pub fn encode(&self, feed: &Feed) -> Result<String, ScrapeError> {
        encode_feed(feed).map_err(|e| ScrapeError::encode(&feed.link, "Encode", Some(e.into())))
    }

    /// Build and encode the feed for a caller link.
    pub async fn render(
        &self,
        link: Option<&str>,
        identity: &FeedIdentity,
    ) -> Result<String, ScrapeError> {
        let feed = self.feed(link, identity).await?;
        self.encode(&feed)
    }
}
