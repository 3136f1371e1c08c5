// ABOUTME: Configuration options for the channelcast pipeline including Options and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use channelcast_feed::Limits;

use crate::client::Client;
use crate::error::ScrapeError;
use crate::extractors::listing::ListingSelectors;
use crate::extractors::ChannelExtractor;
use crate::link::ResolveMode;

/// Site whose channel pages are turned into feeds unless configured otherwise.
pub const DEFAULT_ORIGIN: &str = "https://rumble.com";

/// Default deadline for fetching a channel page.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration options for the pipeline client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Scheme and host of the target site; links must point at this host.
    pub origin: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub limits: Limits,
    pub resolve_mode: ResolveMode,
    pub http_client: Option<reqwest::Client>,
    /// Selectors for the listing extractor, used when no custom extractor is set.
    pub selectors: ListingSelectors,
    /// Extraction strategy; the listing extractor over `selectors` when unset.
    pub extractor: Option<Arc<dyn ChannelExtractor>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("channelcast/", env!("CARGO_PKG_VERSION")).to_string(),
            headers: HashMap::new(),
            limits: Limits::unlimited(),
            resolve_mode: ResolveMode::Canonical,
            http_client: None,
            selectors: ListingSelectors::default(),
            extractor: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the target origin, e.g. "https://rumble.com".
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.opts.origin = origin.into();
        self
    }

    /// Set the fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Set the text-length and item-count limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.opts.limits = limits;
        self
    }

    /// Set how caller links are matched against the origin.
    pub fn resolve_mode(mut self, mode: ResolveMode) -> Self {
        self.opts.resolve_mode = mode;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Use custom selectors with the listing extractor.
    pub fn selectors(mut self, selectors: ListingSelectors) -> Self {
        self.opts.selectors = selectors;
        self
    }

    /// Use a custom extraction strategy.
    pub fn extractor(mut self, extractor: Arc<dyn ChannelExtractor>) -> Self {
        self.opts.extractor = Some(extractor);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ScrapeError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
