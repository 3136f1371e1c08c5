// ABOUTME: Command-line and environment configuration for the feed server.
// ABOUTME: Every flag has an environment fallback; builds the pipeline client from the parsed values.

use std::net::SocketAddr;
use std::time::Duration;

use channelcast_scrape::{Client, Limits, ScrapeError, DEFAULT_ORIGIN};
use clap::Parser;

/// Server configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "channelcast-server")]
#[command(about = "Serve podcast RSS feeds built from video channel pages")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "CHANNELCAST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Target site origin; channel links must point at its host.
    #[arg(long, env = "CHANNELCAST_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Upstream fetch timeout in seconds.
    #[arg(long = "timeout-secs", env = "CHANNELCAST_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Maximum characters kept from titles and descriptions (0 = unlimited).
    #[arg(long = "max-text-length", env = "CHANNELCAST_MAX_TEXT_LENGTH", default_value_t = 0)]
    pub max_text_length: usize,

    /// Maximum number of items per feed (0 = unlimited).
    #[arg(long = "max-items", env = "CHANNELCAST_MAX_ITEMS", default_value_t = 0)]
    pub max_items: usize,

    /// Log level used when RUST_LOG is unset.
    #[arg(long = "log-level", env = "CHANNELCAST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Allowed CORS origin; repeat for several. Any origin when absent.
    #[arg(long = "cors-origin", env = "CHANNELCAST_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

/// Errors raised while turning configuration into a running server.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid listen address {addr:?}: {source}")]
    Addr {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Client(#[from] ScrapeError),
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|source| ConfigError::Addr { addr, source })
    }

    pub fn limits(&self) -> Limits {
        Limits::new(self.max_text_length, self.max_items)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the shared pipeline client.
    pub fn client(&self) -> Result<Client, ConfigError> {
        let client = Client::builder()
            .origin(&self.origin)
            .timeout(self.timeout())
            .limits(self.limits())
            .build()?;
        Ok(client)
    }
}
