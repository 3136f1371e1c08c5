// ABOUTME: Resolves caller-supplied links into a channel path on the target host.
// ABOUTME: Supports scheme inference, `/name` and `/c/name` channels, and a legacy exact-prefix mode.

use channelcast_feed::ChannelRequest;
use url::Url;

use crate::error::ScrapeError;

const OP: &str = "Resolve";

/// How caller links are matched against the target site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Parse the link as a URL, inferring `https://` when the scheme is missing.
    #[default]
    Canonical,
    /// Require the link to start with the configured origin verbatim.
    ExactPrefix,
}

/// Link resolver bound to one target origin.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    origin: String,
    host: String,
    mode: ResolveMode,
}

impl LinkResolver {
    /// Creates a resolver for `origin` (e.g. "https://rumble.com").
    pub fn new(origin: &str, mode: ResolveMode) -> Result<Self, ScrapeError> {
        let parsed = Url::parse(origin).map_err(|e| {
            ScrapeError::invalid_url(origin, "Configure", Some(anyhow::anyhow!("invalid origin: {}", e)))
        })?;
        let host = parsed
            .host_str()
            .ok_or_else(|| {
                ScrapeError::invalid_url(origin, "Configure", Some(anyhow::anyhow!("origin has no host")))
            })?
            .to_lowercase();

        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            host,
            mode,
        })
    }

    /// The target origin without a trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The target host, lowercased.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Resolves a caller link using the configured mode.
    pub fn resolve(&self, link: Option<&str>) -> Result<ChannelRequest, ScrapeError> {
        match self.mode {
            ResolveMode::Canonical => resolve_link(link, &self.host),
            ResolveMode::ExactPrefix => resolve_exact_prefix(link, &self.origin, &self.host),
        }
    }
}

/// Resolves a link whose host must equal `host`, inferring the scheme when absent.
pub fn resolve_link(link: Option<&str>, host: &str) -> Result<ChannelRequest, ScrapeError> {
    let raw = required(link)?;

    let url = parse_with_scheme_inference(raw).map_err(|e| {
        ScrapeError::invalid_url(raw, OP, Some(anyhow::anyhow!("unparseable link: {}", e)))
    })?;

    let resolved_host = url.host_str().unwrap_or_default().to_lowercase();
    if resolved_host != host.to_lowercase() {
        return Err(ScrapeError::wrong_host(
            raw,
            OP,
            Some(anyhow::anyhow!("link host must be {}", host)),
        ));
    }

    let channel_path =
        channel_path_from(url.path()).ok_or_else(|| ScrapeError::channel_not_found(raw, OP))?;

    Ok(ChannelRequest {
        raw_link: raw.to_string(),
        resolved_link: url.to_string(),
        resolved_host,
        channel_path,
    })
}

/// Resolves a link that must begin with `origin` verbatim.
///
/// Like a plain string split on the origin, the origin may appear exactly once.
pub fn resolve_exact_prefix(
    link: Option<&str>,
    origin: &str,
    host: &str,
) -> Result<ChannelRequest, ScrapeError> {
    let raw = required(link)?;
    let origin = origin.trim_end_matches('/');

    let bits: Vec<&str> = raw.split(origin).collect();
    if bits.len() != 2 || !bits[0].is_empty() {
        return Err(ScrapeError::wrong_host(
            raw,
            OP,
            Some(anyhow::anyhow!("link must start with {}", origin)),
        ));
    }

    let path = bits[1].split(['?', '#']).next().unwrap_or_default();
    let channel_path =
        channel_path_from(path).ok_or_else(|| ScrapeError::channel_not_found(raw, OP))?;

    Ok(ChannelRequest {
        raw_link: raw.to_string(),
        resolved_link: raw.to_string(),
        resolved_host: host.to_lowercase(),
        channel_path,
    })
}

fn required(link: Option<&str>) -> Result<&str, ScrapeError> {
    match link.map(str::trim) {
        Some(l) if !l.is_empty() => Ok(l),
        _ => Err(ScrapeError::missing_link(OP)),
    }
}

/// Parses `raw` as a URL, retrying once with an `https://` prefix when it has no scheme.
///
/// Links with a real scheme (`mailto:`, `javascript:`) are kept as parsed even though
/// they have no host.
fn parse_with_scheme_inference(raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Ok(url) if !is_host_and_port(&url) => Ok(url),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", raw))
        }
        Err(e) => Err(e),
    }
}

/// "host:port/path" parses with "host" as the scheme and the port starting the path.
fn is_host_and_port(url: &Url) -> bool {
    !url.has_host() && url.path().starts_with(|c: char| c.is_ascii_digit())
}

/// Derives `/name` or `/c/name` from a URL path.
fn channel_path_from(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        ["", name] if !name.is_empty() => Some(format!("/{}", name)),
        ["", "c", "", ..] => None,
        ["", "c", name, ..] => Some(format!("/c/{}", name)),
        ["", first, _, ..] if !first.is_empty() => Some(format!("/{}", first)),
        _ => None,
    }
}
