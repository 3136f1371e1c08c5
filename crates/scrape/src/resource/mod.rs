// ABOUTME: Resource handling module for fetching channel listing pages.
// ABOUTME: Handles HTTP fetching with a deadline, content-length limits, and charset decoding.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;

use crate::error::ScrapeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

const OP: &str = "Fetch";

/// Options for fetching a resource.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    /// Deadline for the whole request, including reading the body.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using charset hints from the content-type header.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

fn transport_error(url: &str, context: &str, err: reqwest::Error) -> ScrapeError {
    if err.is_timeout() {
        ScrapeError::timeout(url, OP, Some(anyhow::anyhow!("{}: {}", context, err)))
    } else {
        ScrapeError::fetch(url, OP, Some(anyhow::anyhow!("{}: {}", context, err)))
    }
}

/// Fetch a resource, failing with a Timeout error if it takes longer than `opts.timeout`.
///
/// Nothing is returned on expiry; the in-flight request is dropped.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ScrapeError> {
    match tokio::time::timeout(opts.timeout, fetch_inner(client, url, opts)).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::timeout(
            url,
            OP,
            Some(anyhow::anyhow!("no response within {:?}", opts.timeout)),
        )),
    }
}

async fn fetch_inner(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, OP, None));
    }

    let parsed_url = url::Url::parse(url).map_err(|e| {
        ScrapeError::invalid_url(url, OP, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ScrapeError::invalid_url(
            url,
            OP,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(url, "request failed", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::fetch(
            url,
            OP,
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    // Check Content-Length header before reading body
    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });

    if let Some(len) = content_length {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ScrapeError::fetch(
                url,
                OP,
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(url, "failed to read body", e))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ScrapeError::fetch(
            url,
            OP,
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    tracing::debug!(
        url = %url,
        final_url = %final_url,
        status = status.as_u16(),
        bytes = body.len(),
        "fetched page"
    );

    Ok(FetchResult {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}
