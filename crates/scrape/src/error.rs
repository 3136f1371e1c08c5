// ABOUTME: Error types for the scrape pipeline including ErrorCode enum and ScrapeError struct.
// ABOUTME: Classifies input, fetch, extraction, and encoding failures for the HTTP layer.

use std::fmt;

/// Error codes representing the different categories of pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingLink,
    InvalidUrl,
    WrongHost,
    ChannelNotFound,
    Fetch,
    Timeout,
    Extract,
    Encode,
}

impl ErrorCode {
    /// True for failures caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::MissingLink
                | ErrorCode::InvalidUrl
                | ErrorCode::WrongHost
                | ErrorCode::ChannelNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingLink => "link is required",
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::WrongHost => "wrong host",
            ErrorCode::ChannelNotFound => "channel not found",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Extract => "extraction error",
            ErrorCode::Encode => "encoding error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channelcast: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ScrapeError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a MissingLink error.
    pub fn missing_link(op: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingLink, "", op, None)
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a WrongHost error.
    pub fn wrong_host(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::WrongHost, url, op, source)
    }

    /// Create a ChannelNotFound error.
    pub fn channel_not_found(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self::new(ErrorCode::ChannelNotFound, url, op, None)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Timeout, url, op, source)
    }

    /// Create an Extract error.
    pub fn extract(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Extract, url, op, source)
    }

    /// Create an Encode error.
    pub fn encode(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Encode, url, op, source)
    }

    /// Returns true if the caller's input caused this error.
    pub fn is_client_error(&self) -> bool {
        self.code.is_client_error()
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is an Extract error.
    pub fn is_extract(&self) -> bool {
        self.code == ErrorCode::Extract
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_url_code_and_source() {
        let err = ScrapeError::fetch(
            "https://rumble.com/c/acme",
            "Fetch",
            Some(anyhow::anyhow!("HTTP status 503")),
        );
        assert_eq!(
            err.to_string(),
            "channelcast: Fetch https://rumble.com/c/acme: fetch error: HTTP status 503"
        );
        assert!(err.is_fetch());
        assert!(!err.is_client_error());
    }

    #[test]
    fn input_errors_are_client_errors() {
        assert!(ScrapeError::missing_link("Resolve").is_client_error());
        assert!(ScrapeError::invalid_url("x", "Resolve", None).is_client_error());
        assert!(ScrapeError::wrong_host("x", "Resolve", None).is_client_error());
        assert!(ScrapeError::channel_not_found("x", "Resolve").is_client_error());
        assert!(!ScrapeError::timeout("x", "Fetch", None).is_client_error());
        assert!(!ScrapeError::extract("x", "Extract", None).is_client_error());
        assert!(!ScrapeError::encode("x", "Encode", None).is_client_error());
    }
}
