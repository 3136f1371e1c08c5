//! API error handling for the feed server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use channelcast_scrape::{ErrorCode as ScrapeCode, ScrapeError};
use serde::Serialize;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing, unparseable or foreign link, or a bad override (400).
    BadRequest,
    /// The channel page could not be fetched (502).
    BadGateway,
    /// The channel page did not arrive in time (504).
    GatewayTimeout,
    /// Extraction or encoding failed (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::BadGateway => StatusCode::BAD_GATEWAY,
            ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ScrapeCode> for ErrorCode {
    fn from(code: ScrapeCode) -> Self {
        match code {
            ScrapeCode::MissingLink
            | ScrapeCode::InvalidUrl
            | ScrapeCode::WrongHost
            | ScrapeCode::ChannelNotFound => ErrorCode::BadRequest,
            ScrapeCode::Fetch => ErrorCode::BadGateway,
            ScrapeCode::Timeout => ErrorCode::GatewayTimeout,
            ScrapeCode::Extract | ScrapeCode::Encode => ErrorCode::InternalError,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        Self::new(err.code.into(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message, "feed request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.message, "feed request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
