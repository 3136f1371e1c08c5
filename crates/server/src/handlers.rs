//! Request handlers for the feed endpoint and health check.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use channelcast_feed::{parse_caller_time, FeedIdentity, FeedOverrides, RSS_CONTENT_TYPE};
use channelcast_scrape::Client;
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Client,
}

impl AppState {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Query parameters of the feed endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// RFC 3339 timestamp.
    pub published: Option<String>,
}

impl FeedQuery {
    /// Any override parameter, even an empty one, selects the caller's identity.
    pub fn identity(&self) -> Result<FeedIdentity, ApiError> {
        if self.title.is_none() && self.description.is_none() && self.published.is_none() {
            return Ok(FeedIdentity::Scraped);
        }

        let published_at = match self.published.as_deref() {
            Some(text) if !text.is_empty() => Some(parse_caller_time(text).map_err(|e| {
                ApiError::bad_request(format!("invalid published time {:?}: {}", text, e))
            })?),
            _ => None,
        };

        Ok(FeedIdentity::Caller(FeedOverrides {
            title: self.title.clone(),
            description: self.description.clone(),
            published_at,
            updated_at: None,
        }))
    }
}

/// Builds and returns the RSS feed for `?link=`.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Result<Response, ApiError> {
    let identity = query.identity()?;
    let feed = state.client.feed(query.link.as_deref(), &identity).await?;
    let xml = state.client.encode(&feed)?;
    Ok(([(CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response())
}

/// Health check handler.
pub async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_no_overrides_means_scraped() {
        let query = FeedQuery {
            link: Some("rumble.com/c/acme".to_string()),
            ..Default::default()
        };
        assert_eq!(query.identity().unwrap(), FeedIdentity::Scraped);
    }

    #[test]
    fn test_any_override_means_caller() {
        let query = FeedQuery {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(query.identity().unwrap(), FeedIdentity::Caller(_)));

        let query = FeedQuery {
            published: Some("2024-01-02T03:04:05Z".to_string()),
            ..Default::default()
        };
        match query.identity().unwrap() {
            FeedIdentity::Caller(o) => assert_eq!(
                o.published_at,
                Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
            ),
            other => panic!("unexpected identity {:?}", other),
        }
    }

    #[test]
    fn test_bad_published_is_bad_request() {
        let query = FeedQuery {
            published: Some("last tuesday".to_string()),
            ..Default::default()
        };
        let err = query.identity().unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
    }
}
