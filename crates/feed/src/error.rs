// ABOUTME: Error types for the feed pipeline stages (duration, publish time, and feed encoding).
// ABOUTME: Provides FeedError with Duration and Encode variants plus the parser error taxonomies.

use std::fmt;
use thiserror::Error;

/// Which colon-delimited component of a duration badge failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationComponent {
    Hours,
    Minutes,
    Seconds,
}

impl fmt::Display for DurationComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DurationComponent::Hours => "hours",
            DurationComponent::Minutes => "minutes",
            DurationComponent::Seconds => "seconds",
        };
        write!(f, "{}", s)
    }
}

/// Errors produced by the duration badge parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The badge did not split into two or three colon-delimited parts.
    #[error("invalid duration format {0:?}")]
    Malformed(String),

    /// One of the parts is not an unsigned integer.
    #[error("invalid {component}: {value:?}")]
    InvalidComponent {
        component: DurationComponent,
        value: String,
    },

    /// The total does not fit in a u64 number of seconds.
    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// Errors produced by the listing publish-time parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishTimeError {
    /// The text is not shaped like `YYYY-MM-DDThh:mm:ss±hh:mm`.
    #[error("publish time {0:?} does not match YYYY-MM-DDThh:mm:ss±hh:mm")]
    Layout(String),

    /// The text has the right shape but names an impossible date or time.
    #[error("invalid publish time {value:?}: {source}")]
    Invalid {
        value: String,
        source: chrono::ParseError,
    },
}

/// Errors that can occur while normalizing records or encoding a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A duration badge could not be parsed.
    #[error("failed to parse duration: {0}")]
    Duration(#[from] DurationError),

    /// The feed model could not be serialized.
    #[error("failed to encode feed: {0}")]
    Encode(String),
}

impl FeedError {
    /// Creates an Encode error from any displayable cause.
    pub fn encode(err: impl fmt::Display) -> Self {
        FeedError::Encode(err.to_string())
    }
}
