// ABOUTME: Duration badge parsing for listing items.
// ABOUTME: Accepts MM:SS and HH:MM:SS notation and reports which component was invalid.

use crate::error::{DurationComponent, DurationError};

/// Parses a duration badge into a number of seconds.
/// Supports:
/// - MM:SS format
/// - HH:MM:SS format
///
/// Components are not range-checked, so "90:00" is 5400 seconds. Empty input is
/// not a duration; callers treat an empty badge as "no duration" before calling this.
pub fn parse_duration_seconds(s: &str) -> Result<u64, DurationError> {
    let parts: Vec<&str> = s.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [mm, ss] => (
            0,
            parse_component(mm, DurationComponent::Minutes)?,
            parse_component(ss, DurationComponent::Seconds)?,
        ),
        [hh, mm, ss] => (
            parse_component(hh, DurationComponent::Hours)?,
            parse_component(mm, DurationComponent::Minutes)?,
            parse_component(ss, DurationComponent::Seconds)?,
        ),
        _ => return Err(DurationError::Malformed(s.to_string())),
    };

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| DurationError::Overflow(s.to_string()))
}

fn parse_component(part: &str, component: DurationComponent) -> Result<u64, DurationError> {
    let invalid = || DurationError::InvalidComponent {
        component,
        value: part.to_string(),
    };

    // u64::from_str accepts a leading '+', the badge format does not.
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    part.parse().map_err(|_| invalid())
}
