// ABOUTME: Timestamp parsing for listing publish times and caller-supplied feed times.
// ABOUTME: Listing times use one fixed ISO-8601 layout with a colon-separated offset.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::PublishTimeError;

/// Layout of the `datetime` attribute on listing items: "2006-01-02T15:04:05-07:00".
pub const PUBLISH_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Character classes of the layout: `d` is a digit, `+` is an offset sign.
const PUBLISH_TIME_SHAPE: &[u8] = b"dddd-dd-ddTdd:dd:dd+dd:dd";

/// Parses a listing publish time using [`PUBLISH_TIME_LAYOUT`].
///
/// Every field must be zero-padded and the offset must carry its colon; chrono
/// alone would also accept `-0500` or unpadded fields. The offset is preserved so
/// the encoder can render the item date in the source's own timezone.
pub fn parse_publish_time(s: &str) -> Result<DateTime<FixedOffset>, PublishTimeError> {
    let s = s.trim();
    if !matches_shape(s) {
        return Err(PublishTimeError::Layout(s.to_string()));
    }
    DateTime::parse_from_str(s, PUBLISH_TIME_LAYOUT).map_err(|source| PublishTimeError::Invalid {
        value: s.to_string(),
        source,
    })
}

fn matches_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == PUBLISH_TIME_SHAPE.len()
        && bytes
            .iter()
            .zip(PUBLISH_TIME_SHAPE)
            .all(|(&c, &class)| match class {
                b'd' => c.is_ascii_digit(),
                b'+' => c == b'+' || c == b'-',
                literal => c == literal,
            })
}

/// Parses a caller-supplied feed timestamp (RFC 3339) into UTC.
pub fn parse_caller_time(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s.trim()).map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_publish_time_with_offset() {
        let dt = parse_publish_time("2024-01-15T10:00:00-05:00").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_publish_time_utc_offset() {
        let dt = parse_publish_time("2023-06-15T14:30:00+00:00").unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2023, 6, 15, 14, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_publish_time_rejects_other_layouts() {
        assert!(parse_publish_time("2023-06-15T14:30:00Z").is_err());
        assert!(parse_publish_time("2023-06-15 14:30:00").is_err());
        assert!(parse_publish_time("Mon, 02 Jan 2006 15:04:05 -0700").is_err());
        assert!(parse_publish_time("yesterday").is_err());
        assert!(parse_publish_time("").is_err());
    }

    #[test]
    fn test_publish_time_requires_exact_shape() {
        for text in [
            "2024-01-15T10:00:00-0500",
            "2024-1-5T1:0:0-05:00",
            "2024-01-15T10:00:00-05",
            "2024-01-15T10:00:00.5-05:00",
            "+2024-01-15T10:00:00-05:00",
        ] {
            assert_eq!(
                parse_publish_time(text),
                Err(PublishTimeError::Layout(text.to_string())),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_publish_time_impossible_date() {
        assert!(matches!(
            parse_publish_time("2023-02-30T10:00:00+00:00"),
            Err(PublishTimeError::Invalid { .. })
        ));
        assert!(matches!(
            parse_publish_time("2023-01-01T25:00:00+00:00"),
            Err(PublishTimeError::Invalid { .. })
        ));
    }

    #[test]
    fn test_caller_time_rfc3339() {
        let dt = parse_caller_time("2024-03-01T12:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());

        let dt = parse_caller_time("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_caller_time_invalid() {
        assert!(parse_caller_time("01/03/2024").is_err());
    }
}
