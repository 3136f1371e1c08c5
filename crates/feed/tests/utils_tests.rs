// ABOUTME: Integration tests for the standalone parsing and text helpers.
// ABOUTME: Covers duration badges, publish/caller timestamps, truncation, and link resolution.

use channelcast_feed::{
    absolutize_link, parse_caller_time, parse_duration_seconds, parse_publish_time,
    truncate_text, DurationComponent, DurationError,
};

mod duration_parse_tests {
    use super::*;

    #[test]
    fn test_mmss_equals_sixty_minutes_plus_seconds() {
        for (mm, ss) in [(0u64, 0u64), (3, 45), (59, 59), (120, 7)] {
            let input = format!("{}:{:02}", mm, ss);
            assert_eq!(parse_duration_seconds(&input), Ok(60 * mm + ss), "{}", input);
        }
    }

    #[test]
    fn test_hhmmss_equals_weighted_sum() {
        for (hh, mm, ss) in [(0u64, 0u64, 0u64), (1, 2, 10), (10, 0, 1), (99, 59, 59)] {
            let input = format!("{}:{:02}:{:02}", hh, mm, ss);
            assert_eq!(
                parse_duration_seconds(&input),
                Ok(3600 * hh + 60 * mm + ss),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_part_count_must_be_two_or_three() {
        assert!(matches!(parse_duration_seconds("12"), Err(DurationError::Malformed(_))));
        assert!(matches!(parse_duration_seconds("1:2:3:4"), Err(DurationError::Malformed(_))));
    }

    #[test]
    fn test_non_digit_part_names_component() {
        match parse_duration_seconds("1:2x") {
            Err(DurationError::InvalidComponent { component, value }) => {
                assert_eq!(component, DurationComponent::Seconds);
                assert_eq!(value, "2x");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

mod time_parse_tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_publish_time_layout() {
        let dt = parse_publish_time("2024-02-29T23:59:59+01:00").unwrap();
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 2, 29, 22, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_caller_time() {
        assert_eq!(
            parse_caller_time("2021-07-04T00:00:00Z").unwrap(),
            Utc.with_ymd_and_hms(2021, 7, 4, 0, 0, 0).unwrap()
        );
        assert!(parse_caller_time("July 4th").is_err());
    }
}

mod text_tests {
    use super::*;

    #[test]
    fn test_truncate_exact_length_untouched() {
        let title = "x".repeat(20);
        assert_eq!(truncate_text(&title, 20), title);
    }

    #[test]
    fn test_truncate_one_over_gets_marker() {
        let title = "x".repeat(21);
        let cut = truncate_text(&title, 20);
        assert_eq!(cut, format!("{}...", "x".repeat(20)));
        assert_eq!(cut.chars().count(), 23);
    }

    #[test]
    fn test_absolutize_against_custom_origin() {
        assert_eq!(
            absolutize_link("http://127.0.0.1:9000", "/v1-test.html"),
            "http://127.0.0.1:9000/v1-test.html"
        );
    }
}
