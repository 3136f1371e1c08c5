// ABOUTME: End-to-end tests for the scrape-to-feed pipeline against a mock channel site.
// ABOUTME: Covers full extraction, input errors before fetching, upstream failures, item caps, and timeouts.

use std::time::Duration;

use channelcast_scrape::{Client, ErrorCode, FeedIdentity, FeedOverrides, Limits};
use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;

const CHANNEL_PAGE: &str = include_str!("fixtures/channel.html");

fn client_for(server: &MockServer) -> Client {
    Client::builder().origin(server.base_url()).build().unwrap()
}

fn listing_page(count: usize) -> String {
    let items: String = (0..count)
        .map(|i| {
            format!(
                r#"<div class="videostream thumbnail__grid--item">
                     <a class="videostream__link" href="/v{i}.html"></a>
                     <h3 class="thumbnail__title">Video {i}</h3>
                   </div>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
           <div class="channel-header--content"><div class="channel-header--title"><h1>Big</h1></div></div>
           <section class="channel-listing__container">{items}</section>
           </body></html>"#
    )
}

#[tokio::test]
async fn builds_feed_from_channel_page() {
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET).path("/c/acme");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(CHANNEL_PAGE);
    });

    let client = client_for(&server);
    let link = format!("{}/c/acme/videos", server.base_url());
    let feed = client
        .feed(Some(&link), &FeedIdentity::Scraped)
        .await
        .unwrap();

    page.assert();
    assert_eq!(feed.title, "Acme Science");
    assert_eq!(feed.description, "Weekly   experiments from the Acme lab.");
    assert_eq!(feed.link, format!("{}/c/acme", server.base_url()));
    assert_eq!(
        feed.image_url.as_deref(),
        Some("https://img.example.com/acme/avatar.jpg")
    );

    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Rockets", "Volcanoes", "Live from the lab"]);

    let durations: Vec<Option<u64>> = feed.items.iter().map(|i| i.duration_seconds).collect();
    assert_eq!(durations, vec![Some(225), Some(3730), None]);

    assert_eq!(
        feed.items[0].link,
        format!("{}/v4abc-rockets.html", server.base_url())
    );
    assert_eq!(
        feed.items[1].image_url,
        Some(format!("{}/thumbs/volcanoes.jpg", server.base_url()))
    );
    assert_eq!(feed.items[1].description, "unknown description");
    assert_eq!(
        feed.items[0].published_at.map(|t| t.with_timezone(&Utc)),
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
    );
    assert_eq!(feed.items[2].published_at, None);
    assert!(feed.items[2].is_live);
}

#[tokio::test]
async fn rendered_feed_is_rss() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme");
        then.status(200).body(CHANNEL_PAGE);
    });

    let client = client_for(&server);
    let link = format!("{}/acme", server.base_url());
    let xml = client
        .render(Some(&link), &FeedIdentity::Scraped)
        .await
        .unwrap();

    assert!(xml.contains("<title>Acme Science</title>"));
    assert!(xml.contains("<itunes:duration>225</itunes:duration>"));
    assert!(xml.contains("<itunes:duration>3730</itunes:duration>"));
    assert_eq!(xml.matches("<item>").count(), 3);
}

#[tokio::test]
async fn missing_link_fails_before_fetching() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.any_request();
        then.status(200).body(CHANNEL_PAGE);
    });

    let client = client_for(&server);
    let err = client.feed(None, &FeedIdentity::Scraped).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingLink);
    assert!(err.is_client_error());

    let err = client
        .feed(Some("https://example.com/c/acme"), &FeedIdentity::Scraped)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::WrongHost);

    any.assert_calls(0);
}

#[tokio::test]
async fn upstream_error_status_is_fetch_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/c/gone");
        then.status(404).body("not here");
    });

    let client = client_for(&server);
    let link = format!("{}/c/gone", server.base_url());
    let err = client
        .feed(Some(&link), &FeedIdentity::Scraped)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Fetch);
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn item_cap_truncates_long_listings() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/big");
        then.status(200).body(listing_page(8));
    });

    let client = Client::builder()
        .origin(server.base_url())
        .limits(Limits::new(0, 3))
        .build()
        .unwrap();
    let link = format!("{}/big", server.base_url());
    let feed = client
        .feed(Some(&link), &FeedIdentity::Scraped)
        .await
        .unwrap();

    let titles: Vec<&str> = feed.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Video 0", "Video 1", "Video 2"]);
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .body(CHANNEL_PAGE);
    });

    let client = Client::builder()
        .origin(server.base_url())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let link = format!("{}/slow", server.base_url());
    let err = client
        .feed(Some(&link), &FeedIdentity::Scraped)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Timeout);
}

#[tokio::test]
async fn caller_identity_replaces_channel_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/c/acme");
        then.status(200).body(CHANNEL_PAGE);
    });

    let published = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let identity = FeedIdentity::Caller(FeedOverrides {
        title: Some("My Acme".to_string()),
        description: None,
        published_at: Some(published),
        updated_at: None,
    });

    let client = client_for(&server);
    let link = format!("{}/c/acme", server.base_url());
    let feed = client.feed(Some(&link), &identity).await.unwrap();

    assert_eq!(feed.title, "My Acme");
    assert_eq!(feed.link, link);
    assert_eq!(feed.description, "unknown description");
    assert_eq!(feed.published_at, published);
    assert_eq!(
        feed.image_url.as_deref(),
        Some("https://img.example.com/acme/avatar.jpg")
    );
    assert_eq!(feed.items.len(), 3);
}
