// tests/web_tests.rs
mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono_tz::Tz;
use common::{channel, utc, FakeSource};
use std::sync::Arc;
use tower::ServiceExt;
use ytgrowth::web::{create_router, DashboardState};
use ytgrowth::{ApiError, ChannelGrowthAnalyzer, ChannelSource};

fn state_with(source: Arc<dyn ChannelSource>) -> DashboardState {
    state_in(source, Tz::UTC)
}

fn state_in(source: Arc<dyn ChannelSource>, timezone: Tz) -> DashboardState {
    let analyzer = ChannelGrowthAnalyzer::new(source, timezone);
    DashboardState::with_clock(analyzer, Arc::new(|| utc(2024, 6, 1, 12, 0)))
}

async fn get(state: DashboardState, uri: &str) -> (StatusCode, String) {
    let response = create_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn sample_source() -> Arc<FakeSource> {
    Arc::new(FakeSource::with_channels(vec![
        channel("UC2023a", utc(2023, 4, 20, 17, 45), 52_000, 3_100_000),
        channel("UC2019", utc(2019, 8, 8, 8, 8), 1_900_000, 400_000_000),
        channel("UC2023b", utc(2023, 7, 14, 12, 0), 9_999, 400_000),
    ]))
}

#[tokio::test]
async fn test_index_renders_form_with_defaults() {
    let (status, body) = get(state_with(sample_source()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/analyze\""));
    assert!(body.contains("name=\"result_count\" min=\"5\" max=\"50\" value=\"20\""));
    assert!(body.contains("name=\"created_to\" value=\"2024-06-01\""));
    assert!(body.contains("name=\"created_from\" value=\"2019-06-03\""));
    assert!(!body.contains("<table"));
}

#[tokio::test]
async fn test_analyze_renders_table_charts_and_links() {
    let source = sample_source();
    let uri = "/analyze?search_term=tech+review&result_count=10&created_from=2023-01-01&created_to=2023-12-31";
    let (status, body) = get(state_with(source.clone()), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(source.call_count(), 1);
    assert!(body.contains("Found 2 channels (3 returned by the search)."));
    assert!(body.contains("<table class=\"results\">"));
    assert!(body.contains("https://www.youtube.com/channel/UC2023a"));
    assert!(body.contains("https://www.youtube.com/channel/UC2023b"));
    assert!(!body.contains("UC2019"));
    assert!(body.contains("id=\"chart-subscribers\""));
    assert!(body.contains("id=\"chart-growth_rate\""));
    assert!(body.contains("Fastest Growing Channels"));
    // The submitted values are echoed back into the form.
    assert!(body.contains("name=\"search_term\" value=\"tech review\""));
}

#[tokio::test]
async fn test_analyze_rejects_small_result_count_without_api_call() {
    let source = sample_source();
    let uri = "/analyze?search_term=tech+review&result_count=3&created_from=2023-01-01&created_to=2023-12-31";
    let (status, body) = get(state_with(source.clone()), uri).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("result count 3 is outside 5..=50"));
    assert!(!body.contains("<table"));
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_empty_search_term_warns() {
    let source = sample_source();
    let (status, body) = get(state_with(source.clone()), "/analyze?result_count=10").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Please enter a search term."));
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_analyze_quota_error_shows_message_without_table() {
    let source = Arc::new(FakeSource::failing(ApiError::QuotaExceeded("quota used up".to_string())));
    let uri = "/analyze?search_term=tech+review&result_count=10&created_from=2023-01-01&created_to=2023-12-31";
    let (status, body) = get(state_with(source), uri).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("YouTube API quota exceeded: quota used up"));
    assert!(!body.contains("<table"));
    assert!(!body.contains("chart-"));
}

#[tokio::test]
async fn test_analyze_no_channels_in_range() {
    let uri = "/analyze?search_term=tech+review&result_count=10&created_from=2010-01-01&created_to=2010-12-31";
    let (status, body) = get(state_with(sample_source()), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No channels were found."));
    assert!(!body.contains("<table"));
}

#[tokio::test]
async fn test_analyze_shows_creation_dates_in_configured_timezone() {
    // 20:00 UTC on New Year's Eve is already 2024-01-01 in Tokyo.
    let source = Arc::new(FakeSource::with_channels(vec![channel("UCjp", utc(2023, 12, 31, 20, 0), 500, 20_000)]));
    let uri = "/analyze?search_term=tech+review&result_count=10&created_from=2024-01-01&created_to=2024-12-31";
    let (status, body) = get(state_in(source, Tz::Asia__Tokyo), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Found 1 channels (1 returned by the search)."));
    assert!(body.contains("<td>2024-01-01</td>"));
    assert!(body.contains("created 2024-01-01"));
    assert!(!body.contains("2023-12-31"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(state_with(sample_source()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
