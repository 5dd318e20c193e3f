use std::sync::mpsc;
use std::time::Duration;

use pledgewatch_engine::{
    fetch_page, ChannelWatchSink, FailureKind, FetchSettings, ReqwestFetcher, RetryPolicy,
    WatchEvent,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn no_wait(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::bounded(max_attempts, Duration::ZERO)
}

#[test]
fn default_policy_waits_a_minute_forever() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay, Duration::from_secs(60));
    assert_eq!(policy.max_attempts, None);
}

#[tokio::test]
async fn transient_failure_is_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pledge/new"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pledge/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>back</p>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let (tx, rx) = mpsc::channel();
    let sink = ChannelWatchSink::new(tx);
    let url = format!("{}/pledge/new", server.uri());

    let html = fetch_page(&fetcher, &url, &no_wait(5), &sink)
        .await
        .expect("third attempt succeeds");
    assert_eq!(html, "<p>back</p>");

    let failures: Vec<(u32, FailureKind)> = rx
        .try_iter()
        .filter_map(|event| match event {
            WatchEvent::FetchFailed { attempt, error, .. } => Some((attempt, error.kind)),
            _ => None,
        })
        .collect();
    assert_eq!(
        failures,
        vec![
            (1, FailureKind::HttpStatus(503)),
            (2, FailureKind::HttpStatus(503)),
        ]
    );
}

#[tokio::test]
async fn bounded_policy_returns_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pledge/new"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let (tx, rx) = mpsc::channel();
    let sink = ChannelWatchSink::new(tx);
    let url = format!("{}/pledge/new", server.uri());

    let err = fetch_page(&fetcher, &url, &no_wait(3), &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    // The final failure is returned, not reported as a pending retry.
    assert_eq!(rx.try_iter().count(), 2);
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{port}/pledge/new");

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let (tx, _rx) = mpsc::channel();
    let sink = ChannelWatchSink::new(tx);

    let err = fetch_page(&fetcher, &url, &no_wait(1), &sink)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
