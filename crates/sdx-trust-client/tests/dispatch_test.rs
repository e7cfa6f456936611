//! Dispatcher behavior against simulated peer services.
//!
//! The canonical scenario: three registry endpoints where the first times
//! out, the second answers HTTP 500, and the third succeeds — the dispatch
//! must return the third endpoint's result. When every endpoint fails the
//! dispatch returns `None` without raising.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sdx_trust_client::{dispatch, EndpointSet, OperationKind, RegistryClient};

fn short_timeout_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap()
}

async fn slow_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/termsAndConditions/22.10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(1500))
                .set_body_json(serde_json::json!({"version": "22.10", "text": "late"})),
        )
        .mount(&server)
        .await;
    server
}

async fn failing_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/termsAndConditions/22.10"))
        .respond_with(ResponseTemplate::new(500).set_body_string("registry exploded"))
        .mount(&server)
        .await;
    server
}

async fn healthy_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/termsAndConditions/22.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": "22.10",
            "text": "The terms.",
            "hash": "9dd1c42e"
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn first_healthy_endpoint_serves_after_timeout_and_500() {
    let slow = slow_server().await;
    let failing = failing_server().await;
    let healthy = healthy_server().await;

    let http = short_timeout_client();
    let mut endpoints = EndpointSet::new();
    endpoints.push(
        "slow",
        RegistryClient::new(http.clone(), slow.uri().parse().unwrap()),
    );
    endpoints.push(
        "failing",
        RegistryClient::new(http.clone(), failing.uri().parse().unwrap()),
    );
    endpoints.push(
        "healthy",
        RegistryClient::new(http, healthy.uri().parse().unwrap()),
    );

    let result = dispatch(OperationKind::TermsFetch, &endpoints, |client| async move {
        client.terms_and_conditions("22.10").await
    })
    .await;

    let terms = result.expect("third endpoint should have served the request");
    assert_eq!(terms.version, "22.10");
    assert_eq!(terms.text, "The terms.");
    assert_eq!(terms.hash.as_deref(), Some("9dd1c42e"));
}

#[tokio::test]
async fn exhausted_endpoints_yield_none_not_error() {
    let slow = slow_server().await;
    let failing = failing_server().await;

    let http = short_timeout_client();
    let mut endpoints = EndpointSet::new();
    endpoints.push(
        "slow",
        RegistryClient::new(http.clone(), slow.uri().parse().unwrap()),
    );
    endpoints.push(
        "failing",
        RegistryClient::new(http.clone(), failing.uri().parse().unwrap()),
    );
    // Nothing listens on the discard port; connection is refused outright.
    endpoints.push(
        "dead",
        RegistryClient::new(http, "http://127.0.0.1:9".parse().unwrap()),
    );

    let result = dispatch(OperationKind::TermsFetch, &endpoints, |client| async move {
        client.terms_and_conditions("22.10").await
    })
    .await;

    assert!(result.is_none());
}

#[tokio::test]
async fn dispatch_stops_at_first_success() {
    let healthy = healthy_server().await;
    let untouched = MockServer::start().await;
    // No mock mounted: a request here would 404 and fail the dispatch
    // result assertion below.

    let http = short_timeout_client();
    let mut endpoints = EndpointSet::new();
    endpoints.push(
        "healthy",
        RegistryClient::new(http.clone(), healthy.uri().parse().unwrap()),
    );
    endpoints.push(
        "untouched",
        RegistryClient::new(http, untouched.uri().parse().unwrap()),
    );

    let result = dispatch(OperationKind::TermsFetch, &endpoints, |client| async move {
        client.terms_and_conditions("22.10").await
    })
    .await;

    assert!(result.is_some());
    assert!(untouched.received_requests().await.unwrap().is_empty());
}
