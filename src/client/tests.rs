use super::*;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> UpstreamClient {
    UpstreamClient::new(Duration::from_secs(5))
}

#[tokio::test]
async fn parses_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/data.json", server.uri())).expect("url");
    let response = client().get_json(url).await.expect("fetch succeeds");

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.body["ok"], true);
}

#[tokio::test]
async fn non_success_status_is_data_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/missing.json", server.uri())).expect("url");
    let response = client().get_json(url).await.expect("fetch succeeds");

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert!(response.body.is_null());
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{truncated"))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/broken.json", server.uri())).expect("url");
    let error = client().get_json(url).await.expect_err("fetch fails");

    assert!(matches!(error, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Port 9 (discard) is about as reliably closed as it gets.
    let url = Url::parse("http://127.0.0.1:9/unreachable.json").expect("url");
    let error = client().get_json(url).await.expect_err("fetch fails");

    assert!(matches!(error, FetchError::Transport(_)));
}
