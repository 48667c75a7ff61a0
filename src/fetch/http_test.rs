use super::*;
use crate::fetch::{FetchAttemptConfig, fetch_json};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(HttpTimeouts { request_secs: 5, connect_secs: 2 }).unwrap()
}

#[tokio::test]
async fn send_passes_headers_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Accept", "application/json"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "joke": "served" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = FetchRequest::get(format!("{}/", server.uri())).with_header("Accept", "application/json");
    let response = transport().send(&request).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.body.contains("served"));
}

#[tokio::test]
async fn send_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(body_string("{\"q\":1}"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let request = FetchRequest::post(format!("{}/submit", server.uri()), "{\"q\":1}");
    let response = transport().send(&request).await.unwrap();

    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn send_reports_non_2xx_as_response_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let response = transport().send(&FetchRequest::get(server.uri())).await.unwrap();

    assert_eq!(response, RawResponse { status: 404, body: "nope".into() });
}

#[tokio::test]
async fn send_connection_refused_is_request_error() {
    let err = transport()
        .send(&FetchRequest::get("http://127.0.0.1:9/"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));
}

#[tokio::test]
async fn fetch_json_recovers_from_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "type": "single", "joke": "third" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = FetchAttemptConfig { request: FetchRequest::get(server.uri()), max_retries: 5, base_delay_ms: 1 };
    let value = fetch_json(&transport(), &config).await.unwrap();

    assert_eq!(value["joke"], "third");
}

#[tokio::test]
async fn fetch_json_gives_up_on_persistent_garbage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .expect(3)
        .mount(&server)
        .await;

    let config = FetchAttemptConfig { request: FetchRequest::get(server.uri()), max_retries: 3, base_delay_ms: 1 };
    let err = fetch_json(&transport(), &config).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}
