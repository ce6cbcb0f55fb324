//! Integration tests for transport middleware.

use assert2::{check, let_assert};
use bytes::Bytes;
use http2human::middleware::LoggingLayer;
use http2human::tower::util::MapRequestLayer;
use http2human::{Dispatcher, ErrorKind, HyperClient, Payload, Request};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

/// Logging middleware doesn't change the outcome.
#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logged": true})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().layer(LoggingLayer::debug()).build();
    let outcome = Dispatcher::new(client)
        .get(&format!("{}/logged", mock_server.uri()))
        .await;

    check!(outcome == Ok(Payload::Json(json!({"logged": true}))));
}

/// Logging middleware still lets error responses through to classification.
#[tokio::test]
async fn test_logging_middleware_with_error_response() {
    let mock_server = MockServer::start().await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().layer(LoggingLayer::new()).build();
    let outcome = Dispatcher::new(client)
        .get(&format!("{}/broken", mock_server.uri()))
        .await;

    let_assert!(Err(err) = outcome);
    check!(err.kind() == ErrorKind::ServerError);
    check!(err.response_body() == Some(&json!({"rawText": "boom"})));
}

/// Custom tower layers compose with the built-in ones.
#[tokio::test]
async fn test_custom_layer_composition() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/composed"))
        .and(header("X-Client", "http2human"))
        .respond_with(ResponseTemplate::new(200).set_body_string("composed"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .layer(MapRequestLayer::new(|mut request: Request<Bytes>| {
            request
                .headers_mut()
                .insert("X-Client".to_string(), "http2human".to_string());
            request
        }))
        .layer(LoggingLayer::new())
        .build();

    let outcome = Dispatcher::new(client)
        .get(&format!("{}/composed", mock_server.uri()))
        .await;

    check!(outcome == Ok(Payload::Text("composed".to_string())));
}

/// Transport failures are logged and still surface as network errors.
#[tokio::test]
async fn test_logging_middleware_with_connection_error() {
    let client = HyperClient::builder().layer(LoggingLayer::new()).build();
    let outcome = Dispatcher::new(client).get("http://127.0.0.1:1").await;

    let_assert!(Err(err) = outcome);
    check!(err.kind() == ErrorKind::NetworkError);
}
