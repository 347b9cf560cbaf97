mod common;

use arrivals_search::config::ClientConfig;
use arrivals_search::domain::model::{NotificationKind, AUTH_TOKEN_KEY};
use arrivals_search::domain::ports::TokenStore;
use arrivals_search::utils::error::FALLBACK_ERROR_MESSAGE;
use arrivals_search::{ApiClient, MemoryStore, RequestOptions, SearchError};
use common::{api_client, RecordingNotifier};
use httpmock::prelude::*;
use reqwest::Method;
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::test]
async fn test_bearer_token_attached_when_stored() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ping")
            .header("authorization", "Bearer secret-token");
        then.status(200).json_body(json!({"ok": true}));
    });

    let storage = MemoryStore::with_item(AUTH_TOKEN_KEY, "secret-token");
    let client = api_client(&server, storage, RecordingNotifier::new());

    let body: Value = client.get("/ping").await.unwrap();

    api_mock.assert();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_authorization_omitted_without_token() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/ping").header_missing("authorization");
        then.status(200).json_body(json!({}));
    });

    let client = api_client(&server, MemoryStore::new(), RecordingNotifier::new());
    let _: Value = client.get("/ping").await.unwrap();

    api_mock.assert();
}

#[tokio::test]
async fn test_token_is_read_on_every_request() {
    let server = MockServer::start();
    let anonymous = server.mock(|when, then| {
        when.method(GET).path("/ping").header_missing("authorization");
        then.status(200).json_body(json!({}));
    });
    let authed = server.mock(|when, then| {
        when.method(GET)
            .path("/ping")
            .header("authorization", "Bearer later");
        then.status(200).json_body(json!({}));
    });

    let storage = MemoryStore::new();
    let client = api_client(&server, storage.clone(), RecordingNotifier::new());

    let _: Value = client.get("/ping").await.unwrap();
    storage.set_item(AUTH_TOKEN_KEY, "later").await.unwrap();
    let _: Value = client.get("/ping").await.unwrap();

    anonymous.assert_hits(1);
    authed.assert_hits(1);
}

#[tokio::test]
async fn test_caller_headers_merge_and_post_body_is_json() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/items")
            .header("authorization", "Bearer stored")
            .header("x-request-id", "42")
            .json_body(json!({"name": "SGN"}));
        then.status(201).json_body(json!({"id": 1}));
    });

    let client = api_client(
        &server,
        MemoryStore::with_item(AUTH_TOKEN_KEY, "stored"),
        RecordingNotifier::new(),
    );

    let body: Value = client
        .request(
            Method::POST,
            "/items",
            Some(&json!({"name": "SGN"})),
            RequestOptions::new().with_header("X-Request-Id", "42"),
        )
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_detail_message_is_surfaced_once() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fail");
        then.status(400).json_body(json!({"detail": "X"}));
    });

    let notifier = RecordingNotifier::new();
    let client = api_client(&server, MemoryStore::new(), notifier.clone());

    let err = client.get::<Value>("/fail").await.unwrap_err();

    assert!(matches!(err, SearchError::HttpError { status: 400, .. }));
    assert_eq!(err.user_message(), "X");

    let received = notifier.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].kind, NotificationKind::Error);
    assert_eq!(received[0].title, "Error");
    assert_eq!(received[0].message, "X");
    assert_eq!(received[0].duration, Duration::from_secs(5));
}

#[tokio::test]
async fn test_message_field_used_when_no_detail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fail");
        then.status(403).json_body(json!({"message": "Forbidden for this token"}));
    });

    let notifier = RecordingNotifier::new();
    let client = api_client(&server, MemoryStore::new(), notifier.clone());

    let _ = client.get::<Value>("/fail").await.unwrap_err();
    assert_eq!(notifier.received()[0].message, "Forbidden for this token");
}

#[tokio::test]
async fn test_status_text_used_for_unstructured_error_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fail");
        then.status(500).body("<html>Internal Server Error</html>");
    });

    let notifier = RecordingNotifier::new();
    let client = api_client(&server, MemoryStore::new(), notifier.clone());

    let err = client.get::<Value>("/fail").await.unwrap_err();
    assert!(matches!(err, SearchError::HttpError { status: 500, body: None }));
    assert_eq!(notifier.received()[0].message, "Request failed with status code 500");
}

#[tokio::test]
async fn test_transport_failure_notifies_and_propagates() {
    let notifier = RecordingNotifier::new();
    // Nothing listens on port 1.
    let client = ApiClient::new(
        ClientConfig::new("http://127.0.0.1:1"),
        MemoryStore::new(),
        notifier.clone(),
    );

    let err = client.get::<Value>("/ping").await.unwrap_err();

    assert!(matches!(err, SearchError::TransportError(_)));
    let received = notifier.received();
    assert_eq!(received.len(), 1);
    assert!(!received[0].message.is_empty());
    assert_ne!(received[0].message, FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_undecodable_success_body_is_a_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/list");
        then.status(200).body("not json");
    });

    let notifier = RecordingNotifier::new();
    let client = api_client(&server, MemoryStore::new(), notifier.clone());

    let err = client.get::<Vec<Value>>("/list").await.unwrap_err();
    assert!(matches!(err, SearchError::DecodeError { .. }));
    assert_eq!(notifier.received().len(), 1);
}

#[tokio::test]
async fn test_success_does_not_notify() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/items/1");
        then.status(204);
    });

    let notifier = RecordingNotifier::new();
    let client = api_client(&server, MemoryStore::new(), notifier.clone());

    let body: Option<Value> = client
        .request(Method::DELETE, "/items/1", None, RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(body, None);
    assert!(notifier.received().is_empty());
}

#[tokio::test]
async fn test_per_request_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .json_body(json!({}))
            .delay(Duration::from_millis(500));
    });

    let notifier = RecordingNotifier::new();
    let client = api_client(&server, MemoryStore::new(), notifier.clone());

    let err = client
        .request::<Value>(
            Method::GET,
            "/slow",
            None,
            RequestOptions::new().with_timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::TransportError(ref e) if e.is_timeout()));
    assert_eq!(notifier.received().len(), 1);
}
