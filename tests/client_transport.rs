//! Transport-level behavior of `PelicanClient`.
//!
//! Uses wiremock to check headers, status classification and decoding.

use pelicanapi::{ErrorKind, PelicanClient, PelicanError};
use reqwest::Method;
use wiremock::matchers::{bearer_token, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_every_request_carries_auth_and_json_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(bearer_token("papp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PelicanClient::new(&mock_server.uri(), "papp_secret").unwrap();
    let value: serde_json::Value = client.get("api/application/users").await.unwrap();

    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn test_non_2xx_carries_status_body_and_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users"))
        .respond_with(ResponseTemplate::new(403).set_body_string("This action is unauthorized."))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PelicanClient::new(&mock_server.uri(), "token").unwrap();
    let err = client
        .get::<serde_json::Value>("api/application/users")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        PelicanError::Status { status, body, url } => {
            assert_eq!(status, 403);
            assert_eq!(body, "This action is unauthorized.");
            assert!(url.ends_with("/api/application/users"));
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_on_200_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("{\"object\": \"list\", \"data\": ["),
        )
        .mount(&mock_server)
        .await;

    let client = PelicanClient::new(&mock_server.uri(), "token").unwrap();
    let err = client
        .get::<serde_json::Value>("api/application/users")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_send_with_body_and_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/application/users/7/ping"))
        .and(body_json(serde_json::json!({"reason": "test"})))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PelicanClient::new(&mock_server.uri(), "token").unwrap();
    client
        .send_no_content(
            Method::POST,
            "api/application/users/7/ping",
            Some(&serde_json::json!({"reason": "test"})),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_decodes_result_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1})))
        .mount(&mock_server)
        .await;

    #[derive(serde::Deserialize)]
    struct Shape {
        id: u64,
    }

    let client = PelicanClient::new(&mock_server.uri(), "token").unwrap();
    let shape: Shape = client
        .send(Method::GET, "api/application/users/1", None::<&()>)
        .await
        .unwrap();
    assert_eq!(shape.id, 1);
}

#[tokio::test]
async fn test_exactly_one_attempt_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PelicanClient::new(&mock_server.uri(), "token").unwrap();
    let err = client
        .get::<serde_json::Value>("api/application/users")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    // wiremock verifies the single call on MockServer drop
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Port 9 (discard) is not listening on loopback in test environments
    let client = PelicanClient::new("http://127.0.0.1:9", "token").unwrap();
    let err = client
        .get::<serde_json::Value>("api/application/users")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, PelicanError::Http(_)));
}
