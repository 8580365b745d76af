//! HTTP client behavior against a wiremock server.
//!
//! Covers header injection, error normalization, timeouts and concurrency.

use std::time::Duration;

use coachapi::{ClientConfig, CoachClient, ErrorKind, QueryParams, RequestOptions};
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CoachClient {
    CoachClient::new(ClientConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Request headers
// =============================================================================

#[tokio::test]
async fn test_no_authorization_header_without_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let _: Value = client.get("/users").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_set_api_key_applies_to_next_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/profile"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.set_api_key("abc");

    let profile: Value = client.get("/users/profile").await.unwrap();
    assert_eq!(profile["id"], "u1");
}

#[tokio::test]
async fn test_key_rotation_and_clearing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = CoachClient::new(ClientConfig::new(mock_server.uri()).with_api_key("first"))
        .unwrap();
    let _: Value = client.get("/ping").await.unwrap();

    client.set_api_key("second");
    let _: Value = client.get("/ping").await.unwrap();

    // Empty key clears authentication.
    client.set_api_key("");
    let _: Value = client.get("/ping").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let auth: Vec<Option<&str>> = requests
        .iter()
        .map(|r| r.headers.get("authorization").and_then(|v| v.to_str().ok()))
        .collect();
    assert_eq!(auth, vec![Some("Bearer first"), Some("Bearer second"), None]);
}

#[tokio::test]
async fn test_json_content_type_and_extra_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clients"))
        .and(header("content-type", "application/json"))
        .and(header("x-clinic-id", "clinic-7"))
        .and(body_json(json!({"name": "Jane"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "c1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CoachClient::new(
        ClientConfig::new(mock_server.uri()).with_header("X-Clinic-Id", "clinic-7"),
    )
    .unwrap();

    let created: Value = client.post("/clients", &json!({"name": "Jane"})).await.unwrap();
    assert_eq!(created["id"], "c1");
}

#[tokio::test]
async fn test_extra_content_type_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/programs"))
        .and(header("content-type", "application/vnd.coach+json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "p1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CoachClient::new(
        ClientConfig::new(mock_server.uri())
            .with_header("Content-Type", "application/vnd.coach+json"),
    )
    .unwrap();

    let _: Value = client.post("/programs", &json!({"name": "x"})).await.unwrap();
}

#[tokio::test]
async fn test_base_url_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/programs/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        CoachClient::new(ClientConfig::new(format!("{}/api/v2", mock_server.uri()))).unwrap();
    let _: Value = client.get("/programs/templates").await.unwrap();
}

// =============================================================================
// Success bodies
// =============================================================================

#[tokio::test]
async fn test_typed_response_body() {
    #[derive(Debug, Deserialize)]
    struct Program {
        id: String,
        name: String,
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/programs/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "p1", "name": "ACL Phase 1"})),
        )
        .mount(&mock_server)
        .await;

    let program: Program = client_for(&mock_server).get("/programs/p1").await.unwrap();
    assert_eq!(program.id, "p1");
    assert_eq!(program.name, "ACL Phase 1");
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/clients/c1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let body: Value = client_for(&mock_server).delete("/clients/c1").await.unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_text_success_body_is_returned_as_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let body: Value = client_for(&mock_server).get("/users").await.unwrap();
    assert_eq!(body, Value::String("not json".into()));
}

#[tokio::test]
async fn test_success_body_of_wrong_shape_is_generic_without_status() {
    #[derive(Debug, Deserialize)]
    struct Count {
        #[allow(dead_code)]
        total: u32,
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get::<Count>("/clients/stats")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.status_code(), None);
    assert_eq!(err.raw_response(), Some(&Value::String("not json".into())));
}

// =============================================================================
// Error normalization
// =============================================================================

#[tokio::test]
async fn test_not_found_uses_body_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .get::<Value>("/users/missing")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.message(), "not found");
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.raw_response(), Some(&json!({"message": "not found"})));
}

#[tokio::test]
async fn test_validation_error_carries_details() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/clients"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"errors": ["email invalid"]})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .post::<Value, _>("/clients", &json!({"email": "nope"}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.validation_details(), ["email invalid"]);
    assert_eq!(err.message(), "HTTP 422: Unprocessable Entity");
}

#[tokio::test]
async fn test_error_field_used_when_message_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/programs/p1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden"})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .delete::<Value>("/programs/p1")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(err.message(), "Forbidden");
}

#[tokio::test]
async fn test_status_kinds_end_to_end() {
    let cases: [(u16, ErrorKind); 6] = [
        (400, ErrorKind::Validation),
        (401, ErrorKind::Authentication),
        (500, ErrorKind::Server),
        (503, ErrorKind::Server),
        (409, ErrorKind::Generic),
        (418, ErrorKind::Generic),
    ];

    for (status, kind) in cases {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).get::<Value>("/x").await.unwrap_err();
        assert_eq!(err.kind(), kind, "status {status}");
        assert_eq!(err.status_code(), Some(status));
        assert!(err.raw_response().is_none());
    }
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_status_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).get::<Value>("/users").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "HTTP 502: Bad Gateway");
    assert_eq!(
        err.raw_response(),
        Some(&Value::String("<html>bad gateway</html>".into()))
    );
}

#[tokio::test]
async fn test_rate_limit_exposes_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "30")
                .set_body_json(json!({"message": "slow down"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).get::<Value>("/clients").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.message(), "slow down");
    assert_eq!(err.retry_after_secs(), Some(30));
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn test_timeout_is_timeout_kind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = CoachClient::new(
        ClientConfig::new(mock_server.uri()).with_timeout(Duration::from_millis(50)),
    )
    .unwrap();

    let err = client.get::<Value>("/slow").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(err.kind().is_network());
    assert!(err.status_code().is_none());
}

#[tokio::test]
async fn test_per_request_timeout_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let options = RequestOptions::new().with_timeout(Duration::from_millis(50));
    let err = client_for(&mock_server)
        .get_with::<Value>("/slow", &options)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_unreachable_host_is_network_kind() {
    let client = CoachClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();

    let err = client.get::<Value>("/users").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.status_code().is_none());
    assert!(std::error::Error::source(&err).is_some());
}

// =============================================================================
// Options and concurrency
// =============================================================================

#[tokio::test]
async fn test_request_options_query_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/clients"))
        .and(query_param("page", "2"))
        .and(query_param("status", "active"))
        .and(header("x-request-id", "req-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = RequestOptions::new()
        .with_query(QueryParams::new().push("page", 2).push("status", "active"))
        .with_header("X-Request-Id", "req-1");

    let _: Value = client_for(&mock_server)
        .get_with("/clients", &options)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_patch_sends_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/clients/c1"))
        .and(body_json(json!({"status": "discharged"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "discharged"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let updated: Value = client_for(&mock_server)
        .patch("/clients/c1", &json!({"status": "discharged"}))
        .await
        .unwrap();
    assert_eq!(updated["status"], "discharged");
}

#[tokio::test]
async fn test_concurrent_calls_resolve_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "u1"}))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/programs/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let other = client.clone();

    let (user, program) = tokio::join!(
        client.get::<Value>("/users/u1"),
        other.get::<Value>("/programs/p1"),
    );

    assert_eq!(user.unwrap()["id"], "u1");
    assert_eq!(program.unwrap()["id"], "p1");
}
