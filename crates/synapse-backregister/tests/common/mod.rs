//! Common test utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use secrecy::SecretString;
use synapse_backregister::api::{create_router_with_rate_limit, AppState, RateLimitState};
use synapse_backregister::config::UpstreamConfig;
use synapse_backregister::SynapseClient;
use wiremock::MockServer;

/// Shared secret used by every test.
pub const TEST_SECRET: &str = "test-shared-secret";

/// HMAC-SHA1 of "alice" under `TEST_SECRET`.
pub const ALICE_MAC: &str = "e9a2e354f2f901312646df6357d20c7ad8173973";

/// Start a mock homeserver.
pub async fn mock_homeserver() -> MockServer {
    MockServer::start().await
}

/// Create a homeserver client pointed at `base_url`.
pub fn test_client(base_url: &str) -> SynapseClient {
    SynapseClient::new(base_url, &UpstreamConfig::default()).unwrap()
}

/// Create app state pointed at `base_url`.
pub fn test_state(base_url: &str) -> AppState {
    AppState::new(SecretString::new(TEST_SECRET.to_string()), test_client(base_url))
}

/// Router with a permissive rate limit.
pub fn test_app(base_url: &str) -> axum::Router {
    create_router_with_rate_limit(test_state(base_url), RateLimitState::permissive())
}

/// A base URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Build a form-encoded POST to `/`.
pub fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
