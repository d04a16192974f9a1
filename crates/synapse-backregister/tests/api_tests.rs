//! Integration tests for the registration page.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{
    body_text, form_post, mock_homeserver, test_app, test_state, unreachable_url, ALICE_MAC,
};
use synapse_backregister::api::{create_router_with_rate_limit, RateLimitState};
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const REGISTER: &str = "/_matrix/client/r0/register";

#[tokio::test]
async fn test_get_renders_empty_form() {
    let app = test_app(&unreachable_url());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("<form method=\"POST\">"));
    assert!(!page.contains("<h2>"));
}

#[tokio::test]
async fn test_empty_username() {
    let mock_server = mock_homeserver().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let response = app
        .oneshot(form_post("Username=&Password=short"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Must enter a username"));
}

#[tokio::test]
async fn test_weak_password() {
    let mock_server = mock_homeserver().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let response = app
        .oneshot(form_post("Username=alice&Password=123456789"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Password must be 10+ chars"));
}

#[tokio::test]
async fn test_missing_fields_treated_as_empty() {
    let app = test_app(&unreachable_url());

    let response = app.oneshot(form_post("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Must enter a username"));
}

#[tokio::test]
async fn test_non_form_body_treated_as_empty() {
    let app = test_app(&unreachable_url());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "text/plain")
                .body(Body::from("Username=alice"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Must enter a username"));
}

#[tokio::test]
async fn test_successful_registration() {
    let mock_server = mock_homeserver().await;
    Mock::given(method("POST"))
        .and(path(REGISTER))
        .and(body_json(serde_json::json!({
            "username": "alice",
            "password": "correct horse",
            "mac": ALICE_MAC,
            "auth": { "type": "org.matrix.login.shared_secret" }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let response = app
        .oneshot(form_post("Username=alice&Password=correct+horse&Submit=Submit"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("You&#39;re registered!"));
}

#[tokio::test]
async fn test_username_taken_mirrors_status() {
    let mock_server = mock_homeserver().await;
    Mock::given(method("POST"))
        .and(path(REGISTER))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errcode": "M_USER_IN_USE",
            "error": "User ID already taken."
        })))
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let response = app
        .oneshot(form_post("Username=alice&Password=correcthorse"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Username already in use"));
}

#[tokio::test]
async fn test_rejection_mirrors_status() {
    let mock_server = mock_homeserver().await;
    Mock::given(method("POST"))
        .and(path(REGISTER))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid username"))
        .mount(&mock_server)
        .await;

    let app = test_app(&mock_server.uri());
    let response = app
        .oneshot(form_post("Username=alice&Password=correcthorse"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Registration error :(!"));
}

#[tokio::test]
async fn test_unreachable_homeserver() {
    let app = test_app(&unreachable_url());

    let response = app
        .oneshot(form_post("Username=alice&Password=correcthorse"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response)
        .await
        .contains("Error hitting registration server"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(&unreachable_url());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["upstream_healthy"], false);
}

#[tokio::test]
async fn test_rate_limiting_applies_to_submissions_only() {
    let app = create_router_with_rate_limit(
        test_state(&unreachable_url()),
        RateLimitState::new(1),
    );

    // First submission is processed
    let response = app.clone().oneshot(form_post("Username=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Second submission is rate limited
    let response = app.clone().oneshot(form_post("Username=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(body_text(response).await.contains("Too many registration attempts"));

    // Page loads are not counted
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_post_to_other_paths_does_not_use_submission_quota() {
    let app = create_router_with_rate_limit(
        test_state(&unreachable_url()),
        RateLimitState::new(1),
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    // The one allowed submission is still available
    let response = app.oneshot(form_post("Username=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("Must enter a username"));
}
