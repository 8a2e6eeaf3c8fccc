mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let request_id_header = response
        .headers()
        .get("x-request-id")
        .expect("Missing x-request-id header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!request_id_header.is_empty());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_i64());
    assert_eq!(body["username"], "alice123");
    assert_eq!(body["email"], "a@example.com");
    // The hash never leaves the storage boundary
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    // First registration succeeds
    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same email, different username
    let response = app
        .post("/register")
        .json(&json!({
            "username": "bob456",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["fields"]["email"], "already exists");
    assert!(body["error"]["fields"].get("username").is_none());
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Same username, different email
    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "b@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["fields"]["username"], "already exists");
}

#[tokio::test]
async fn test_register_collects_all_invalid_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "ab",
            "password": "short",
            "email": "not-an-email"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "validation failed");

    let fields = body["error"]["fields"]
        .as_object()
        .expect("Expected field map");
    assert_eq!(fields.len(), 3);
    assert_eq!(fields["username"], "failed on min");
    assert_eq!(fields["password"], "failed on min");
    assert_eq!(fields["email"], "failed on email");
}

#[tokio::test]
async fn test_register_single_invalid_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "ab",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let fields = body["error"]["fields"]
        .as_object()
        .expect("Expected field map");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["username"], "failed on min");
}

#[tokio::test]
async fn test_register_unknown_field_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "invalid JSON");
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "invalid JSON");
}

#[tokio::test]
async fn test_register_oversized_body() {
    let app = TestApp::spawn().await;

    // 2 MiB body, double the ceiling
    let padding = "a".repeat(2 * 1024 * 1024);
    let response = app
        .post("/register")
        .header("content-type", "application/json")
        .body(format!(
            r#"{{"username":"alice123","password":"{}","email":"a@example.com"}}"#,
            padding
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "invalid JSON");
}

#[tokio::test]
async fn test_login_success_sets_session_cookie() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice123",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("Missing set-cookie header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=86400"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_login_by_email() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/login")
        .json(&json!({
            "email": "a@example.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.post("/register")
        .json(&json!({
            "username": "alice123",
            "password": "secret1",
            "email": "a@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Known username, wrong password
    let wrong_password = app
        .post("/login")
        .json(&json!({
            "username": "alice123",
            "password": "wrongpw"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value = wrong_password
        .json()
        .await
        .expect("Failed to parse response");

    // Unknown username
    let unknown_user = app
        .post("/login")
        .json(&json!({
            "username": "nobody99",
            "password": "wrongpw"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user: serde_json::Value =
        unknown_user.json().await.expect("Failed to parse response");

    // Bodies must match apart from the request id
    assert_eq!(wrong_password["error"], unknown_user["error"]);
    assert_eq!(wrong_password["error"]["code"], "UNAUTHENTICATED");
    assert_eq!(wrong_password["error"]["message"], "invalid credentials");
    assert!(wrong_password["error"].get("fields").is_none());
    assert_ne!(wrong_password["request_id"], unknown_user["request_id"]);
}

#[tokio::test]
async fn test_login_requires_an_identifier() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(
        body["error"]["message"],
        "either username or email must be provided"
    );

    let fields = body["error"]["fields"]
        .as_object()
        .expect("Expected field map");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["username"], "required if email is empty");
    assert_eq!(fields["email"], "required if username is empty");
}

#[tokio::test]
async fn test_login_short_password_fails_validation() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice123",
            "password": "pw"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["fields"]["password"], "failed on min");
}
