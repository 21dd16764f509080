//! In-memory user routes under /v1/users.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{delete, get, post_json, send, test_router};
use serde_json::json;
use users_service::models::{DEFAULT_EMAIL, DEFAULT_NAME};

#[tokio::test]
async fn create_user_returns_201_with_default_email() {
    let app = test_router();

    let response = post_json(&app, "/v1/users", r#"{"name":"Ada"}"#).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["email"], DEFAULT_EMAIL);
    assert!(body["user"]["id"].is_i64());
}

#[tokio::test]
async fn create_user_trims_and_defaults_blank_values() {
    let app = test_router();

    let response = post_json(
        &app,
        "/v1/users",
        r#"{"name":"   ","email":"  ada@example.com  "}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["user"]["name"], DEFAULT_NAME);
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn create_user_without_body_uses_placeholders() {
    let app = test_router();

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/v1/users")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["user"]["name"], DEFAULT_NAME);
    assert_eq!(body["user"]["email"], DEFAULT_EMAIL);
}

#[tokio::test]
async fn create_user_rejects_malformed_json() {
    let app = test_router();

    let response = post_json(&app, "/v1/users", r#"{"name": "Ada""#).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["ok"], false);
}

#[tokio::test]
async fn list_users_reports_count() {
    let app = test_router();

    let empty = get(&app, "/v1/users").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json(), json!({ "ok": true, "count": 0, "users": [] }));

    post_json(&app, "/v1/users", r#"{"name":"Ada"}"#).await;
    post_json(&app, "/v1/users", r#"{"name":"Grace"}"#).await;

    let body = get(&app, "/v1/users").await.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["users"][0]["name"], "Ada");
    assert_eq!(body["users"][1]["name"], "Grace");
}

#[tokio::test]
async fn get_user_returns_created_user() {
    let app = test_router();
    let created = post_json(&app, "/v1/users", r#"{"name":"Ada"}"#).await.json();
    let id = created["user"]["id"].as_i64().unwrap();

    let response = get(&app, &format!("/v1/users/{}", id)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "ok": true, "user": created["user"] }));
}

#[tokio::test]
async fn get_unknown_user_returns_404() {
    let app = test_router();

    let response = get(&app, "/v1/users/12345").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({ "ok": false, "error": "Not found" }));
}

#[tokio::test]
async fn get_user_with_non_numeric_id_returns_400() {
    let app = test_router();

    let response = get(&app, "/v1/users/abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_user_removes_only_the_match() {
    let app = test_router();
    let first = post_json(&app, "/v1/users", r#"{"name":"Ada"}"#).await.json();
    let second = post_json(&app, "/v1/users", r#"{"name":"Grace"}"#).await.json();
    let first_id = first["user"]["id"].as_i64().unwrap();
    let second_id = second["user"]["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/v1/users/{}", first_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "ok": true, "removed": first["user"] })
    );

    let gone = get(&app, &format!("/v1/users/{}", first_id)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let kept = get(&app, &format!("/v1/users/{}", second_id)).await;
    assert_eq!(kept.status, StatusCode::OK);

    let list = get(&app, "/v1/users").await.json();
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn delete_unknown_user_returns_404() {
    let app = test_router();

    let response = delete(&app, "/v1/users/1").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Not found");
}
