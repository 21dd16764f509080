#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::{Config, MongoEnvKeys, MongoSettings};
use service_core::database::{ConnectionManager, MongoConnector};
use service_core::error::AppError;
use std::sync::Arc;
use tower::util::ServiceExt;
use users_service::config::UsersConfig;
use users_service::{build_router, AppState, Application};

/// Router whose connection manager has no database configured, so nothing
/// ever reaches the network.
pub fn test_router() -> Router {
    build_router(unconfigured_state())
}

pub fn unconfigured_state() -> AppState {
    let db = ConnectionManager::new(
        MongoConnector,
        Arc::new(|| {
            Err(AppError::ConfigError(anyhow::anyhow!(
                "DB_CONNECTION_STRING is required but not set"
            )))
        }),
    );
    AppState::new(Arc::new(db))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("response body is not UTF-8")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> TestResponse {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Full server on a random port against a live MongoDB (`TEST_MONGODB_URI`).
pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let settings = MongoSettings {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("users_test_{}", chrono::Utc::now().timestamp_millis()),
        };
        let db = Arc::new(ConnectionManager::new(
            MongoConnector,
            Arc::new(move || Ok(settings.clone())),
        ));

        let config = UsersConfig {
            common: Config {
                port: 0,
                log_level: "error".to_string(),
                otlp_endpoint: None,
            },
            mongo_keys: MongoEnvKeys::SERVICE,
        };

        let app = Application::build(config, db)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped(std::future::pending()).await.ok();
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
        }
    }
}
