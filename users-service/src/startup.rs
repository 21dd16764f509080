//! Router assembly and server lifecycle.

use crate::config::UsersConfig;
use crate::handlers;
use crate::services::UserStore;
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::database::MongoConnectionManager;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, request_span},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<MongoConnectionManager>,
    pub users: Arc<UserStore>,
}

impl AppState {
    pub fn new(db: Arc<MongoConnectionManager>) -> Self {
        Self {
            db,
            users: Arc::new(UserStore::new()),
        }
    }
}

/// All routes, before state and middleware are applied.
///
/// Static segments win over `/:id` in axum's matcher, so the numeric echo
/// route does not shadow `/health`, `/metrics` or `/v1/users`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::hello_world).fallback(handlers::route_not_found),
        )
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::route_not_found),
        )
        .route(
            "/metrics",
            get(handlers::metrics).fallback(handlers::route_not_found),
        )
        .route(
            "/v1/users",
            post(handlers::create_user)
                .get(handlers::list_users)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/v1/users/:id",
            get(handlers::get_user)
                .delete(handlers::delete_user)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/:id",
            get(handlers::echo_numeric_id).fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
}

/// Panic handling, metrics, request logging and request ids, innermost first.
pub fn apply_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span::<Body>)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(from_fn(request_id_middleware))
}

pub fn build_router(state: AppState) -> Router {
    apply_middleware(api_routes().with_state(state))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Verifies the database with one acquire and ping, then binds the listener.
    /// Nothing is bound if the probe fails.
    pub async fn build(
        config: UsersConfig,
        db: Arc<MongoConnectionManager>,
    ) -> Result<Self, AppError> {
        let handle = db.acquire().await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;
        if let Err(e) = handle.ping().await {
            db.release().await;
            return Err(e);
        }
        tracing::info!("Database is up");

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
                db.release().await;
                return Err(AppError::from(e));
            }
        };
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(db),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves until `shutdown` resolves, drains in-flight requests, then
    /// releases the database connection.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = build_router(self.state.clone());
        let result = axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        self.state.db.release().await;
        result
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
