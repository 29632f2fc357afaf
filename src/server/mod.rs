//! REST service exposing the engagement engine.
//!
//! ## Routes
//!
//! | Method | Path                     | Purpose                                  |
//! |--------|--------------------------|------------------------------------------|
//! | GET    | `/health`                | liveness and version                     |
//! | GET    | `/engagement`            | filtered summary and details as JSON     |
//! | GET    | `/engagement/export`     | filtered details as a CSV attachment     |
//! | POST   | `/engagement/import`     | CSV upload, raw body or multipart `file` |
//! | GET    | `/engagement/logs/:id`   | one stored log                           |
//!
//! Every query and export request re-reads the store and recomputes the
//! summary. The store sits behind a mutex; an import holds it for the whole
//! batch transaction, so writes never interleave.

pub mod handlers;

use crate::db::engagement_logs::EngagementLogs;
use crate::libs::config::{Config, ImportConfig, ServerConfig};
use crate::libs::error::{ImportSchemaError, NotFoundError};
use crate::libs::messages::Message;
use crate::{msg_error, msg_info, msg_warning};
use anyhow::{Context, Result};
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub logs: Arc<Mutex<EngagementLogs>>,
}

impl AppState {
    pub fn new(logs: EngagementLogs) -> Self {
        Self {
            logs: Arc::new(Mutex::new(logs)),
        }
    }

    /// Runs `f` against the locked store on the blocking thread pool.
    ///
    /// SQLite calls block, so they never run on an async worker.
    pub async fn with_logs<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut EngagementLogs) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let logs = self.logs.clone();
        tokio::task::spawn_blocking(move || f(&mut logs.lock()))
            .await
            .map_err(|e| ApiError::Internal(format!("Blocking task panicked: {}", e)))?
            .map_err(ApiError::from)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    ImportSchema(#[from] ImportSchemaError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An extractor refused the request; keeps the status axum chose.
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Rejected(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(QueryRejection, PathRejection, BytesRejection, MultipartRejection, MultipartError);

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::ImportSchema(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected(status, _) => *status,
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Builds the application router with its body limit, CORS and tracing layers.
pub fn router(state: AppState, server: &ServerConfig, import: &ImportConfig) -> Router {
    let cors = if server.allow_any_origin {
        msg_warning!(Message::ServerCorsAnyOrigin);
        CorsLayer::new().allow_methods(Any).allow_headers(Any).allow_origin(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/engagement", get(handlers::get_engagement))
        .route("/engagement/export", get(handlers::export_engagement))
        .route("/engagement/import", post(handlers::import_engagement))
        .route("/engagement/logs/:id", get(handlers::get_log))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(import.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the service until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let server = config.server.unwrap_or_default();
    let import = config.import.unwrap_or_default();
    let listener = bind(&server).await?;

    let state = AppState::new(EngagementLogs::new()?);
    let app = router(state, &server, &import);

    msg_info!(Message::ServerStarting(listener.local_addr()?.to_string()));

    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        msg_error!(Message::ServerError(e.to_string()));
        return Err(e.into());
    }

    msg_info!(Message::ServerStopped);
    Ok(())
}

/// Binds the configured host and port. Host names are resolved, so
/// `localhost` works as well as a literal address.
pub async fn bind(server: &ServerConfig) -> Result<TcpListener> {
    TcpListener::bind((server.host.as_str(), server.port))
        .await
        .with_context(|| Message::InvalidListenAddress(server.host.clone(), server.port).to_string())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        msg_error!(Message::ServerError(e.to_string()));
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
