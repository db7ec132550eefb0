//! HTTP serving layer.
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `GET /`, `GET /health` | [`ChatService::health`] |
//! | `GET /items/{file}?page=N` | [`ChatService::get_page`] (page defaults to 1) |
//! | `GET /items/{file}/meta[?page=N]` | [`ChatService::get_meta`] |
//!
//! Transcript reads run on the blocking thread pool. Errors render as
//! `{"detail": "<message>"}` with the status from
//! [`KakaoDayError::status_hint`]. A missing transcript always reads
//! `File not found`, so response bodies never carry server paths. Malformed
//! query strings get the same body shape with status 400.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, ServiceConfig};
use crate::core::models::DayRecord;
use crate::error::KakaoDayError;
use crate::service::{ChatService, Health, MetaResponse};

/// Shared handler state.
#[derive(Clone)]
struct AppState {
    service: Arc<ChatService>,
}

/// Builds the router for `service`.
pub fn router(service: ChatService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_health))
        .route("/health", get(handle_health))
        .route("/items/{file}", get(handle_page))
        .route("/items/{file}/meta", get(handle_meta))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Binds to `server.bind` and serves until the process is terminated.
pub async fn run_server(config: ServiceConfig, server: &ServerConfig) -> crate::Result<()> {
    let input_dir = config.input_dir.display().to_string();
    let app = router(ChatService::new(config));

    let listener = tokio::net::TcpListener::bind(&server.bind).await?;
    tracing::info!(bind = %server.bind, input_dir, "serving transcripts");
    println!("Listening on http://{}", server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// A request failure on its way out as an HTTP response.
enum ApiError {
    Service(KakaoDayError),
    Query(QueryRejection),
}

impl From<KakaoDayError> for ApiError {
    fn from(err: KakaoDayError) -> Self {
        Self::Service(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Query(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Service(KakaoDayError::FileNotFound { path }) => {
                tracing::debug!(path = %path.display(), "transcript not found");
                (StatusCode::NOT_FOUND, "File not found".to_string())
            }
            ApiError::Service(err) => {
                let status = StatusCode::from_u16(err.status_hint())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                (status, err.to_string())
            }
            ApiError::Query(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

// ============ Handlers ============

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

async fn handle_health(State(state): State<AppState>) -> Json<Health> {
    Json(state.service.health())
}

async fn handle_page(
    State(state): State<AppState>,
    Path(file): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<DayRecord>, ApiError> {
    let Query(query) = query?;
    let page = query.page.unwrap_or(1);
    let record = state.service.get_page_async(file, page).await?;
    Ok(Json(record))
}

async fn handle_meta(
    State(state): State<AppState>,
    Path(file): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<MetaResponse>, ApiError> {
    let Query(query) = query?;
    let meta = state.service.get_meta_async(file, query.page).await?;
    Ok(Json(meta))
}
