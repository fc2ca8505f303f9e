use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use cards_db::Store;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error, flashcard, state::ApiState, topic};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(topic::routes())
        .merge(flashcard::routes())
        .fallback(handler_404)
        .layer(CatchPanicLayer::custom(error::handle_panic))
}

/// Liveness: the process is up
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Readiness: the database answers
async fn readiness(State(store): State<Store>) -> StatusCode {
    match store.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
