//! API error type and its HTTP mapping.
//!
//! Lookups that miss produce `404 {"detail": ...}` with a fixed message per
//! entity. Anything unexpected, store failures and handler panics included,
//! becomes `500 {"status": 500, "reason": ...}`.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const TOPIC_NOT_FOUND: &str = "Тема не найдена";
pub const FLASHCARD_NOT_FOUND: &str = "Карточка не найдена";
/// Only used by flashcard updates
pub const FLASHCARD_ID_NOT_FOUND: &str = "Карточка с указанным id не найдена";
/// Reason reported for internal errors that carry no message of their own
pub const INTERNAL_ERROR_FALLBACK: &str = "Произошла непредвиденная ошибка сервера.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", TOPIC_NOT_FOUND)]
    TopicNotFound,
    #[error("{}", FLASHCARD_NOT_FOUND)]
    FlashcardNotFound,
    #[error("{}", FLASHCARD_ID_NOT_FOUND)]
    FlashcardIdNotFound,
    #[error(transparent)]
    InvalidPath(#[from] PathRejection),
    #[error(transparent)]
    InvalidPayload(#[from] JsonRejection),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::TopicNotFound | Self::FlashcardNotFound | Self::FlashcardIdNotFound => {
                detail_response(StatusCode::NOT_FOUND, self.to_string())
            }
            Self::InvalidPath(rejection) => {
                tracing::debug!("Rejected request path: {rejection}");
                detail_response(rejection.status(), rejection.body_text())
            }
            Self::InvalidPayload(rejection) => {
                tracing::debug!("Rejected request body: {rejection}");
                detail_response(rejection.status(), rejection.body_text())
            }
            Self::Database(e) => {
                tracing::error!("Database error: {e}");
                internal_error_response(e.to_string())
            }
        }
    }
}

fn detail_response(status: StatusCode, detail: String) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Build the 500 body, substituting the fallback for an empty reason
pub fn internal_error_response(reason: String) -> Response {
    let reason = if reason.is_empty() {
        INTERNAL_ERROR_FALLBACK.to_string()
    } else {
        reason
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            "reason": reason,
        })),
    )
        .into_response()
}

/// Turn a handler panic into a 500 response, for `CatchPanicLayer::custom`
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        String::new()
    };

    tracing::error!("Handler panicked: {reason}");
    internal_error_response(reason)
}
