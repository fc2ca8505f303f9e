use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use cards_db::{
    Store,
    models::{Flashcard, FlashcardChanges},
};
use serde_json::{Value, json};

use crate::{ApiState, error::ApiError};

use super::model::{CreateFlashcardRequest, UpdateFlashcardRequest};

/// Create the flashcard routes, including the ones scoped to a topic
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/flashcards", get(list_flashcards))
        .route(
            "/flashcards/{flashcard_id}",
            get(get_flashcard)
                .patch(update_flashcard)
                .delete(delete_flashcard),
        )
        .route(
            "/topics/{topic_id}/flashcards",
            get(list_topic_flashcards).post(create_flashcard),
        )
}

async fn list_flashcards(State(store): State<Store>) -> Result<Json<Vec<Flashcard>>, ApiError> {
    Ok(Json(store.list_flashcards().await?))
}

async fn get_flashcard(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Flashcard>, ApiError> {
    let Path(flashcard_id) = path?;
    store
        .get_flashcard(flashcard_id)
        .await?
        .map(Json)
        .ok_or(ApiError::FlashcardNotFound)
}

/// Fail with `TopicNotFound` unless the topic exists
async fn require_topic(store: &Store, topic_id: i64) -> Result<(), ApiError> {
    match store.get_topic(topic_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::TopicNotFound),
    }
}

async fn list_topic_flashcards(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let Path(topic_id) = path?;
    require_topic(&store, topic_id).await?;

    Ok(Json(store.list_flashcards_by_topic(topic_id).await?))
}

/// Create a flashcard under an existing topic, or return the existing
/// flashcard with the same question
async fn create_flashcard(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateFlashcardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Flashcard>), ApiError> {
    let Path(topic_id) = path?;
    let Json(payload) = payload?;

    require_topic(&store, topic_id).await?;

    let flashcard = store
        .create_flashcard(&payload.into_new_flashcard(topic_id))
        .await?;

    tracing::info!(flashcard_id = flashcard.id, topic_id, "Flashcard created");

    Ok((StatusCode::CREATED, Json(flashcard)))
}

/// Partially update a flashcard. A new `topic_id` is stored as given.
async fn update_flashcard(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateFlashcardRequest>, JsonRejection>,
) -> Result<Json<Flashcard>, ApiError> {
    let Path(flashcard_id) = path?;
    let Json(payload) = payload?;
    let changes = FlashcardChanges::from(payload);

    let flashcard = store
        .update_flashcard(flashcard_id, &changes)
        .await?
        .ok_or(ApiError::FlashcardIdNotFound)?;

    tracing::info!(flashcard_id, "Flashcard updated");

    Ok(Json(flashcard))
}

async fn delete_flashcard(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Path(flashcard_id) = path?;
    if !store.delete_flashcard(flashcard_id).await? {
        return Err(ApiError::FlashcardNotFound);
    }

    tracing::info!(flashcard_id, "Flashcard deleted");

    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}
