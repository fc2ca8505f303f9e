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
    models::{Topic, TopicChanges},
};
use serde_json::{Value, json};

use crate::{ApiState, error::ApiError};

use super::model::{CreateTopicRequest, UpdateTopicRequest};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics).post(create_topic))
        .route(
            "/topics/{topic_id}",
            get(get_topic).patch(update_topic).delete(delete_topic),
        )
}

async fn list_topics(State(store): State<Store>) -> Result<Json<Vec<Topic>>, ApiError> {
    Ok(Json(store.list_topics().await?))
}

async fn get_topic(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Topic>, ApiError> {
    let Path(topic_id) = path?;
    store
        .get_topic(topic_id)
        .await?
        .map(Json)
        .ok_or(ApiError::TopicNotFound)
}

/// Create a topic, or return the existing topic with the same name
async fn create_topic(
    State(store): State<Store>,
    payload: Result<Json<CreateTopicRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Topic>), ApiError> {
    let Json(payload) = payload?;

    let topic = store
        .create_topic(&payload.name, payload.description.as_deref())
        .await?;

    tracing::info!(topic_id = topic.id, "Topic created");

    Ok((StatusCode::CREATED, Json(topic)))
}

async fn update_topic(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateTopicRequest>, JsonRejection>,
) -> Result<Json<Topic>, ApiError> {
    let Path(topic_id) = path?;
    let Json(payload) = payload?;
    let changes = TopicChanges::from(payload);

    let topic = store
        .update_topic(topic_id, &changes)
        .await?
        .ok_or(ApiError::TopicNotFound)?;

    tracing::info!(topic_id, "Topic updated");

    Ok(Json(topic))
}

/// Delete a topic. Its flashcards are kept.
async fn delete_topic(
    State(store): State<Store>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Path(topic_id) = path?;
    if !store.delete_topic(topic_id).await? {
        return Err(ApiError::TopicNotFound);
    }

    tracing::info!(topic_id, "Topic deleted");

    Ok((StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))))
}
