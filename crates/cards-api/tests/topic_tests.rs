use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::{
    setup,
    test_data::{create_topic, id, tick, timestamp},
};

#[tokio::test]
async fn test_list_topics_empty() {
    let (_state, client) = setup().await;

    let response = client.get("/topics").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_create_topic() {
    let (_state, client) = setup().await;

    let response = client
        .post_json("/topics", &json!({ "name": "Rust", "description": "Ownership" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let topic: Value = response.json();
    assert!(id(&topic) > 0);
    assert_eq!(topic["name"], "Rust");
    assert_eq!(topic["description"], "Ownership");
    assert_eq!(
        timestamp(&topic["created_at"]),
        timestamp(&topic["updated_at"])
    );

    let listed: Value = client.get("/topics").await.json();
    assert_eq!(listed, json!([topic]));
}

#[tokio::test]
async fn test_create_topic_without_description() {
    let (_state, client) = setup().await;

    let response = client.post_json("/topics", &json!({ "name": "Go" })).await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["description"], Value::Null);
}

#[tokio::test]
async fn test_create_topic_with_existing_name_returns_existing() {
    let (_state, client) = setup().await;

    let first = create_topic(&client, "Rust", "Ownership").await;

    let response = client
        .post_json("/topics", &json!({ "name": "Rust", "description": "Something else" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let second: Value = response.json();
    assert_eq!(second, first);

    let listed: Vec<Value> = client.get("/topics").await.json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_list_topics_in_insertion_order() {
    let (_state, client) = setup().await;

    let rust = create_topic(&client, "Rust", "").await;
    let go = create_topic(&client, "Go", "").await;

    let listed: Vec<Value> = client.get("/topics").await.json();
    let ids: Vec<i64> = listed.iter().map(id).collect();
    assert_eq!(ids, vec![id(&rust), id(&go)]);
}

#[tokio::test]
async fn test_get_topic() {
    let (_state, client) = setup().await;
    let topic = create_topic(&client, "Rust", "Ownership").await;

    let response = client.get(&format!("/topics/{}", id(&topic))).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), topic);
}

#[tokio::test]
async fn test_get_missing_topic() {
    let (_state, client) = setup().await;

    let response = client.get("/topics/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_detail("Тема не найдена");
}

#[tokio::test]
async fn test_update_topic_partially() {
    let (_state, client) = setup().await;
    let topic = create_topic(&client, "Rust", "Ownership").await;
    tick().await;

    let response = client
        .patch_json(
            &format!("/topics/{}", id(&topic)),
            &json!({ "description": "Borrowing" }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Rust");
    assert_eq!(updated["description"], "Borrowing");
    assert_eq!(updated["created_at"], topic["created_at"]);
    assert!(timestamp(&updated["updated_at"]) > timestamp(&topic["updated_at"]));

    let fetched: Value = client.get(&format!("/topics/{}", id(&topic))).await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_topic_ignores_empty_strings() {
    let (_state, client) = setup().await;
    let topic = create_topic(&client, "Rust", "Ownership").await;

    let response = client
        .patch_json(
            &format!("/topics/{}", id(&topic)),
            &json!({ "name": "", "description": "" }),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Rust");
    assert_eq!(updated["description"], "Ownership");
}

#[tokio::test]
async fn test_empty_update_refreshes_updated_at() {
    let (_state, client) = setup().await;
    let topic = create_topic(&client, "Rust", "Ownership").await;
    tick().await;

    let response = client
        .patch_json(&format!("/topics/{}", id(&topic)), &json!({}))
        .await;

    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["name"], topic["name"]);
    assert_eq!(updated["description"], topic["description"]);
    assert!(timestamp(&updated["updated_at"]) > timestamp(&topic["updated_at"]));
}

#[tokio::test]
async fn test_update_missing_topic() {
    let (_state, client) = setup().await;

    let response = client
        .patch_json("/topics/42", &json!({ "name": "Anything" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_detail("Тема не найдена");
}

#[tokio::test]
async fn test_delete_topic() {
    let (_state, client) = setup().await;
    let topic = create_topic(&client, "Rust", "").await;
    let uri = format!("/topics/{}", id(&topic));

    let response = client.delete(&uri).await;

    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(response.json::<Value>(), json!({ "status": "accepted" }));

    client.get(&uri).await.assert_status(StatusCode::NOT_FOUND);

    let again = client.delete(&uri).await;
    again.assert_status(StatusCode::NOT_FOUND);
    again.assert_detail("Тема не найдена");
}

#[tokio::test]
async fn test_delete_missing_topic() {
    let (_state, client) = setup().await;

    let response = client.delete("/topics/7").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_detail("Тема не найдена");
}

#[tokio::test]
async fn test_topics_are_isolated_between_states() {
    let (_first_state, first) = setup().await;
    let (_second_state, second) = setup().await;

    create_topic(&first, "Rust", "").await;

    let listed: Vec<Value> = second.get("/topics").await.json();
    assert!(listed.is_empty());
}
