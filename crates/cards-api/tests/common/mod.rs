#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cards_api::{router, state::ApiState};
use cards_db::Store;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;

/// Test state builder: every build gets its own in-memory database
pub struct TestStateBuilder;

impl TestStateBuilder {
    pub fn new() -> Self {
        Self
    }

    pub async fn build(self) -> anyhow::Result<ApiState> {
        let store = Store::in_memory().await?;
        Ok(ApiState::new(store))
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a fresh state and a client for the full application router
pub async fn setup() -> (ApiState, TestClient) {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");

    let app = router::router().with_state(state.clone());
    (state, TestClient::new(app))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send("DELETE", uri, None).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        self.send("POST", uri, Some(json_body)).await
    }

    pub async fn patch_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        self.send("PATCH", uri, Some(json_body)).await
    }

    /// Send a raw body with a JSON content type, for malformed payloads
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send("POST", uri, Some(body.to_string())).await
    }

    async fn send(&self, method: &str, uri: &str, json_body: Option<String>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);

        let request = match json_body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Parse response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// Assert a `{"detail": ...}` body
    pub fn assert_detail(&self, expected: &str) {
        let json: Value = self.json();
        assert_eq!(json["detail"], expected, "Body: {}", self.text());
    }
}

/// Test data helpers
pub mod test_data {
    use super::*;
    use serde_json::json;

    /// Create a topic through the API and return its JSON
    pub async fn create_topic(client: &TestClient, name: &str, description: &str) -> Value {
        let response = client
            .post_json("/topics", &json!({ "name": name, "description": description }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// Create a flashcard under `topic_id` through the API and return its JSON
    pub async fn create_flashcard(
        client: &TestClient,
        topic_id: i64,
        question: &str,
        answer: &str,
    ) -> Value {
        let response = client
            .post_json(
                &format!("/topics/{topic_id}/flashcards"),
                &json!({ "question": question, "answer": answer, "difficulty_level": 1 }),
            )
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub fn id(value: &Value) -> i64 {
        value["id"].as_i64().expect("id should be an integer")
    }

    pub fn timestamp(value: &Value) -> DateTime<Utc> {
        let raw = value.as_str().expect("timestamp should be a string");
        DateTime::parse_from_rfc3339(raw)
            .expect("timestamp should be RFC 3339")
            .with_timezone(&Utc)
    }

    /// Let the clock move so `updated_at` comparisons are strict
    pub async fn tick() {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
}
