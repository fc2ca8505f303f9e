use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer for the flashcard API.
///
/// With no configured origins every origin is allowed, which suits local
/// development. Otherwise only the listed origins may call the API, with the
/// methods the routes actually use.
pub fn create_cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let origins = allowed_origins
        .into_iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<HeaderValue> {
        let app = Router::new().route("/topics", get(|| async { "[]" })).layer(layer);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/topics")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_listed_origin_is_allowed() {
        let layer = create_cors_layer(vec!["http://localhost:8080".to_string()]);
        assert_eq!(
            preflight(layer, "http://localhost:8080").await.unwrap(),
            "http://localhost:8080"
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_is_refused() {
        let layer = create_cors_layer(vec!["http://localhost:8080".to_string()]);
        assert!(preflight(layer, "http://evil.example").await.is_none());
    }

    #[tokio::test]
    async fn test_no_origins_is_permissive() {
        let layer = create_cors_layer(Vec::new());
        assert!(preflight(layer, "http://anywhere.example").await.is_some());
    }
}
