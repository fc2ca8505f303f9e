use axum::{Router, middleware, routing::get};
use cards_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables (and `.env` if present)
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    cards_api::tracing::init_tracing(&config.env);

    let metrics_handle = cards_api::metrics::init_metrics()?;

    // Open the store and inject it into the application state
    let state = ApiState::from_config(&config).await?;

    let cors = cards_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(cards_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = cards_api::router::router()
        .with_state(state.clone())
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(cards_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            cards_api::middleware::request_id::request_id_middleware,
        ));

    let app = cards_api::middleware::security_headers::apply_security_headers(app, config.env.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
