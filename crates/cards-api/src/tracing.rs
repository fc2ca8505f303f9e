//! Logging setup.
//!
//! Development logs are pretty-printed with source locations; production logs
//! are one flattened JSON object per event, request span fields included.
//! `RUST_LOG` replaces the default filter in both modes.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default directives when `RUST_LOG` is unset
fn default_directives(env: &Environment) -> &'static str {
    if env.is_development() {
        "info,cards_api=debug,cards_db=debug,tower_http=debug,sqlx=warn"
    } else {
        "info,tower_http=info,sqlx=warn"
    }
}

/// Install the global subscriber. Panics if one is already installed.
pub fn init_tracing(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::info!(environment = ?env, "Tracing initialized");
}
