use axum::extract::FromRef;
use cards_db::Store;

use crate::ApiConfig;

/// Shared handler state. The store is built by the caller and injected here,
/// so tests and deployments each get their own instance.
#[derive(Clone, Debug)]
pub struct ApiState {
    pub store: Store,
}

impl ApiState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open the configured database and make sure the schema exists
    pub async fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let store = Store::connect(&config.database_url, config.db_max_connections).await?;
        store.ensure_schema().await?;

        tracing::info!(database_url = %config.database_url, "Store ready");

        Ok(Self::new(store))
    }
}

impl FromRef<ApiState> for Store {
    fn from_ref(state: &ApiState) -> Self {
        state.store.clone()
    }
}
