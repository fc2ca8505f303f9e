pub mod models;
pub mod repositories;
pub mod schema;
mod store;

pub use store::Store;

use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Create a SQLite connection pool, creating the database file if it is missing.
///
/// In-memory databases live only as long as their connection, so they are
/// pinned to a single connection that is never recycled.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url: {database_url}"))?
        .create_if_missing(true)
        // `flashcards.topic_id` is a logical reference only
        .foreign_keys(false);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Create both tables and their indexes (no-op if they already exist).
pub async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(&schema::full_schema())
        .execute(pool)
        .await
        .context("failed to create database schema")?;

    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
