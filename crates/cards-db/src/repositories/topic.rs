use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite};

use crate::models::{Topic, TopicChanges, supplied};

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, name, description, created_at, updated_at
            FROM topics
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, topic_id: i64) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, name, description, created_at, updated_at
            FROM topics
            WHERE id = ?
        "#,
    )
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, name, description, created_at, updated_at
            FROM topics
            WHERE name = ?
            ORDER BY id
            LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(
    executor: E,
    name: &str,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Topic, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            INSERT INTO topics (name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, description, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Apply `changes` and stamp `updated_at` in a single statement.
///
/// Returns `None` when no topic has the given id.
pub async fn update<'e, E>(
    executor: E,
    topic_id: i64,
    changes: &TopicChanges,
    now: DateTime<Utc>,
) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut query = QueryBuilder::<Sqlite>::new("UPDATE topics SET ");
    let mut set = query.separated(", ");

    if let Some(name) = supplied(&changes.name) {
        set.push("name = ").push_bind_unseparated(name.to_owned());
    }
    if let Some(description) = supplied(&changes.description) {
        set.push("description = ")
            .push_bind_unseparated(description.to_owned());
    }
    set.push("updated_at = ").push_bind_unseparated(now);

    query.push(" WHERE id = ").push_bind(topic_id);
    query.push(" RETURNING id, name, description, created_at, updated_at");

    query
        .build_query_as::<Topic>()
        .fetch_optional(executor)
        .await
}

pub async fn delete<'e, E>(executor: E, topic_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            DELETE FROM topics WHERE id = ?
        "#,
    )
    .bind(topic_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
