use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite};

use crate::models::{Flashcard, FlashcardChanges, NewFlashcard, supplied, supplied_number};

const FLASHCARD_COLUMNS: &str = "id, topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at";

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at
            FROM flashcards
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn list_by_topic<'e, E>(executor: E, topic_id: i64) -> Result<Vec<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at
            FROM flashcards
            WHERE topic_id = ?
            ORDER BY id
        "#,
    )
    .bind(topic_id)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, flashcard_id: i64) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at
            FROM flashcards
            WHERE id = ?
        "#,
    )
    .bind(flashcard_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_question<'e, E>(
    executor: E,
    question: &str,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            SELECT id, topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at
            FROM flashcards
            WHERE question = ?
            ORDER BY id
            LIMIT 1
        "#,
    )
    .bind(question)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e, E>(
    executor: E,
    flashcard: &NewFlashcard,
    now: DateTime<Utc>,
) -> Result<Flashcard, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as(
        // language=SQLite
        r#"
            INSERT INTO flashcards (topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, NULL, ?, ?)
            RETURNING id, topic_id, question, answer, difficulty_level, last_reviewed_at, created_at, updated_at
        "#,
    )
    .bind(flashcard.topic_id)
    .bind(flashcard.question.as_str())
    .bind(flashcard.answer.as_str())
    .bind(flashcard.difficulty_level)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Apply `changes` and stamp `updated_at` in a single statement.
///
/// A non-zero `topic_id` is written as given; whether the topic exists is
/// not checked.
/// Returns `None` when no flashcard has the given id.
pub async fn update<'e, E>(
    executor: E,
    flashcard_id: i64,
    changes: &FlashcardChanges,
    now: DateTime<Utc>,
) -> Result<Option<Flashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut query = QueryBuilder::<Sqlite>::new("UPDATE flashcards SET ");
    let mut set = query.separated(", ");

    if let Some(topic_id) = supplied_number(changes.topic_id) {
        set.push("topic_id = ").push_bind_unseparated(topic_id);
    }
    if let Some(question) = supplied(&changes.question) {
        set.push("question = ")
            .push_bind_unseparated(question.to_owned());
    }
    if let Some(answer) = supplied(&changes.answer) {
        set.push("answer = ").push_bind_unseparated(answer.to_owned());
    }
    if let Some(difficulty_level) = supplied_number(changes.difficulty_level) {
        set.push("difficulty_level = ")
            .push_bind_unseparated(difficulty_level);
    }
    if let Some(last_reviewed_at) = changes.last_reviewed_at {
        set.push("last_reviewed_at = ")
            .push_bind_unseparated(last_reviewed_at);
    }
    set.push("updated_at = ").push_bind_unseparated(now);

    query.push(" WHERE id = ").push_bind(flashcard_id);
    query.push(" RETURNING ").push(FLASHCARD_COLUMNS);

    query
        .build_query_as::<Flashcard>()
        .fetch_optional(executor)
        .await
}

pub async fn delete<'e, E>(executor: E, flashcard_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        // language=SQLite
        r#"
            DELETE FROM flashcards WHERE id = ?
        "#,
    )
    .bind(flashcard_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
