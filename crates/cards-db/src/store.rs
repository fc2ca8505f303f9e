use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    models::{Flashcard, FlashcardChanges, NewFlashcard, Topic, TopicChanges},
    repositories::{flashcard, topic},
};

/// Handle to the topics and flashcards tables.
///
/// Every call goes straight to the database; nothing is cached. Each
/// operation commits on its own, so concurrent writers on the same row are
/// only serialized by SQLite itself.
///
/// Creation is create-or-return: a topic whose name, or a flashcard whose
/// question, matches an existing row is not inserted and the existing row is
/// returned instead. Retries are idempotent, but two distinct entities that
/// share a name or question are silently merged.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a store on `database_url`. The schema is not created.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = crate::create_pool(database_url, max_connections).await?;
        Ok(Self::new(pool))
    }

    /// Fresh in-memory store with the schema in place.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let store = Self::connect("sqlite::memory:", 1).await?;
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        crate::ensure_schema(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to check the database is reachable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // Topics

    pub async fn list_topics(&self) -> Result<Vec<Topic>, sqlx::Error> {
        topic::list_all(&self.pool).await
    }

    pub async fn get_topic(&self, topic_id: i64) -> Result<Option<Topic>, sqlx::Error> {
        topic::find_by_id(&self.pool, topic_id).await
    }

    pub async fn get_topic_by_name(&self, name: &str) -> Result<Option<Topic>, sqlx::Error> {
        topic::find_by_name(&self.pool, name).await
    }

    /// Create a topic, or return the existing one with the same name unchanged.
    pub async fn create_topic(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Topic, sqlx::Error> {
        if let Some(existing) = topic::find_by_name(&self.pool, name).await? {
            tracing::debug!(topic_id = existing.id, "Topic name already exists, returning it");
            return Ok(existing);
        }

        topic::insert(&self.pool, name, description, Utc::now()).await
    }

    /// Apply the supplied fields and refresh `updated_at`.
    ///
    /// An empty change set still refreshes `updated_at`. Returns `None` only
    /// when the topic does not exist.
    pub async fn update_topic(
        &self,
        topic_id: i64,
        changes: &TopicChanges,
    ) -> Result<Option<Topic>, sqlx::Error> {
        topic::update(&self.pool, topic_id, changes, Utc::now()).await
    }

    /// Delete a topic. Its flashcards are left in place.
    pub async fn delete_topic(&self, topic_id: i64) -> Result<bool, sqlx::Error> {
        topic::delete(&self.pool, topic_id).await
    }

    // Flashcards

    pub async fn list_flashcards(&self) -> Result<Vec<Flashcard>, sqlx::Error> {
        flashcard::list_all(&self.pool).await
    }

    pub async fn list_flashcards_by_topic(
        &self,
        topic_id: i64,
    ) -> Result<Vec<Flashcard>, sqlx::Error> {
        flashcard::list_by_topic(&self.pool, topic_id).await
    }

    pub async fn get_flashcard(&self, flashcard_id: i64) -> Result<Option<Flashcard>, sqlx::Error> {
        flashcard::find_by_id(&self.pool, flashcard_id).await
    }

    pub async fn get_flashcard_by_question(
        &self,
        question: &str,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        flashcard::find_by_question(&self.pool, question).await
    }

    /// Create a flashcard, or return the existing one with the same question unchanged.
    ///
    /// The topic is not checked here; callers verify it exists first.
    pub async fn create_flashcard(&self, new: &NewFlashcard) -> Result<Flashcard, sqlx::Error> {
        if let Some(existing) = flashcard::find_by_question(&self.pool, &new.question).await? {
            tracing::debug!(
                flashcard_id = existing.id,
                "Flashcard question already exists, returning it"
            );
            return Ok(existing);
        }

        flashcard::insert(&self.pool, new, Utc::now()).await
    }

    /// Apply the supplied fields and refresh `updated_at`.
    ///
    /// Same contract as [`Store::update_topic`].
    pub async fn update_flashcard(
        &self,
        flashcard_id: i64,
        changes: &FlashcardChanges,
    ) -> Result<Option<Flashcard>, sqlx::Error> {
        flashcard::update(&self.pool, flashcard_id, changes, Utc::now()).await
    }

    pub async fn delete_flashcard(&self, flashcard_id: i64) -> Result<bool, sqlx::Error> {
        flashcard::delete(&self.pool, flashcard_id).await
    }
}
