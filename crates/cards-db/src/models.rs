use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Topic model - groups flashcards by study subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    /// Unique topic identifier
    pub id: i64,
    /// Topic name (unique by convention, not by constraint)
    pub name: String,
    /// Topic description
    pub description: Option<String>,
    /// When the topic was created
    pub created_at: DateTime<Utc>,
    /// When the topic was last updated
    pub updated_at: DateTime<Utc>,
}

/// Flashcard model - a question/answer pair belonging to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Flashcard {
    /// Unique flashcard identifier
    pub id: i64,
    /// Topic this flashcard belongs to (not enforced by the storage layer)
    pub topic_id: i64,
    /// Question side of the card (unique by convention, not by constraint)
    pub question: String,
    /// Answer side of the card
    pub answer: String,
    /// Difficulty rating, defaults to 1
    pub difficulty_level: i32,
    /// Last time the card was reviewed (only ever set through an update)
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the flashcard was created
    pub created_at: DateTime<Utc>,
    /// When the flashcard was last updated
    pub updated_at: DateTime<Utc>,
}

/// Default difficulty for new flashcards
pub const DEFAULT_DIFFICULTY_LEVEL: i32 = 1;

/// Insert struct for Flashcard
#[derive(Debug, Clone)]
pub struct NewFlashcard {
    pub topic_id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty_level: i32,
}

impl NewFlashcard {
    pub fn new(topic_id: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            topic_id,
            question: question.into(),
            answer: answer.into(),
            difficulty_level: DEFAULT_DIFFICULTY_LEVEL,
        }
    }

    pub fn with_difficulty(mut self, difficulty_level: i32) -> Self {
        self.difficulty_level = difficulty_level;
        self
    }
}

/// Partial update for a topic.
///
/// Text fields are applied only when present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TopicChanges {
    /// Returns `true` when no field would be written
    pub fn is_empty(&self) -> bool {
        supplied(&self.name).is_none() && supplied(&self.description).is_none()
    }
}

/// Partial update for a flashcard.
///
/// Text fields are applied only when present and non-empty, `topic_id` and
/// `difficulty_level` only when present and non-zero, `last_reviewed_at`
/// whenever present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashcardChanges {
    pub topic_id: Option<i64>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty_level: Option<i32>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl FlashcardChanges {
    /// Returns `true` when no field would be written
    pub fn is_empty(&self) -> bool {
        supplied_number(self.topic_id).is_none()
            && supplied(&self.question).is_none()
            && supplied(&self.answer).is_none()
            && supplied_number(self.difficulty_level).is_none()
            && self.last_reviewed_at.is_none()
    }
}

/// An empty string counts as "not supplied" in a change set.
pub(crate) fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Zero counts as "not supplied" in a change set.
pub(crate) fn supplied_number<T>(value: Option<T>) -> Option<T>
where
    T: Copy + Default + PartialEq,
{
    value.filter(|v| *v != T::default())
}
