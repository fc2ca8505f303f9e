use cards_db::models::{DEFAULT_DIFFICULTY_LEVEL, FlashcardChanges, NewFlashcard};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /topics/{topic_id}/flashcards`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFlashcardRequest {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_difficulty_level")]
    pub difficulty_level: i32,
}

fn default_difficulty_level() -> i32 {
    DEFAULT_DIFFICULTY_LEVEL
}

impl CreateFlashcardRequest {
    pub fn into_new_flashcard(self, topic_id: i64) -> NewFlashcard {
        NewFlashcard::new(topic_id, self.question, self.answer).with_difficulty(self.difficulty_level)
    }
}

/// Body of `PATCH /flashcards/{flashcard_id}`; absent or empty fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFlashcardRequest {
    #[serde(default)]
    pub topic_id: Option<i64>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl From<UpdateFlashcardRequest> for FlashcardChanges {
    fn from(request: UpdateFlashcardRequest) -> Self {
        Self {
            topic_id: request.topic_id,
            question: request.question,
            answer: request.answer,
            difficulty_level: request.difficulty_level,
            last_reviewed_at: request.last_reviewed_at,
        }
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => value.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
    }
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}
