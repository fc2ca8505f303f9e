//! Database schema definitions.
//!
//! `flashcards.topic_id` declares a reference to `topics(id)`, but the pool
//! runs with `foreign_keys = OFF`: the reference is checked by the API layer
//! on creation only, and deleting a topic leaves its flashcards in place.

/// SQL schema for topics table
pub const TOPICS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS topics (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_topics_name ON topics(name);
"#;

/// SQL schema for flashcards table
pub const FLASHCARDS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS flashcards (
    id INTEGER PRIMARY KEY,
    topic_id INTEGER NOT NULL,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    difficulty_level INTEGER NOT NULL DEFAULT 1,
    last_reviewed_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (topic_id) REFERENCES topics(id)
);

-- Listing a topic's flashcards and dedup lookups are the hot paths
CREATE INDEX IF NOT EXISTS idx_flashcards_topic_id ON flashcards(topic_id);
CREATE INDEX IF NOT EXISTS idx_flashcards_question ON flashcards(question);
"#;

/// Full database schema with all tables
pub fn full_schema() -> String {
    format!("{}\n\n{}", TOPICS_SCHEMA, FLASHCARDS_SCHEMA)
}
