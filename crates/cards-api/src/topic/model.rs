use cards_db::models::TopicChanges;
use serde::{Deserialize, Serialize};

/// Body of `POST /topics`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTopicRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PATCH /topics/{topic_id}`; absent or empty fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTopicRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<UpdateTopicRequest> for TopicChanges {
    fn from(request: UpdateTopicRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}
