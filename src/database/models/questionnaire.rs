use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Question/answer submission filed by a citizen. Both payloads are opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Questionnaire {
    pub id: Uuid,
    pub questions: String,
    pub answers: String,
    pub citizen_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionnaire {
    pub questions: String,
    pub answers: String,
    pub citizen_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// OR-combined search over questionnaires, same rules as report criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuestionnaireCriteria {
    pub id: Option<Uuid>,
    pub questions: Option<String>,
    pub answers: Option<String>,
    pub citizen_id: Option<Uuid>,
}

impl QuestionnaireCriteria {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.questions.is_none() && self.answers.is_none() && self.citizen_id.is_none()
    }
}
