use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::not_found;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewQuestionnaire, Questionnaire, QuestionnaireCriteria};
use crate::database::repository::QuestionnaireRepository;

const COLUMNS: &str = "q.id, q.questions, q.answers, q.citizen_id, q.created_at, q.updated_at";

pub struct PgQuestionnaireRepository {
    pool: PgPool,
}

impl PgQuestionnaireRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select(&self, condition: &str, params: &[Uuid]) -> Result<Vec<Questionnaire>, DatabaseError> {
        let sql = format!("SELECT {} FROM questionnaire q {} ORDER BY q.created_at", COLUMNS, condition);
        let mut query = sqlx::query_as::<_, Questionnaire>(&sql);
        for param in params {
            query = query.bind(*param);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl QuestionnaireRepository for PgQuestionnaireRepository {
    async fn insert(&self, questionnaire: NewQuestionnaire) -> Result<Questionnaire, DatabaseError> {
        let stored = sqlx::query_as::<_, Questionnaire>(
            "INSERT INTO questionnaire (questions, answers, citizen_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, questions, answers, citizen_id, created_at, updated_at",
        )
        .bind(&questionnaire.questions)
        .bind(&questionnaire.answers)
        .bind(questionnaire.citizen_id)
        .bind(questionnaire.created_at)
        .bind(questionnaire.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, questionnaire: &Questionnaire) -> Result<Questionnaire, DatabaseError> {
        sqlx::query_as::<_, Questionnaire>(
            "UPDATE questionnaire SET questions = $2, answers = $3, citizen_id = $4, updated_at = $5 \
             WHERE id = $1 \
             RETURNING id, questions, answers, citizen_id, created_at, updated_at",
        )
        .bind(questionnaire.id)
        .bind(&questionnaire.questions)
        .bind(&questionnaire.answers)
        .bind(questionnaire.citizen_id)
        .bind(questionnaire.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| not_found("Questionnaire", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Questionnaire>, DatabaseError> {
        Ok(self.select("WHERE q.id = $1", &[id]).await?.into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<Questionnaire>, DatabaseError> {
        self.select("", &[]).await
    }

    async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<Questionnaire>, DatabaseError> {
        self.select("WHERE q.citizen_id = $1", &[citizen_id]).await
    }

    async fn find_by_criteria(&self, criteria: &QuestionnaireCriteria) -> Result<Vec<Questionnaire>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM questionnaire q \
             WHERE ($1::uuid IS NOT NULL AND q.id = $1) \
             OR ($2::text IS NOT NULL AND q.questions = $2) \
             OR ($3::text IS NOT NULL AND q.answers = $3) \
             OR ($4::uuid IS NOT NULL AND q.citizen_id = $4) \
             ORDER BY q.created_at",
            COLUMNS
        );

        let questionnaires = sqlx::query_as::<_, Questionnaire>(&sql)
            .bind(criteria.id)
            .bind(criteria.questions.as_deref())
            .bind(criteria.answers.as_deref())
            .bind(criteria.citizen_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(questionnaires)
    }

    async fn find_by_municipality(&self, municipality_id: Uuid) -> Result<Vec<Questionnaire>, DatabaseError> {
        self.select(
            "JOIN citizen c ON c.id = q.citizen_id JOIN address a ON a.id = c.address_id WHERE a.municipality_id = $1",
            &[municipality_id],
        )
        .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM questionnaire WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM questionnaire WHERE citizen_id = $1")
            .bind(citizen_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
