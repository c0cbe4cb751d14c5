use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{FieldErrors, ServiceError};
use super::municipality::{MunicipalityResolver, MunicipalitySearch};
use super::report_service::touched_at;
use crate::auth::Principal;
use crate::database::models::{Citizen, NewQuestionnaire, Questionnaire, QuestionnaireCriteria};
use crate::database::repository::{CitizenRepository, QuestionnaireRepository, Repositories};

/// Fields shared by questionnaire creation and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireFields {
    pub questions: String,
    pub answers: String,
    pub citizen_id: Uuid,
}

impl QuestionnaireFields {
    fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors
            .require_non_blank("questions", &self.questions)
            .require_non_blank("answers", &self.answers);
        errors.into_result("Invalid questionnaire")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuestionnaireRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: QuestionnaireFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionnaireView {
    pub id: Uuid,
    pub questions: String,
    pub answers: String,
    pub citizen_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Questionnaire> for QuestionnaireView {
    fn from(q: Questionnaire) -> Self {
        Self {
            id: q.id,
            questions: q.questions,
            answers: q.answers,
            citizen_id: q.citizen_id,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct QuestionnaireService {
    questionnaires: Arc<dyn QuestionnaireRepository>,
    citizens: Arc<dyn CitizenRepository>,
    municipalities: MunicipalityResolver,
}

impl QuestionnaireService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            questionnaires: repositories.questionnaires.clone(),
            citizens: repositories.citizens.clone(),
            municipalities: MunicipalityResolver::new(repositories.municipalities.clone()),
        }
    }

    pub async fn create(&self, fields: QuestionnaireFields) -> Result<QuestionnaireView, ServiceError> {
        fields.validate()?;
        let citizen = self.find_citizen(fields.citizen_id).await?;

        let now = Utc::now();
        let questionnaire = self
            .questionnaires
            .insert(NewQuestionnaire {
                questions: fields.questions,
                answers: fields.answers,
                citizen_id: citizen.id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!("Questionnaire {} registered for citizen {}", questionnaire.id, citizen.id);
        Ok(questionnaire.into())
    }

    /// `principal` is the caller, used for the audit trail only.
    pub async fn update(
        &self,
        request: UpdateQuestionnaireRequest,
        principal: &Principal,
    ) -> Result<QuestionnaireView, ServiceError> {
        request.fields.validate()?;

        let mut questionnaire = self
            .questionnaires
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Questionnaire {} not found", request.id)))?;
        let citizen = self.find_citizen(request.fields.citizen_id).await?;

        questionnaire.questions = request.fields.questions;
        questionnaire.answers = request.fields.answers;
        questionnaire.citizen_id = citizen.id;
        questionnaire.updated_at = touched_at(questionnaire.created_at, Utc::now());

        let questionnaire = self.questionnaires.update(&questionnaire).await?;

        tracing::info!("Questionnaire {} updated by {}", questionnaire.id, principal.subject);
        Ok(questionnaire.into())
    }

    pub async fn find_all(&self) -> Result<Vec<QuestionnaireView>, ServiceError> {
        Ok(views(self.questionnaires.find_all().await?))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Vec<QuestionnaireView>, ServiceError> {
        Ok(self
            .questionnaires
            .find_by_id(id)
            .await?
            .map(QuestionnaireView::from)
            .into_iter()
            .collect())
    }

    pub async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<QuestionnaireView>, ServiceError> {
        Ok(views(self.questionnaires.find_by_citizen(citizen_id).await?))
    }

    pub async fn find_by_criteria(
        &self,
        criteria: &QuestionnaireCriteria,
    ) -> Result<Vec<QuestionnaireView>, ServiceError> {
        if criteria.is_empty() {
            return Ok(Vec::new());
        }
        Ok(views(self.questionnaires.find_by_criteria(criteria).await?))
    }

    pub async fn find_by_municipality(
        &self,
        search: &MunicipalitySearch,
    ) -> Result<Vec<QuestionnaireView>, ServiceError> {
        let municipality = self.municipalities.resolve(search).await?;
        Ok(views(self.questionnaires.find_by_municipality(municipality.id).await?))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, ServiceError> {
        let removed = self.questionnaires.delete_by_id(id).await?;
        tracing::info!("Deleted questionnaire {} ({} rows)", id, removed);
        Ok(removed)
    }

    pub async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, ServiceError> {
        let removed = self.questionnaires.delete_all_by_citizen(citizen_id).await?;
        tracing::info!("Deleted {} questionnaires of citizen {}", removed, citizen_id);
        Ok(removed)
    }

    async fn find_citizen(&self, id: Uuid) -> Result<Citizen, ServiceError> {
        self.citizens
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Citizen {} not found", id)))
    }
}

fn views(rows: Vec<Questionnaire>) -> Vec<QuestionnaireView> {
    rows.into_iter().map(QuestionnaireView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::State;
    use crate::testing::InMemoryStore;
    use chrono::Duration;

    fn fields(citizen_id: Uuid) -> QuestionnaireFields {
        QuestionnaireFields {
            questions: r#"{"q1": "Nova Perg 1"}"#.to_string(),
            answers: r#"{"q1": "Nova Resp 1"}"#.to_string(),
            citizen_id,
        }
    }

    fn principal() -> Principal {
        Principal::new("agent@denguemaps")
    }

    fn setup() -> (InMemoryStore, QuestionnaireService, Citizen) {
        let store = InMemoryStore::new();
        let citizen = store.add_citizen("Joao Teste", None);
        let service = QuestionnaireService::new(&store.repositories());
        (store, service, citizen)
    }

    #[tokio::test]
    async fn create_stores_questionnaire_for_existing_citizen() {
        let (store, service, citizen) = setup();

        let view = service.create(fields(citizen.id)).await.unwrap();

        assert_eq!(view.citizen_id, citizen.id);
        assert_eq!(view.questions, r#"{"q1": "Nova Perg 1"}"#);
        assert_eq!(store.questionnaire_inserts(), 1);
        assert!(store.questionnaire(view.id).is_some());
    }

    #[tokio::test]
    async fn create_with_unknown_citizen_fails_without_saving() {
        let (store, service, _) = setup();

        let result = service.create(fields(Uuid::new_v4())).await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_eq!(store.questionnaire_inserts(), 0);
    }

    #[tokio::test]
    async fn create_rejects_blank_payloads() {
        let (store, service, citizen) = setup();

        let result = service
            .create(QuestionnaireFields {
                questions: "".to_string(),
                answers: "  ".to_string(),
                citizen_id: citizen.id,
            })
            .await;

        assert!(matches!(result, Err(ServiceError::Validation { fields, .. }) if fields.len() == 2));
        assert_eq!(store.questionnaire_inserts(), 0);
    }

    #[tokio::test]
    async fn update_overwrites_payloads() {
        let (store, service, citizen) = setup();
        let existing = store.add_questionnaire(citizen.id, Utc::now() - Duration::days(2));

        let view = service
            .update(
                UpdateQuestionnaireRequest {
                    id: existing.id,
                    fields: QuestionnaireFields {
                        questions: r#"{"q1": "Perg ATUALIZADA"}"#.to_string(),
                        answers: r#"{"q1": "Resp ATUALIZADA"}"#.to_string(),
                        citizen_id: citizen.id,
                    },
                },
                &principal(),
            )
            .await
            .unwrap();

        assert_eq!(view.questions, r#"{"q1": "Perg ATUALIZADA"}"#);
        let stored = store.questionnaire(existing.id).unwrap();
        assert_eq!(stored.answers, r#"{"q1": "Resp ATUALIZADA"}"#);
        assert!(stored.updated_at > stored.created_at);
        assert_eq!(store.citizen_lookups(), 1);
        assert_eq!(store.questionnaire_updates(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_questionnaire_fails_before_citizen_lookup() {
        let (store, service, citizen) = setup();

        let result = service
            .update(
                UpdateQuestionnaireRequest {
                    id: Uuid::new_v4(),
                    fields: fields(citizen.id),
                },
                &principal(),
            )
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_eq!(store.citizen_lookups(), 0);
        assert_eq!(store.questionnaire_updates(), 0);
    }

    #[tokio::test]
    async fn update_with_unknown_citizen_does_not_persist() {
        let (store, service, citizen) = setup();
        let existing = store.add_questionnaire(citizen.id, Utc::now() - Duration::days(2));

        let result = service
            .update(
                UpdateQuestionnaireRequest {
                    id: existing.id,
                    fields: fields(Uuid::new_v4()),
                },
                &principal(),
            )
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_eq!(store.questionnaire_updates(), 0);
        assert_eq!(store.questionnaire(existing.id).unwrap(), existing);
    }

    #[tokio::test]
    async fn lookups_by_id_and_citizen() {
        let (store, service, citizen) = setup();
        let other = store.add_citizen("Maria Teste", None);
        let mine = store.add_questionnaire(citizen.id, Utc::now());
        store.add_questionnaire(other.id, Utc::now());

        assert_eq!(service.find_all().await.unwrap().len(), 2);
        assert_eq!(service.find_by_id(mine.id).await.unwrap()[0].id, mine.id);
        assert!(service.find_by_id(Uuid::new_v4()).await.unwrap().is_empty());

        let by_citizen = service.find_by_citizen(citizen.id).await.unwrap();
        assert_eq!(by_citizen.len(), 1);
        assert_eq!(by_citizen[0].citizen_id, citizen.id);
    }

    #[tokio::test]
    async fn criteria_are_or_combined() {
        let (store, service, citizen) = setup();
        let other = store.add_citizen("Maria Teste", None);
        let first = store.add_questionnaire(citizen.id, Utc::now());
        let second = store.add_questionnaire(other.id, Utc::now());

        let criteria = QuestionnaireCriteria {
            id: Some(first.id),
            citizen_id: Some(other.id),
            ..Default::default()
        };
        let found = service.find_by_criteria(&criteria).await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|v| v.id == second.id));
        assert!(service.find_by_criteria(&QuestionnaireCriteria::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn municipality_search_scopes_by_citizen_address() {
        let (store, service, outsider) = setup();
        let patos = store.add_municipality("Patos", State::Pb);
        let resident = store.add_citizen("Ana Residente", Some(patos.id));
        let inside = store.add_questionnaire(resident.id, Utc::now());
        store.add_questionnaire(outsider.id, Utc::now());

        let search = MunicipalitySearch {
            name: None,
            id: Some(patos.id),
            state: Some(State::Pb),
        };
        let found = service.find_by_municipality(&search).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inside.id);
    }

    #[tokio::test]
    async fn deletes_by_id_and_citizen() {
        let (store, service, citizen) = setup();
        let single = store.add_questionnaire(citizen.id, Utc::now());
        store.add_questionnaire(citizen.id, Utc::now());
        store.add_questionnaire(citizen.id, Utc::now());

        assert_eq!(service.delete_by_id(single.id).await.unwrap(), 1);
        assert_eq!(service.delete_all_by_citizen(citizen.id).await.unwrap(), 2);
        assert_eq!(service.delete_all_by_citizen(citizen.id).await.unwrap(), 0);
    }
}
