//! Storage seams used by the services.
//!
//! Each trait covers one aggregate. The PostgreSQL implementations live in
//! [`crate::database::postgres`]; tests use the in-memory set in `crate::testing`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Citizen, CitizenReport, Municipality, NewQuestionnaire, NewReport, Questionnaire, QuestionnaireCriteria, Report,
    ReportCriteria, State,
};

#[async_trait]
pub trait CitizenRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Citizen>, DatabaseError>;
}

#[async_trait]
pub trait MunicipalityRepository: Send + Sync {
    async fn find_by_id_and_state(&self, id: Uuid, state: State) -> Result<Option<Municipality>, DatabaseError>;

    async fn find_by_name_and_state(&self, name: &str, state: State) -> Result<Option<Municipality>, DatabaseError>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Stores a new report and returns it with its assigned id.
    async fn insert(&self, report: NewReport) -> Result<Report, DatabaseError>;

    /// Overwrites the mutable columns of an existing report.
    async fn update(&self, report: &Report) -> Result<Report, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DatabaseError>;

    async fn find_with_citizen(&self, id: Uuid) -> Result<Option<CitizenReport>, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<CitizenReport>, DatabaseError>;

    async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<CitizenReport>, DatabaseError>;

    async fn find_by_criteria(&self, criteria: &ReportCriteria) -> Result<Vec<CitizenReport>, DatabaseError>;

    /// Reports filed by citizens whose address lies in the municipality.
    async fn find_by_municipality(&self, municipality_id: Uuid) -> Result<Vec<CitizenReport>, DatabaseError>;

    /// Returns the number of rows removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError>;

    async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, DatabaseError>;
}

#[async_trait]
pub trait QuestionnaireRepository: Send + Sync {
    async fn insert(&self, questionnaire: NewQuestionnaire) -> Result<Questionnaire, DatabaseError>;

    async fn update(&self, questionnaire: &Questionnaire) -> Result<Questionnaire, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Questionnaire>, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<Questionnaire>, DatabaseError>;

    async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<Questionnaire>, DatabaseError>;

    async fn find_by_criteria(&self, criteria: &QuestionnaireCriteria) -> Result<Vec<Questionnaire>, DatabaseError>;

    async fn find_by_municipality(&self, municipality_id: Uuid) -> Result<Vec<Questionnaire>, DatabaseError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError>;

    async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, DatabaseError>;
}

/// The full set of repositories a running service needs.
#[derive(Clone)]
pub struct Repositories {
    pub citizens: Arc<dyn CitizenRepository>,
    pub municipalities: Arc<dyn MunicipalityRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub questionnaires: Arc<dyn QuestionnaireRepository>,
}

impl Repositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        use crate::database::postgres::{
            PgCitizenRepository, PgMunicipalityRepository, PgQuestionnaireRepository, PgReportRepository,
        };

        Self {
            citizens: Arc::new(PgCitizenRepository::new(pool.clone())),
            municipalities: Arc::new(PgMunicipalityRepository::new(pool.clone())),
            reports: Arc::new(PgReportRepository::new(pool.clone())),
            questionnaires: Arc::new(PgQuestionnaireRepository::new(pool)),
        }
    }
}
