//! In-memory repositories for service and router tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Address, Citizen, CitizenReport, Municipality, NewQuestionnaire, NewReport, Questionnaire, QuestionnaireCriteria, Report,
    ReportCriteria, State,
};
use crate::database::repository::{
    CitizenRepository, MunicipalityRepository, QuestionnaireRepository, ReportRepository, Repositories,
};

fn stored_report(report: NewReport, id: Uuid) -> Report {
    Report {
        id,
        coordinates: report.coordinates,
        risk_classification: report.risk_classification,
        citizen_id: report.citizen_id,
        created_at: report.created_at,
        updated_at: report.updated_at,
    }
}

fn stored_questionnaire(questionnaire: NewQuestionnaire, id: Uuid) -> Questionnaire {
    Questionnaire {
        id,
        questions: questionnaire.questions,
        answers: questionnaire.answers,
        citizen_id: questionnaire.citizen_id,
        created_at: questionnaire.created_at,
        updated_at: questionnaire.updated_at,
    }
}

/// Any-of match, mirroring the SQL `WHERE ... OR ...` branches.
fn report_matches(criteria: &ReportCriteria, report: &Report) -> bool {
    criteria.id.is_some_and(|id| id == report.id)
        || criteria
            .coordinates
            .as_deref()
            .is_some_and(|c| same_json(c, &report.coordinates))
        || criteria
            .risk_classification
            .as_deref()
            .is_some_and(|r| r == report.risk_classification)
        || criteria.citizen_id.is_some_and(|c| c == report.citizen_id)
}

fn questionnaire_matches(criteria: &QuestionnaireCriteria, questionnaire: &Questionnaire) -> bool {
    criteria.id.is_some_and(|id| id == questionnaire.id)
        || criteria.questions.as_deref().is_some_and(|q| q == questionnaire.questions)
        || criteria.answers.as_deref().is_some_and(|a| a == questionnaire.answers)
        || criteria.citizen_id.is_some_and(|c| c == questionnaire.citizen_id)
}

/// Like the `jsonb` equality: key order and whitespace don't matter.
/// Text that is not JSON never matches.
fn same_json(a: &str, b: &str) -> bool {
    match (serde_json::from_str::<Value>(a), serde_json::from_str::<Value>(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[derive(Default)]
struct Tables {
    citizens: Vec<Citizen>,
    addresses: Vec<Address>,
    municipalities: Vec<Municipality>,
    reports: Vec<Report>,
    questionnaires: Vec<Questionnaire>,
    report_inserts: usize,
    report_updates: usize,
    questionnaire_inserts: usize,
    questionnaire_updates: usize,
    citizen_lookups: usize,
}

impl Tables {
    fn citizen_name(&self, citizen_id: Uuid) -> Option<String> {
        self.citizens.iter().find(|c| c.id == citizen_id).map(|c| c.name.clone())
    }

    /// Inner join, like the SQL one: reports of unknown citizens are dropped.
    fn joined<'a>(&self, reports: impl Iterator<Item = &'a Report>) -> Vec<CitizenReport> {
        let mut rows: Vec<CitizenReport> = reports
            .filter_map(|report| {
                self.citizen_name(report.citizen_id).map(|citizen_name| CitizenReport {
                    report: report.clone(),
                    citizen_name,
                })
            })
            .collect();
        rows.sort_by_key(|row| row.report.created_at);
        rows
    }

    /// citizen -> address -> municipality, like the SQL join.
    fn resides_in(&self, citizen_id: Uuid, municipality_id: Uuid) -> bool {
        self.citizens
            .iter()
            .find(|c| c.id == citizen_id)
            .and_then(|c| c.address_id)
            .and_then(|address_id| self.addresses.iter().find(|a| a.id == address_id))
            .is_some_and(|address| address.municipality_id == municipality_id)
    }
}

/// Cheap to clone; clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            citizens: Arc::new(self.clone()),
            municipalities: Arc::new(self.clone()),
            reports: Arc::new(self.clone()),
            questionnaires: Arc::new(self.clone()),
        }
    }

    pub fn add_municipality(&self, name: &str, state: State) -> Municipality {
        let municipality = Municipality {
            id: Uuid::new_v4(),
            name: name.to_string(),
            state,
        };
        self.lock().municipalities.push(municipality.clone());
        municipality
    }

    /// With a municipality, the citizen also gets an address there.
    pub fn add_citizen(&self, name: &str, municipality_id: Option<Uuid>) -> Citizen {
        let address = municipality_id.map(|municipality_id| Address {
            id: Uuid::new_v4(),
            street: "Rua das Trincheiras".to_string(),
            number: Some("100".to_string()),
            district: Some("Centro".to_string()),
            postal_code: Some("58000-000".to_string()),
            municipality_id,
        });
        let citizen = Citizen {
            id: Uuid::new_v4(),
            name: name.to_string(),
            national_id: Uuid::new_v4().simple().to_string()[..11].to_string(),
            address_id: address.as_ref().map(|a| a.id),
        };

        let mut tables = self.lock();
        tables.addresses.extend(address);
        tables.citizens.push(citizen.clone());
        citizen
    }

    pub fn add_report(&self, citizen_id: Uuid, risk_classification: &str, created_at: DateTime<Utc>) -> Report {
        let report = Report {
            id: Uuid::new_v4(),
            coordinates: r#"{"lat": -7.23, "lon": -35.88}"#.to_string(),
            risk_classification: risk_classification.to_string(),
            citizen_id,
            created_at,
            updated_at: created_at,
        };
        self.lock().reports.push(report.clone());
        report
    }

    pub fn add_questionnaire(&self, citizen_id: Uuid, created_at: DateTime<Utc>) -> Questionnaire {
        let questionnaire = Questionnaire {
            id: Uuid::new_v4(),
            questions: r#"{"q1": "Há água parada?"}"#.to_string(),
            answers: r#"{"q1": "Sim"}"#.to_string(),
            citizen_id,
            created_at,
            updated_at: created_at,
        };
        self.lock().questionnaires.push(questionnaire.clone());
        questionnaire
    }

    pub fn report(&self, id: Uuid) -> Option<Report> {
        self.lock().reports.iter().find(|r| r.id == id).cloned()
    }

    pub fn questionnaire(&self, id: Uuid) -> Option<Questionnaire> {
        self.lock().questionnaires.iter().find(|q| q.id == id).cloned()
    }

    pub fn report_inserts(&self) -> usize {
        self.lock().report_inserts
    }

    pub fn report_updates(&self) -> usize {
        self.lock().report_updates
    }

    pub fn questionnaire_inserts(&self) -> usize {
        self.lock().questionnaire_inserts
    }

    pub fn questionnaire_updates(&self) -> usize {
        self.lock().questionnaire_updates
    }

    pub fn citizen_lookups(&self) -> usize {
        self.lock().citizen_lookups
    }
}

#[async_trait]
impl CitizenRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Citizen>, DatabaseError> {
        let mut tables = self.lock();
        tables.citizen_lookups += 1;
        Ok(tables.citizens.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl MunicipalityRepository for InMemoryStore {
    async fn find_by_id_and_state(&self, id: Uuid, state: State) -> Result<Option<Municipality>, DatabaseError> {
        Ok(self
            .lock()
            .municipalities
            .iter()
            .find(|m| m.id == id && m.state == state)
            .cloned())
    }

    async fn find_by_name_and_state(&self, name: &str, state: State) -> Result<Option<Municipality>, DatabaseError> {
        Ok(self
            .lock()
            .municipalities
            .iter()
            .find(|m| m.name == name && m.state == state)
            .cloned())
    }
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn insert(&self, report: NewReport) -> Result<Report, DatabaseError> {
        let report = stored_report(report, Uuid::new_v4());
        let mut tables = self.lock();
        tables.report_inserts += 1;
        tables.reports.push(report.clone());
        Ok(report)
    }

    async fn update(&self, report: &Report) -> Result<Report, DatabaseError> {
        let mut tables = self.lock();
        let slot = tables
            .reports
            .iter_mut()
            .find(|r| r.id == report.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Report {} not found", report.id)))?;
        *slot = report.clone();
        tables.report_updates += 1;
        Ok(report.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DatabaseError> {
        Ok(self.report(id))
    }

    async fn find_with_citizen(&self, id: Uuid) -> Result<Option<CitizenReport>, DatabaseError> {
        let tables = self.lock();
        Ok(tables.joined(tables.reports.iter().filter(|r| r.id == id)).into_iter().next())
    }

    async fn find_all(&self) -> Result<Vec<CitizenReport>, DatabaseError> {
        let tables = self.lock();
        Ok(tables.joined(tables.reports.iter()))
    }

    async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<CitizenReport>, DatabaseError> {
        let tables = self.lock();
        Ok(tables.joined(tables.reports.iter().filter(|r| r.citizen_id == citizen_id)))
    }

    async fn find_by_criteria(&self, criteria: &ReportCriteria) -> Result<Vec<CitizenReport>, DatabaseError> {
        let tables = self.lock();
        Ok(tables.joined(tables.reports.iter().filter(|r| report_matches(criteria, r))))
    }

    async fn find_by_municipality(&self, municipality_id: Uuid) -> Result<Vec<CitizenReport>, DatabaseError> {
        let tables = self.lock();
        Ok(tables.joined(
            tables
                .reports
                .iter()
                .filter(|r| tables.resides_in(r.citizen_id, municipality_id)),
        ))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let mut tables = self.lock();
        let before = tables.reports.len();
        tables.reports.retain(|r| r.id != id);
        Ok((before - tables.reports.len()) as u64)
    }

    async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, DatabaseError> {
        let mut tables = self.lock();
        let before = tables.reports.len();
        tables.reports.retain(|r| r.citizen_id != citizen_id);
        Ok((before - tables.reports.len()) as u64)
    }
}

#[async_trait]
impl QuestionnaireRepository for InMemoryStore {
    async fn insert(&self, questionnaire: NewQuestionnaire) -> Result<Questionnaire, DatabaseError> {
        let questionnaire = stored_questionnaire(questionnaire, Uuid::new_v4());
        let mut tables = self.lock();
        tables.questionnaire_inserts += 1;
        tables.questionnaires.push(questionnaire.clone());
        Ok(questionnaire)
    }

    async fn update(&self, questionnaire: &Questionnaire) -> Result<Questionnaire, DatabaseError> {
        let mut tables = self.lock();
        let slot = tables
            .questionnaires
            .iter_mut()
            .find(|q| q.id == questionnaire.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Questionnaire {} not found", questionnaire.id)))?;
        *slot = questionnaire.clone();
        tables.questionnaire_updates += 1;
        Ok(questionnaire.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Questionnaire>, DatabaseError> {
        Ok(self.questionnaire(id))
    }

    async fn find_all(&self) -> Result<Vec<Questionnaire>, DatabaseError> {
        Ok(self.lock().questionnaires.clone())
    }

    async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<Questionnaire>, DatabaseError> {
        Ok(self
            .lock()
            .questionnaires
            .iter()
            .filter(|q| q.citizen_id == citizen_id)
            .cloned()
            .collect())
    }

    async fn find_by_criteria(&self, criteria: &QuestionnaireCriteria) -> Result<Vec<Questionnaire>, DatabaseError> {
        Ok(self
            .lock()
            .questionnaires
            .iter()
            .filter(|q| questionnaire_matches(criteria, q))
            .cloned()
            .collect())
    }

    async fn find_by_municipality(&self, municipality_id: Uuid) -> Result<Vec<Questionnaire>, DatabaseError> {
        let tables = self.lock();
        Ok(tables
            .questionnaires
            .iter()
            .filter(|q| tables.resides_in(q.citizen_id, municipality_id))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let mut tables = self.lock();
        let before = tables.questionnaires.len();
        tables.questionnaires.retain(|q| q.id != id);
        Ok((before - tables.questionnaires.len()) as u64)
    }

    async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, DatabaseError> {
        let mut tables = self.lock();
        let before = tables.questionnaires.len();
        tables.questionnaires.retain(|q| q.citizen_id != citizen_id);
        Ok((before - tables.questionnaires.len()) as u64)
    }
}

mod tests {
    use super::*;

    fn report(risk: &str) -> Report {
        let now = Utc::now();
        Report {
            id: Uuid::new_v4(),
            coordinates: r#"{"lat": 1.0, "lon": 2.0}"#.to_string(),
            risk_classification: risk.to_string(),
            citizen_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_criteria_match_nothing() {
        assert!(!report_matches(&ReportCriteria::default(), &report("ALTO")));
    }

    #[test]
    fn criteria_are_or_combined() {
        let target = report("ALTO");
        let criteria = ReportCriteria {
            id: Some(Uuid::new_v4()),
            risk_classification: Some("ALTO".to_string()),
            ..Default::default()
        };
        assert!(report_matches(&criteria, &target));
        assert!(!report_matches(&criteria, &report("BAIXO")));
    }

    #[test]
    fn coordinates_compare_as_json() {
        let target = report("ALTO");
        let reordered = ReportCriteria {
            coordinates: Some(r#"{"lon":2.0,"lat":1.0}"#.to_string()),
            ..Default::default()
        };
        let blank = ReportCriteria {
            coordinates: Some(String::new()),
            ..Default::default()
        };
        assert!(report_matches(&reordered, &target));
        assert!(!report_matches(&blank, &target));
    }
}
