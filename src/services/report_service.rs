use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{FieldErrors, ServiceError};
use super::municipality::{MunicipalityResolver, MunicipalitySearch};
use crate::database::models::{Citizen, CitizenReport, NewReport, Report, ReportCriteria};
use crate::database::repository::{CitizenRepository, ReportRepository, Repositories};

/// Fields shared by report creation and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFields {
    pub coordinates: String,
    pub risk_classification: String,
    pub citizen_id: Uuid,
}

impl ReportFields {
    fn validate(&self) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();
        errors
            .require_non_blank("coordinates", &self.coordinates)
            .require_json("coordinates", &self.coordinates)
            .require_non_blank("risk_classification", &self.risk_classification);
        errors.into_result("Invalid report")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReportRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: ReportFields,
}

/// What clients see of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub id: Uuid,
    pub coordinates: String,
    pub risk_classification: String,
    pub citizen_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportView {
    fn from_parts(report: Report, citizen_name: String) -> Self {
        Self {
            id: report.id,
            coordinates: report.coordinates,
            risk_classification: report.risk_classification,
            citizen_name,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

impl From<CitizenReport> for ReportView {
    fn from(row: CitizenReport) -> Self {
        Self::from_parts(row.report, row.citizen_name)
    }
}

#[derive(Clone)]
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    citizens: Arc<dyn CitizenRepository>,
    municipalities: MunicipalityResolver,
}

impl ReportService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            reports: repositories.reports.clone(),
            citizens: repositories.citizens.clone(),
            municipalities: MunicipalityResolver::new(repositories.municipalities.clone()),
        }
    }

    pub async fn create(&self, fields: ReportFields) -> Result<ReportView, ServiceError> {
        fields.validate()?;
        let citizen = self.find_citizen(fields.citizen_id).await?;

        let now = Utc::now();
        let report = self
            .reports
            .insert(NewReport {
                coordinates: fields.coordinates,
                risk_classification: fields.risk_classification,
                citizen_id: citizen.id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!("Report {} created for citizen {}", report.id, citizen.id);
        Ok(ReportView::from_parts(report, citizen.name))
    }

    pub async fn update(&self, request: UpdateReportRequest) -> Result<ReportView, ServiceError> {
        request.fields.validate()?;

        let mut report = self
            .reports
            .find_by_id(request.id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Report {} not found", request.id)))?;
        let citizen = self.find_citizen(request.fields.citizen_id).await?;

        report.coordinates = request.fields.coordinates;
        report.risk_classification = request.fields.risk_classification;
        report.citizen_id = citizen.id;
        report.updated_at = touched_at(report.created_at, Utc::now());

        let report = self.reports.update(&report).await?;

        tracing::info!("Report {} updated", report.id);
        Ok(ReportView::from_parts(report, citizen.name))
    }

    pub async fn find_all(&self) -> Result<Vec<ReportView>, ServiceError> {
        Ok(views(self.reports.find_all().await?))
    }

    /// Zero or one element.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Vec<ReportView>, ServiceError> {
        Ok(self
            .reports
            .find_with_citizen(id)
            .await?
            .map(ReportView::from)
            .into_iter()
            .collect())
    }

    pub async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<ReportView>, ServiceError> {
        Ok(views(self.reports.find_by_citizen(citizen_id).await?))
    }

    /// Any-of search; see [`ReportCriteria`].
    pub async fn find_by_criteria(&self, criteria: &ReportCriteria) -> Result<Vec<ReportView>, ServiceError> {
        if let Some(coordinates) = criteria.coordinates.as_deref() {
            let mut errors = FieldErrors::new();
            errors
                .require_non_blank("coordinates", coordinates)
                .require_json("coordinates", coordinates);
            errors.into_result("Invalid search criteria")?;
        }
        if criteria.is_empty() {
            return Ok(Vec::new());
        }

        Ok(views(self.reports.find_by_criteria(criteria).await?))
    }

    pub async fn find_by_municipality(&self, search: &MunicipalitySearch) -> Result<Vec<ReportView>, ServiceError> {
        let municipality = self.municipalities.resolve(search).await?;
        let reports = self.reports.find_by_municipality(municipality.id).await?;

        tracing::debug!(
            "{} reports found for municipality {} ({})",
            reports.len(),
            municipality.name,
            municipality.state
        );
        Ok(views(reports))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, ServiceError> {
        let removed = self.reports.delete_by_id(id).await?;
        tracing::info!("Deleted report {} ({} rows)", id, removed);
        Ok(removed)
    }

    pub async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, ServiceError> {
        let removed = self.reports.delete_all_by_citizen(citizen_id).await?;
        tracing::info!("Deleted {} reports of citizen {}", removed, citizen_id);
        Ok(removed)
    }

    async fn find_citizen(&self, id: Uuid) -> Result<Citizen, ServiceError> {
        self.citizens
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("Citizen {} not found", id)))
    }
}

fn views(rows: Vec<CitizenReport>) -> Vec<ReportView> {
    rows.into_iter().map(ReportView::from).collect()
}

/// Update timestamp, kept strictly after creation even under clock skew.
pub(crate) fn touched_at(created_at: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > created_at {
        now
    } else {
        created_at + Duration::microseconds(1)
    }
}
