use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::not_found;
use crate::database::manager::DatabaseError;
use crate::database::models::{CitizenReport, NewReport, Report, ReportCriteria};
use crate::database::repository::ReportRepository;

const REPORT_COLUMNS: &str =
    "r.id, r.coordinates::text AS coordinates, r.risk_classification, r.citizen_id, r.created_at, r.updated_at";

const RETURNING_COLUMNS: &str =
    "RETURNING id, coordinates::text AS coordinates, risk_classification, citizen_id, created_at, updated_at";

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn joined_select(condition: &str) -> String {
        format!(
            "SELECT {}, c.name AS citizen_name FROM report r JOIN citizen c ON c.id = r.citizen_id {} ORDER BY r.created_at",
            REPORT_COLUMNS, condition
        )
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, report: NewReport) -> Result<Report, DatabaseError> {
        let sql = format!(
            "INSERT INTO report (coordinates, risk_classification, citizen_id, created_at, updated_at) \
             VALUES (CAST($1 AS jsonb), $2, $3, $4, $5) {}",
            RETURNING_COLUMNS
        );

        let stored = sqlx::query_as::<_, Report>(&sql)
            .bind(&report.coordinates)
            .bind(&report.risk_classification)
            .bind(report.citizen_id)
            .bind(report.created_at)
            .bind(report.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }

    async fn update(&self, report: &Report) -> Result<Report, DatabaseError> {
        let sql = format!(
            "UPDATE report SET coordinates = CAST($2 AS jsonb), risk_classification = $3, citizen_id = $4, updated_at = $5 \
             WHERE id = $1 {}",
            RETURNING_COLUMNS
        );

        sqlx::query_as::<_, Report>(&sql)
            .bind(report.id)
            .bind(&report.coordinates)
            .bind(&report.risk_classification)
            .bind(report.citizen_id)
            .bind(report.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| not_found("Report", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, DatabaseError> {
        let sql = format!("SELECT {} FROM report r WHERE r.id = $1", REPORT_COLUMNS);
        let report = sqlx::query_as::<_, Report>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(report)
    }

    async fn find_with_citizen(&self, id: Uuid) -> Result<Option<CitizenReport>, DatabaseError> {
        let sql = Self::joined_select("WHERE r.id = $1");
        let report = sqlx::query_as::<_, CitizenReport>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(report)
    }

    async fn find_all(&self) -> Result<Vec<CitizenReport>, DatabaseError> {
        let sql = Self::joined_select("");
        let reports = sqlx::query_as::<_, CitizenReport>(&sql).fetch_all(&self.pool).await?;
        Ok(reports)
    }

    async fn find_by_citizen(&self, citizen_id: Uuid) -> Result<Vec<CitizenReport>, DatabaseError> {
        let sql = Self::joined_select("WHERE r.citizen_id = $1");
        let reports = sqlx::query_as::<_, CitizenReport>(&sql)
            .bind(citizen_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    async fn find_by_criteria(&self, criteria: &ReportCriteria) -> Result<Vec<CitizenReport>, DatabaseError> {
        // Criteria are OR-combined; a NULL parameter disables its branch.
        let sql = Self::joined_select(
            "WHERE ($1::uuid IS NOT NULL AND r.id = $1) \
             OR ($2::text IS NOT NULL AND r.coordinates = CAST($2 AS jsonb)) \
             OR ($3::text IS NOT NULL AND r.risk_classification = $3) \
             OR ($4::uuid IS NOT NULL AND r.citizen_id = $4)",
        );

        let reports = sqlx::query_as::<_, CitizenReport>(&sql)
            .bind(criteria.id)
            .bind(criteria.coordinates.as_deref())
            .bind(criteria.risk_classification.as_deref())
            .bind(criteria.citizen_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    async fn find_by_municipality(&self, municipality_id: Uuid) -> Result<Vec<CitizenReport>, DatabaseError> {
        let sql = Self::joined_select("JOIN address a ON a.id = c.address_id WHERE a.municipality_id = $1");
        let reports = sqlx::query_as::<_, CitizenReport>(&sql)
            .bind(municipality_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reports)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM report WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_all_by_citizen(&self, citizen_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM report WHERE citizen_id = $1")
            .bind(citizen_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
