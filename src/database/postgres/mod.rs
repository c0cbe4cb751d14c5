//! PostgreSQL-backed repositories.

mod citizen;
mod municipality;
mod questionnaire;
mod report;

pub use citizen::PgCitizenRepository;
pub use municipality::PgMunicipalityRepository;
pub use questionnaire::PgQuestionnaireRepository;
pub use report::PgReportRepository;

use crate::database::manager::DatabaseError;

/// Maps an empty `fetch_one` to a not-found error naming the entity.
pub(crate) fn not_found(entity: &str, err: sqlx::Error) -> DatabaseError {
    match err {
        sqlx::Error::RowNotFound => DatabaseError::NotFound(format!("{} not found", entity)),
        other => DatabaseError::Sqlx(other),
    }
}
