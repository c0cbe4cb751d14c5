use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A geolocated dengue-risk observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub id: Uuid,
    /// JSON document, e.g. `{"lat": -7.11, "lon": -34.86}`.
    pub coordinates: String,
    pub risk_classification: String,
    pub citizen_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A report that has not been stored yet; storage assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub coordinates: String,
    pub risk_classification: String,
    pub citizen_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report joined with the name of the citizen who filed it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CitizenReport {
    #[sqlx(flatten)]
    pub report: Report,
    pub citizen_name: String,
}

/// OR-combined search: a report matches when any provided criterion matches.
/// No criteria means no matches.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportCriteria {
    pub id: Option<Uuid>,
    pub coordinates: Option<String>,
    pub risk_classification: Option<String>,
    pub citizen_id: Option<Uuid>,
}

impl ReportCriteria {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.coordinates.is_none()
            && self.risk_classification.is_none()
            && self.citizen_id.is_none()
    }
}
