use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A person who may submit reports and questionnaires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Citizen {
    pub id: Uuid,
    pub name: String,
    /// CPF, as entered.
    pub national_id: String,
    pub address_id: Option<Uuid>,
}
