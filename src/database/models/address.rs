use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where a citizen lives. A citizen's municipality is their address's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: Uuid,
    pub street: String,
    pub number: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub municipality_id: Uuid,
}
