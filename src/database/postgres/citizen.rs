use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Citizen;
use crate::database::repository::CitizenRepository;

pub struct PgCitizenRepository {
    pool: PgPool,
}

impl PgCitizenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CitizenRepository for PgCitizenRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Citizen>, DatabaseError> {
        let citizen = sqlx::query_as::<_, Citizen>(
            "SELECT id, name, national_id, address_id FROM citizen WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(citizen)
    }
}
