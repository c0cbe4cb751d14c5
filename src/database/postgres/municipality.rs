use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Municipality, State};
use crate::database::repository::MunicipalityRepository;

pub struct PgMunicipalityRepository {
    pool: PgPool,
}

impl PgMunicipalityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MunicipalityRepository for PgMunicipalityRepository {
    async fn find_by_id_and_state(&self, id: Uuid, state: State) -> Result<Option<Municipality>, DatabaseError> {
        let municipality = sqlx::query_as::<_, Municipality>(
            "SELECT id, name, state FROM municipality WHERE id = $1 AND state = $2",
        )
        .bind(id)
        .bind(state.code())
        .fetch_optional(&self.pool)
        .await?;

        Ok(municipality)
    }

    async fn find_by_name_and_state(&self, name: &str, state: State) -> Result<Option<Municipality>, DatabaseError> {
        let municipality = sqlx::query_as::<_, Municipality>(
            "SELECT id, name, state FROM municipality WHERE name = $1 AND state = $2 LIMIT 1",
        )
        .bind(name)
        .bind(state.code())
        .fetch_optional(&self.pool)
        .await?;

        Ok(municipality)
    }
}
