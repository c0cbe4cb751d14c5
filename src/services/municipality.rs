use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use super::error::ServiceError;
use crate::database::models::{Municipality, State};
use crate::database::repository::MunicipalityRepository;

/// Query shape for municipality-scoped searches. `state` is mandatory and at
/// least one of `id` or `name` must be given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MunicipalitySearch {
    pub name: Option<String>,
    pub id: Option<Uuid>,
    pub state: Option<State>,
}

#[derive(Clone)]
pub struct MunicipalityResolver {
    municipalities: Arc<dyn MunicipalityRepository>,
}

impl MunicipalityResolver {
    pub fn new(municipalities: Arc<dyn MunicipalityRepository>) -> Self {
        Self { municipalities }
    }

    /// Looks up by (id, state) first, then falls back to (name, state).
    pub async fn resolve(&self, search: &MunicipalitySearch) -> Result<Municipality, ServiceError> {
        let state = search
            .state
            .ok_or_else(|| ServiceError::validation("The state must be provided"))?;
        let name = search.name.as_deref().map(str::trim).filter(|n| !n.is_empty());

        if search.id.is_none() && name.is_none() {
            return Err(ServiceError::validation(
                "Either the municipality id or the municipality name must be provided",
            ));
        }

        if let Some(id) = search.id {
            if let Some(found) = self.municipalities.find_by_id_and_state(id, state).await? {
                return Ok(found);
            }
            tracing::debug!("No municipality {} in {}, trying by name", id, state);
        }

        if let Some(name) = name {
            if let Some(found) = self.municipalities.find_by_name_and_state(name, state).await? {
                return Ok(found);
            }
        }

        Err(ServiceError::not_found(
            "Municipality not found for the given id and/or name",
        ))
    }
}
